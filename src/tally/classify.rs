use super::types::{Category, Tally};
use crate::github::types::Item;

/// Day key format (zero-padded, so lexical order is chronological)
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Where one item lands in the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified<'a> {
    pub category: Category,
    pub day: String,
    pub item: &'a Item,
}

/// Route an item to its category and bucket day.
///
/// Closed items count on the day they were closed, open ones on the day they
/// were opened.
pub fn classify(item: &Item) -> Classified<'_> {
    let category = if item.is_pull_request() {
        Category::PullRequest
    } else {
        Category::Issue
    };

    let when = match item.closed_at {
        Some(closed_at) if item.is_closed() => closed_at,
        _ => item.created_at,
    };

    Classified {
        category,
        day: when.format(DAY_FORMAT).to_string(),
        item,
    }
}

/// Classify every item and fold the results into per-category totals and
/// day buckets
pub fn tally(items: &[Item]) -> Tally<'_> {
    items.iter().map(classify).fold(Tally::default(), |mut tally, classified| {
        let entry = tally.category_mut(classified.category);
        if classified.item.is_closed() {
            entry.totals.closed += 1;
        } else {
            entry.totals.open += 1;
        }
        entry
            .days
            .entry(classified.day)
            .or_default()
            .items
            .push(classified.item);
        tally
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::types::tests::{as_pull_request, closed_item, open_item};
    use crate::tally::types::CategoryTotals;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_open_item_bucketed_on_creation_day() {
        let item = open_item(1, Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap());
        let classified = classify(&item);
        assert_eq!(classified.category, Category::Issue);
        assert_eq!(classified.day, "2024-03-05");
    }

    #[test]
    fn test_closed_item_bucketed_on_closure_day() {
        let item = closed_item(
            1,
            Utc.with_ymd_and_hms(2023, 11, 20, 8, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 7, 18, 0, 0).unwrap(),
        );
        assert_eq!(classify(&item).day, "2024-03-07");
    }

    #[test]
    fn test_pull_request_category() {
        let item = as_pull_request(open_item(1, Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()));
        assert_eq!(classify(&item).category, Category::PullRequest);
    }

    #[test]
    fn test_tally_totals_and_buckets() {
        let day1 = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let day2 = Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap();
        let items = vec![
            open_item(1, day1),
            closed_item(2, day1, day2),
            as_pull_request(open_item(3, day2)),
            as_pull_request(closed_item(4, day1, day2)),
            as_pull_request(closed_item(5, day1, day1)),
            open_item(6, day2),
        ];

        let tally = tally(&items);

        assert_eq!(tally.issues.totals, CategoryTotals { open: 2, closed: 1 });
        assert_eq!(tally.pull_requests.totals, CategoryTotals { open: 1, closed: 2 });

        let issue_day2 = &tally.issues.days["2024-01-02"];
        let ids: Vec<u64> = issue_day2.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 6]);
        assert_eq!(tally.issues.days["2024-01-01"].len(), 1);

        assert_eq!(tally.pull_requests.days["2024-01-01"].len(), 1);
        assert_eq!(tally.pull_requests.days["2024-01-02"].len(), 2);
    }

    #[test]
    fn test_every_item_lands_in_exactly_one_bucket() {
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let items: Vec<Item> = (0..20)
            .map(|n| {
                let created = base + chrono::Duration::hours(n * 7);
                let item = if n % 3 == 0 {
                    closed_item(n as u64, created, created + chrono::Duration::hours(30))
                } else {
                    open_item(n as u64, created)
                };
                if n % 2 == 0 {
                    as_pull_request(item)
                } else {
                    item
                }
            })
            .collect();

        let tally = tally(&items);
        let bucketed: usize = [&tally.pull_requests, &tally.issues]
            .iter()
            .flat_map(|c| c.days.values())
            .map(|bucket| bucket.len())
            .sum();
        let counted: usize = [&tally.pull_requests, &tally.issues]
            .iter()
            .map(|c| c.totals.open + c.totals.closed)
            .sum();

        assert_eq!(bucketed, items.len());
        assert_eq!(counted, items.len());
    }

    #[test]
    fn test_empty_snapshot() {
        let tally = tally(&[]);
        assert!(tally.issues.days.is_empty());
        assert_eq!(tally.pull_requests.totals, CategoryTotals::default());
    }
}
