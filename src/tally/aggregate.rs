use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::types::{DayBucket, DayStat, ItemAge};
use crate::github::types::Item;

/// Age of an item in whole days, truncated toward zero.
///
/// Open items are measured from creation up to `now`. Closed items are
/// measured as `created_at - closed_at`, which keeps the report's historical
/// sign: a closed item never shows a positive age.
pub fn item_age_days(item: &Item, now: DateTime<Utc>) -> i64 {
    let elapsed = match item.closed_at {
        Some(closed_at) if item.is_closed() => item.created_at - closed_at,
        _ => now - item.created_at,
    };
    elapsed.num_hours() / 24
}

/// Summarize one bucket
pub fn day_stat(day: &str, bucket: &DayBucket<'_>, now: DateTime<Utc>) -> DayStat {
    DayStat {
        day: day.to_string(),
        count: bucket.len(),
        open: bucket.open_count(),
        closed: bucket.closed_count(),
        net: bucket.net(),
        ages: bucket
            .items
            .iter()
            .map(|item| ItemAge {
                state: item.state,
                days: item_age_days(item, now),
            })
            .collect(),
    }
}

/// One stat per bucket day, oldest day first
pub fn day_stats(days: &BTreeMap<String, DayBucket<'_>>, now: DateTime<Utc>) -> Vec<DayStat> {
    days.iter().map(|(day, bucket)| day_stat(day, bucket, now)).collect()
}
