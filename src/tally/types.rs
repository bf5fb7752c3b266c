use std::collections::BTreeMap;

use crate::github::types::{Item, ItemState};

/// Top-level split of the repository's items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    PullRequest,
    Issue,
}

impl Category {
    /// Singular label used in day lines ("Pull Request", "Issue")
    pub fn label(&self) -> &'static str {
        match self {
            Category::PullRequest => "Pull Request",
            Category::Issue => "Issue",
        }
    }

    /// Plural heading used for the totals block
    pub fn heading(&self) -> &'static str {
        match self {
            Category::PullRequest => "pull requests",
            Category::Issue => "issues",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryTotals {
    pub open: usize,
    pub closed: usize,
}

/// Items sharing one bucket day, in the order they were classified
#[derive(Debug, Clone, Default)]
pub struct DayBucket<'a> {
    pub items: Vec<&'a Item>,
}

impl DayBucket<'_> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn open_count(&self) -> usize {
        self.items.iter().filter(|item| !item.is_closed()).count()
    }

    pub fn closed_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_closed()).count()
    }

    /// Open minus closed
    pub fn net(&self) -> i64 {
        self.open_count() as i64 - self.closed_count() as i64
    }
}

/// Totals and day buckets of one category
#[derive(Debug, Clone, Default)]
pub struct CategoryTally<'a> {
    pub totals: CategoryTotals,
    pub days: BTreeMap<String, DayBucket<'a>>,
}

/// Every item of a snapshot routed into its category and day
#[derive(Debug, Clone, Default)]
pub struct Tally<'a> {
    pub pull_requests: CategoryTally<'a>,
    pub issues: CategoryTally<'a>,
}

impl<'a> Tally<'a> {
    pub fn category(&self, category: Category) -> &CategoryTally<'a> {
        match category {
            Category::PullRequest => &self.pull_requests,
            Category::Issue => &self.issues,
        }
    }

    pub(crate) fn category_mut(&mut self, category: Category) -> &mut CategoryTally<'a> {
        match category {
            Category::PullRequest => &mut self.pull_requests,
            Category::Issue => &mut self.issues,
        }
    }
}

/// Age of one item as shown in a day line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemAge {
    pub state: ItemState,
    pub days: i64,
}

/// Aggregated view of one bucket day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayStat {
    pub day: String,
    pub count: usize,
    pub open: usize,
    pub closed: usize,
    pub net: i64,
    pub ages: Vec<ItemAge>,
}
