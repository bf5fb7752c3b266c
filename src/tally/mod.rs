pub mod aggregate;
pub mod classify;
pub mod types;

pub use aggregate::{day_stat, day_stats, item_age_days};
pub use classify::{classify, tally, Classified, DAY_FORMAT};
pub use types::{Category, CategoryTally, CategoryTotals, DayBucket, DayStat, ItemAge, Tally};
