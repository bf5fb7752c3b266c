pub mod storage;
pub mod types;

pub use storage::{SnapshotStore, DEFAULT_SNAPSHOT_FILE};
pub use types::{CacheMode, Snapshot};
