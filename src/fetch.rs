use crate::diagnostics::{Diagnostics, Stage};
use crate::github::pages::{fetch_all_items, PageSource};
use crate::snapshot::{CacheMode, Snapshot, SnapshotStore};

const LOG_TARGET: &str = "issue_tally::fetch";

/// What a run does to obtain its snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    LoadCached,
    FetchAndSave,
}

/// Decide between the snapshot file and the remote API.
///
/// The existence check is the caller's; this only applies the policy.
pub fn plan(mode: CacheMode, snapshot_exists: bool) -> Plan {
    match mode {
        CacheMode::UseIfPresent if snapshot_exists => Plan::LoadCached,
        CacheMode::UseIfPresent | CacheMode::ForceRefresh => Plan::FetchAndSave,
        CacheMode::CacheOnly => Plan::LoadCached,
    }
}

/// Read the snapshot file, falling back to an empty snapshot on failure
pub fn load_cached(store: &SnapshotStore) -> (Snapshot, Diagnostics) {
    let mut diagnostics = Diagnostics::new();

    if !store.exists() {
        diagnostics.push(
            Stage::Snapshot,
            format!("No snapshot at {}; nothing to report", store.path().display()),
        );
        return (Snapshot::default(), diagnostics);
    }

    log::info!(target: LOG_TARGET, "Reading local issues from {}", store.path().display());

    let mut snapshot = match store.load() {
        Ok(snapshot) => snapshot,
        Err(e) => {
            diagnostics.push(Stage::Snapshot, format!("{:#}", e));
            Snapshot::default()
        }
    };

    for reason in snapshot.retain_valid() {
        diagnostics.push(Stage::Ingest, reason);
    }

    log::info!(target: LOG_TARGET, "Loaded {} items", snapshot.len());
    (snapshot, diagnostics)
}

/// Fetch every item from the remote and overwrite the snapshot file.
///
/// A fetch that failed and produced nothing leaves the existing file alone.
/// A failed save is recorded; the fetched data is returned regardless.
pub async fn fetch_and_save<S: PageSource>(source: &S, store: &SnapshotStore) -> (Snapshot, Diagnostics) {
    log::info!(target: LOG_TARGET, "Retrieving remote issues");

    let (items, mut diagnostics) = fetch_all_items(source).await;
    let snapshot = Snapshot::new(items);

    if snapshot.is_empty() && diagnostics.count(Stage::Fetch) > 0 {
        diagnostics.push(
            Stage::Snapshot,
            format!("Fetch failed with no items; not overwriting {}", store.path().display()),
        );
        return (snapshot, diagnostics);
    }

    match store.save(&snapshot) {
        Ok(()) => log::info!(target: LOG_TARGET, "Wrote {}", store.path().display()),
        Err(e) => diagnostics.push(Stage::Snapshot, format!("{:#}", e)),
    }

    (snapshot, diagnostics)
}

/// Produce this run's snapshot according to `mode`
pub async fn load_snapshot<S: PageSource>(
    source: &S,
    store: &SnapshotStore,
    mode: CacheMode,
) -> (Snapshot, Diagnostics) {
    match plan(mode, store.exists()) {
        Plan::LoadCached => load_cached(store),
        Plan::FetchAndSave => fetch_and_save(source, store).await,
    }
}
