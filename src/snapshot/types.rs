use serde::{Deserialize, Serialize};

use crate::github::types::Item;

/// Every item of the repository as of one fetch.
///
/// Serialized as a bare JSON array so the file stays a plain list of
/// records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    pub items: Vec<Item>,
}

impl Snapshot {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop items breaking the state/closure invariant, returning why each
    /// one was dropped
    pub fn retain_valid(&mut self) -> Vec<String> {
        let mut rejected = Vec::new();
        self.items.retain(|item| match item.validate() {
            Ok(()) => true,
            Err(reason) => {
                rejected.push(reason);
                false
            }
        });
        rejected
    }
}

/// How the snapshot file and the remote API are combined for a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CacheMode {
    /// Load the snapshot when it exists, otherwise fetch and save it
    #[default]
    UseIfPresent,
    /// Always fetch and overwrite the snapshot
    ForceRefresh,
    /// Never touch the network; a missing snapshot means no data
    CacheOnly,
}

impl CacheMode {
    pub fn needs_network(&self) -> bool {
        !matches!(self, CacheMode::CacheOnly)
    }
}
