use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::github::types::RepoId;
use crate::snapshot::CacheMode;

/// Contents of config.yaml.
///
/// Example:
/// ```yaml
/// repository:
///   owner: docker
///   name: machine
/// snapshot: issues.json
/// cache_mode: use-if-present
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Repository to report on (default: docker/machine)
    #[serde(default)]
    pub repository: RepoId,

    /// Snapshot file (default: issues.json in the working directory)
    #[serde(default)]
    pub snapshot: Option<PathBuf>,

    #[serde(default)]
    pub cache_mode: CacheMode,

    /// GitHub Enterprise API root, e.g. https://github.example.com/api/v3
    #[serde(default)]
    pub api_url: Option<String>,
}
