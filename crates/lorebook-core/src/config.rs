use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Application-level configuration.
///
/// Loaded from `config.toml` under the platform config directory by the
/// infrastructure layer; every field has a sensible default so a missing
/// file means a default configuration, not an error.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Overrides the directory the chat store is persisted under.
    /// Defaults to the platform data directory when unset.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}
