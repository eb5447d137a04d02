//! Unified path management for Lorebook files.
//!
//! All Lorebook configuration and chat data live under the platform
//! config/data directories, resolved through the `dirs` crate so the
//! layout is consistent across Linux, macOS, and Windows.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/lorebook/          # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/lorebook/     # Data directory
//! └── store/                   # Key-value files (chat sessions)
//! ```

use std::path::PathBuf;

use lorebook_core::error::{LorebookError, Result};

/// Unified path management for Lorebook.
pub struct LorebookPaths;

impl LorebookPaths {
    /// Returns the Lorebook configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/lorebook/`)
    /// - `Err(_)`: Could not determine the platform config directory
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("lorebook"))
            .ok_or_else(|| LorebookError::config("Cannot find config directory"))
    }

    /// Returns the Lorebook data directory.
    ///
    /// This is where larger files (the persisted chat store) live.
    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join("lorebook"))
            .ok_or_else(|| LorebookError::config("Cannot find data directory"))
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the root directory for key-value store files.
    ///
    /// Honors the `data_dir` override from [`lorebook_core::config::AppConfig`]
    /// when one is set.
    pub fn store_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        match data_dir_override {
            Some(dir) => Ok(dir.join("store")),
            None => Ok(Self::data_dir()?.join("store")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_dir_honors_override() {
        let override_dir = PathBuf::from("/tmp/lorebook-test");
        let dir = LorebookPaths::store_dir(Some(&override_dir)).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/lorebook-test/store"));
    }
}
