//! Configuration file loading.
//!
//! Reads the application configuration from `config.toml` under the
//! platform config directory. A missing or empty file yields the default
//! configuration; a file that exists but cannot be parsed is an error.

use std::fs;
use std::path::Path;

use lorebook_core::config::AppConfig;
use lorebook_core::error::Result;

use crate::paths::LorebookPaths;

/// Loads the application configuration from the default path.
///
/// # Returns
///
/// - `Ok(AppConfig)`: Parsed configuration, or defaults when the file does
///   not exist or is empty
/// - `Err(_)`: The file exists but cannot be read or parsed
pub fn load_config() -> Result<AppConfig> {
    let path = LorebookPaths::config_file()?;
    load_config_from(&path)
}

/// Loads the application configuration from an explicit path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(path)?;

    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }

    let config: AppConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Saves the application configuration to the default path.
pub fn save_config(config: &AppConfig) -> Result<()> {
    let dir = LorebookPaths::config_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }

    let toml_string = toml::to_string_pretty(config)?;
    fs::write(LorebookPaths::config_file()?, toml_string)?;
    Ok(())
}
