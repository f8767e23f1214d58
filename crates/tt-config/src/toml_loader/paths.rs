//! Where the config file lives, and writing the commented default.

use std::path::{Path, PathBuf};
use tt_common::ConfigError;

use super::template::default_config_toml;

/// Directory name under the OS config/data roots.
pub const APP_DIR_NAME: &str = "tiny-torrent";

const CONFIG_FILE_NAME: &str = "config.toml";

/// `<root>/tiny-torrent/config.toml`.
pub fn config_path_in(root: &Path) -> PathBuf {
    root.join(APP_DIR_NAME).join(CONFIG_FILE_NAME)
}

pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|root| config_path_in(&root))
        .ok_or_else(|| ConfigError::ParseError("no platform config directory".into()))
}

/// Write the default template to `path` unless a file is already there.
///
/// Returns `true` when a file was created.
pub fn create_default_config(path: &Path) -> Result<bool, ConfigError> {
    if path.exists() {
        return Ok(false);
    }

    let io_err = |what: &str, target: &Path, e: std::io::Error| {
        ConfigError::ParseError(format!("{what} {}: {e}", target.display()))
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| io_err("cannot create config directory", parent, e))?;
    }
    std::fs::write(path, default_config_toml())
        .map_err(|e| io_err("cannot write default config", path, e))?;

    tracing::info!(path = %path.display(), "wrote default config");
    Ok(true)
}
