//! Core TOML config loading: read from path or platform default.

use crate::schema::HostConfig;
use crate::validation;
use std::path::Path;
use tracing::{info, warn};
use tt_common::ConfigError;

use super::paths::{create_default_config, default_config_path};

/// Load config from a specific TOML file path.
///
/// Missing fields take serde defaults. Validation failures are logged
/// and the parsed config is returned as-is; callers that must reject
/// invalid values run `validation::validate` themselves.
pub fn load_from_path(path: &Path) -> Result<HostConfig, ConfigError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: HostConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!(path = %path.display(), error = %e, "config validation warning");
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On Windows: `%APPDATA%\tiny-torrent\config.toml`
/// On Linux: `~/.config/tiny-torrent/config.toml`
///
/// If the file does not exist, writes the default template and returns defaults.
pub fn load_default() -> Result<HostConfig, ConfigError> {
    let path = default_config_path()?;

    if create_default_config(&path)? {
        return Ok(HostConfig::default());
    }

    load_from_path(&path)
}
