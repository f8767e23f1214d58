//! Host configuration system.
//!
//! TOML-based configuration for the native host: daemon endpoint, window
//! geometry, hosting engine preferences, startup behavior, and logging.
//! Every section uses serde defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tt_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{HostConfig, CONFIG_SCHEMA_VERSION};

use std::path::Path;

use tt_common::ConfigError;

/// Load config from the platform default path.
///
/// Creates a commented default file if none exists, then validates.
pub fn load_config() -> Result<HostConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from an explicit file and validate it.
pub fn load_config_from(path: &Path) -> Result<HostConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &HostConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let config = HostConfig::default();
        let json = config_to_json(&config);
        assert!(json.contains("\"daemon\""));
        assert!(json.contains("\"window\""));
        assert!(json.contains("\"engine\""));
        assert!(json.contains("\"startup\""));
        assert!(json.contains("\"logging\""));
    }

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let config = HostConfig::default();
        let json = config_to_json(&config);
        let parsed: HostConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.daemon.host, "127.0.0.1");
        assert_eq!(parsed.startup.handshake_timeout_ms, 15_000);
        assert!(parsed.engine.prefer_composition);
    }

    #[test]
    fn load_config_from_missing_file_is_not_found() {
        let err = load_config_from(Path::new("/tmp/tt_config_does_not_exist.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn load_config_from_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[startup]\npoll_interval_ms = 1\n").unwrap();
        let err = load_config_from(&path).unwrap_err();
        assert!(err.to_string().contains("startup.poll_interval_ms"));
    }
}
