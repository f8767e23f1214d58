//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_parse_error() {
    let result = load_from_path(Path::new("/tmp/nonexistent_tt_config.toml"));
    let err = result.unwrap_err();
    assert!(matches!(err, tt_common::ConfigError::ParseError(_)));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[daemon]
port = 9091
token = "abc123"

[window]
close_to_tray = true
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.daemon.port, 9091);
    assert_eq!(config.daemon.token, "abc123");
    assert!(config.window.close_to_tray);
    // Defaults preserved
    assert_eq!(config.daemon.host, "127.0.0.1");
    assert_eq!(config.window.width, 1280);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, tt_common::ConfigError::ParseError(_)));
}

#[test]
fn load_with_invalid_values_returns_parsed_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[window]\nwidth = 10\n").unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.window.width, 10);
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = config_path_in(dir.path());

    assert!(create_default_config(&path).unwrap());
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.daemon.host, "127.0.0.1");
    assert!(config.startup.auto_open);
    assert!(crate::validation::validate(&config).is_ok());
}

#[test]
fn default_template_is_fully_commented() {
    let template = template::default_config_toml();
    let parsed: crate::HostConfig = toml::from_str(&template).unwrap();
    assert_eq!(parsed.startup.poll_interval_ms, 1_000);
}

#[test]
fn default_config_path_ends_with_app_dir() {
    let path = default_config_path().unwrap();
    assert_eq!(path.file_name().unwrap(), "config.toml");
    assert!(path.parent().unwrap().ends_with(APP_DIR_NAME));
}

#[test]
fn existing_config_is_never_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let path = config_path_in(dir.path());
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "[daemon]\nport = 4242\n").unwrap();

    assert!(!create_default_config(&path).unwrap());
    assert_eq!(load_from_path(&path).unwrap().daemon.port, 4242);
}
