//! Tests for the full validation pipeline.

use super::*;

#[test]
fn default_config_validates() {
    let config = HostConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_empty_host() {
    let mut config = HostConfig::default();
    config.daemon.host = "   ".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("daemon.host"));
}

#[test]
fn catches_request_timeout_too_small() {
    let mut config = HostConfig::default();
    config.daemon.request_timeout_ms = 10;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("daemon.request_timeout_ms"));
}

#[test]
fn catches_window_too_small() {
    let mut config = HostConfig::default();
    config.window.width = 100;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("window.width"));
}

#[test]
fn catches_min_size_above_initial_size() {
    let mut config = HostConfig::default();
    config.window.min_height = 900;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("window.min_height"));
}

#[test]
fn catches_handshake_timeout_out_of_range() {
    let mut config = HostConfig::default();
    config.startup.handshake_timeout_ms = 500_000;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("startup.handshake_timeout_ms"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = HostConfig::default();
    config.daemon.host = String::new();
    config.startup.poll_interval_ms = 5;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("daemon.host"));
    assert!(err.contains("startup.poll_interval_ms"));
    assert!(err.contains("; "));
}
