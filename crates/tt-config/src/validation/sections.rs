//! Validation for daemon, window, and startup sections.

use crate::schema::HostConfig;

use super::helpers::{validate_range, validate_range_ms};

const MAX_WINDOW_EXTENT: u32 = 16_384;

pub(crate) fn validate_daemon(errors: &mut Vec<String>, config: &HostConfig) {
    if config.daemon.host.trim().is_empty() {
        errors.push("daemon.host must not be empty".into());
    }
    validate_range_ms(
        errors,
        "daemon.request_timeout_ms",
        config.daemon.request_timeout_ms,
        250,
        60_000,
    );
}

pub(crate) fn validate_window(errors: &mut Vec<String>, config: &HostConfig) {
    let window = &config.window;
    validate_range(errors, "window.width", window.width, 320, MAX_WINDOW_EXTENT);
    validate_range(errors, "window.height", window.height, 240, MAX_WINDOW_EXTENT);
    validate_range(errors, "window.min_width", window.min_width, 1, MAX_WINDOW_EXTENT);
    validate_range(errors, "window.min_height", window.min_height, 1, MAX_WINDOW_EXTENT);
    if window.min_width > window.width {
        errors.push(format!(
            "window.min_width = {} exceeds window.width = {}",
            window.min_width, window.width
        ));
    }
    if window.min_height > window.height {
        errors.push(format!(
            "window.min_height = {} exceeds window.height = {}",
            window.min_height, window.height
        ));
    }
}

pub(crate) fn validate_startup(errors: &mut Vec<String>, config: &HostConfig) {
    validate_range_ms(
        errors,
        "startup.handshake_timeout_ms",
        config.startup.handshake_timeout_ms,
        1_000,
        120_000,
    );
    validate_range_ms(
        errors,
        "startup.poll_interval_ms",
        config.startup.poll_interval_ms,
        100,
        60_000,
    );
}
