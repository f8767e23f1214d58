//! Startup sequence configuration: splash, auto-open, attach handshake.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StartupConfig {
    /// Open the UI once the attach handshake settles.
    pub auto_open: bool,
    pub show_splash: bool,
    /// Splash text. Empty uses the daemon-provided message, then a default.
    pub splash_message: String,
    /// Attach handshake budget, measured from process start.
    pub handshake_timeout_ms: u64,
    /// Status poll interval (valid range: 100-60000).
    pub poll_interval_ms: u64,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            auto_open: true,
            show_splash: true,
            splash_message: String::new(),
            handshake_timeout_ms: 15_000,
            poll_interval_ms: 1_000,
        }
    }
}

impl StartupConfig {
    pub fn handshake_timeout(&self) -> Duration {
        Duration::from_millis(self.handshake_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
