//! Control-plane daemon endpoint settings.

use serde::{Deserialize, Serialize};

/// Where the daemon listens and how to authenticate against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    pub host: String,
    /// RPC port. `0` means unknown; RPC calls are skipped until it is set.
    pub port: u16,
    /// Value sent in the `X-TT-Auth` header and handed to the embedded UI.
    pub token: String,
    /// Per-request transport timeout in milliseconds (valid range: 250-60000).
    pub request_timeout_ms: u64,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 0,
            token: String::new(),
            request_timeout_ms: 5_000,
        }
    }
}

impl DaemonConfig {
    /// The embedded UI's single entry URL, served by the daemon.
    pub fn entry_url(&self) -> String {
        format!(
            "http://{}:{}/index.html?token={}",
            self.host, self.port, self.token
        )
    }
}
