//! Blocking HTTP transport to the daemon's RPC endpoint.

use std::sync::Mutex;
use std::time::Duration;

use tt_common::HostError;
use tt_config::schema::DaemonConfig;

pub const RPC_PATH: &str = "/transmission/rpc";
const AUTH_HEADER: &str = "X-TT-Auth";

/// Something that can carry one RPC round trip.
///
/// Returns the response body, or an empty string on any failure.
pub trait Transport: Send + Sync {
    fn post(&self, body: &str) -> String;
}

/// Live client state, created lazily and dropped after any failure.
struct Handles {
    client: reqwest::blocking::Client,
    url: String,
}

/// Shared RPC connection. Safe to use from the poller and UI threads.
pub struct RpcConnection {
    host: String,
    port: u16,
    token: String,
    timeout: Duration,
    handles: Mutex<Option<Handles>>,
}

impl RpcConnection {
    pub fn new(config: &DaemonConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            token: config.token.clone(),
            timeout: Duration::from_millis(config.request_timeout_ms),
            handles: Mutex::new(None),
        }
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Whether a client is currently cached.
    pub fn is_connected(&self) -> bool {
        match self.handles.lock() {
            Ok(guard) => guard.is_some(),
            Err(poisoned) => poisoned.into_inner().is_some(),
        }
    }

    fn open_handles(&self) -> Result<Handles, HostError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.timeout)
            .no_proxy()
            .build()
            .map_err(|e| HostError::Transport(e.to_string()))?;
        Ok(Handles {
            client,
            url: format!("http://{}:{}{}", self.host, self.port, RPC_PATH),
        })
    }

    fn round_trip(&self, handles: &Handles, body: &str) -> Result<String, HostError> {
        let response = handles
            .client
            .post(&handles.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(AUTH_HEADER, &self.token)
            .body(body.to_string())
            .send()
            .map_err(|e| HostError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HostError::Transport(format!("HTTP {status}")));
        }

        response
            .text()
            .map_err(|e| HostError::Transport(e.to_string()))
    }

    /// POST one envelope and return the response body.
    ///
    /// Returns `""` when the port is unknown or on any transport failure;
    /// a failure also discards the cached client.
    pub fn post(&self, body: &str) -> String {
        if self.port == 0 {
            return String::new();
        }

        let mut guard = match self.handles.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };

        if guard.is_none() {
            match self.open_handles() {
                Ok(h) => *guard = Some(h),
                Err(e) => {
                    tracing::warn!(error = %e, "failed to create RPC client");
                    return String::new();
                }
            }
        }

        let Some(handles) = guard.as_ref() else {
            return String::new();
        };

        match self.round_trip(handles, body) {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!(port = self.port, error = %e, "RPC request failed");
                *guard = None;
                String::new()
            }
        }
    }
}

impl Transport for RpcConnection {
    fn post(&self, body: &str) -> String {
        RpcConnection::post(self, body)
    }
}

// =============================================================================
// TESTS
// =============================================================================
