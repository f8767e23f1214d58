//! Control-plane RPC client for the local torrent daemon.
//!
//! All calls are blocking and bounded by the configured request timeout.
//! Transport failures never surface as errors: callers receive an empty
//! body and treat the daemon as unavailable.

pub mod connection;
pub mod envelope;
pub mod session;
pub mod status;

pub use connection::{RpcConnection, Transport, RPC_PATH};
pub use envelope::{request_body, response_arguments, response_success};
pub use session::{add_torrent, detach_ui, request_ui_focus, tray_status};
pub use status::{TrayStatus, UiPreferences};
