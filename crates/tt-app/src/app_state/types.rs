//! Internal types and constants for the app state module.

use std::time::Duration;

use tt_rpc::TrayStatus;

/// Events delivered to the UI thread through the event-loop proxy.
#[derive(Debug)]
pub enum UserEvent {
    /// One poll result. `None` means the daemon was unreachable or its
    /// reply was not a status object.
    Status(Option<TrayStatus>),
}

/// How often to drain engine events (approx 60 Hz).
pub(super) const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// The splash closes itself after this long even if the handshake has not
/// settled.
pub(super) const SPLASH_AUTO_CLOSE: Duration = Duration::from_secs(10);

pub(super) const DEFAULT_SPLASH_MESSAGE: &str = "Starting TinyTorrent\u{2026}";
