//! Session-level calls used by the host.

use serde_json::json;

use crate::connection::Transport;
use crate::envelope::{request_body, response_success};
use crate::status::TrayStatus;

/// Fetch the current tray status. `None` when the daemon is unreachable.
pub fn tray_status<T: Transport + ?Sized>(transport: &T) -> Option<TrayStatus> {
    TrayStatus::parse(&transport.post(&request_body("session-tray-status", None)))
}

/// Ask the daemon to focus the UI it already has attached.
///
/// On failure the attached UI is considered gone: `session-ui-detach` is
/// posted and `false` is returned.
pub fn request_ui_focus<T: Transport + ?Sized>(transport: &T) -> bool {
    let body = transport.post(&request_body("session-ui-focus", None));
    if response_success(&body) {
        return true;
    }
    tracing::debug!("session-ui-focus failed, detaching UI");
    detach_ui(transport);
    false
}

/// Tell the daemon the native UI is no longer attached.
pub fn detach_ui<T: Transport + ?Sized>(transport: &T) -> bool {
    response_success(&transport.post(&request_body("session-ui-detach", None)))
}

/// Add a torrent from a metainfo file on disk.
pub fn add_torrent<T: Transport + ?Sized>(
    transport: &T,
    metainfo_path: &str,
    download_dir: Option<&str>,
) -> bool {
    let mut arguments = json!({ "metainfo-path": metainfo_path });
    if let Some(dir) = download_dir.filter(|d| !d.is_empty()) {
        arguments["download-dir"] = json!(dir);
    }
    let ok = response_success(&transport.post(&request_body("torrent-add", Some(arguments))));
    if !ok {
        tracing::info!(path = %metainfo_path, "torrent-add request failed");
    }
    ok
}
