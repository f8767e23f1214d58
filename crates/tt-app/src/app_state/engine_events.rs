//! Engine event draining: bridge requests, navigation and file drops.

use std::path::PathBuf;

use tt_config::schema::DaemonConfig;
use tt_host::{EngineEvent, EngineHandle};

use super::core::TorrentHostApp;
use super::services::AppServices;

impl TorrentHostApp {
    /// Take every queued engine event and act on it.
    pub(super) fn poll_engine_events(&mut self) {
        let events = match self.session.as_mut().and_then(|s| s.engine_mut()) {
            Some(engine) => engine.drain_events(),
            None => return,
        };

        for event in events {
            match event {
                EngineEvent::Message(raw) => self.handle_bridge_message(&raw),
                EngineEvent::NavigationCompleted { success } => {
                    if let Some(json) = navigation_completed(success, &self.config.daemon) {
                        self.post_to_content(&json);
                    }
                }
                EngineEvent::FilesDropped(paths) => self.add_dropped_files(paths),
            }
        }
    }

    fn handle_bridge_message(&mut self, raw: &str) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let ready = session.is_ready();
        let mut close_requested = false;

        let response = {
            let mut services = AppServices::new(session.window_mut(), ready, &mut close_requested);
            tt_bridge::handle_raw(&mut services, raw)
        };

        if let Some(json) = response {
            self.post_to_content(&json);
        }
        if close_requested {
            self.close_ui();
        }
    }

    pub(super) fn post_to_content(&mut self, json: &str) {
        let Some(engine) = self.session.as_mut().and_then(|s| s.engine_mut()) else {
            return;
        };
        if let Err(e) = engine.post_message(json) {
            tracing::warn!(error = %e, "failed to post bridge message");
        }
    }

    fn add_dropped_files(&mut self, paths: Vec<PathBuf>) {
        let download_dir = self.last_status.as_ref().map(|s| s.download_dir.clone());
        for path in paths {
            if !is_torrent_file(&path) {
                tracing::debug!(path = %path.display(), "ignoring dropped non-torrent file");
                continue;
            }
            let path = path.to_string_lossy();
            if tt_rpc::add_torrent(&*self.rpc, &path, download_dir.as_deref()) {
                tracing::info!(path = %path, "dropped torrent added");
            }
        }
    }
}

/// The message re-sent to the page after any navigation completes,
/// successful or not: the daemon credentials as an `auth-token` event.
fn navigation_completed(success: bool, daemon: &DaemonConfig) -> Option<String> {
    tracing::debug!(success, "navigation completed");
    tt_bridge::auth_token_event(&daemon.token, &daemon.host, daemon.port).map(|e| e.to_json())
}

fn is_torrent_file(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("torrent"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn daemon(token: &str) -> DaemonConfig {
        DaemonConfig {
            port: 9091,
            token: token.into(),
            ..Default::default()
        }
    }

    #[test]
    fn auth_token_is_pushed_after_successful_navigation() {
        let json = navigation_completed(true, &daemon("t0k")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "event");
        assert_eq!(value["name"], "auth-token");
        assert_eq!(value["payload"]["token"], "t0k");
        assert_eq!(value["payload"]["port"], "9091");
    }

    #[test]
    fn auth_token_is_pushed_after_failed_navigation() {
        assert_eq!(
            navigation_completed(false, &daemon("t0k")),
            navigation_completed(true, &daemon("t0k"))
        );
        assert!(navigation_completed(false, &daemon("t0k")).is_some());
    }

    #[test]
    fn empty_token_is_not_pushed() {
        assert_eq!(navigation_completed(true, &daemon("")), None);
        assert_eq!(navigation_completed(false, &daemon("")), None);
    }

    #[test]
    fn torrent_extension_is_case_insensitive() {
        assert!(is_torrent_file(Path::new("C:/dl/ubuntu.torrent")));
        assert!(is_torrent_file(Path::new("/tmp/Debian.TORRENT")));
        assert!(!is_torrent_file(Path::new("/tmp/notes.txt")));
        assert!(!is_torrent_file(Path::new("/tmp/torrent")));
    }
}
