//! Tray status snapshot reported by `session-tray-status`.

use serde::Serialize;
use serde_json::Value;

/// Daemon-side UI preferences carried in the status `ui` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UiPreferences {
    pub auto_open: bool,
    pub autorun_hidden: bool,
    pub show_splash: bool,
    pub splash_message: String,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            auto_open: true,
            autorun_hidden: false,
            show_splash: true,
            splash_message: String::new(),
        }
    }
}

/// Immutable snapshot of daemon state, produced by the poller and consumed
/// on the UI thread.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrayStatus {
    pub download_speed: u64,
    pub upload_speed: u64,
    pub active_torrent_count: u64,
    pub seeding_count: u64,
    pub all_paused: bool,
    pub ui_attached: bool,
    pub download_dir: String,
    pub error_message: String,
    pub ui: UiPreferences,
}

impl TrayStatus {
    /// Parse a `session-tray-status` response body.
    ///
    /// Returns `None` for an empty or non-JSON body. Missing or mistyped
    /// fields keep their defaults.
    pub fn parse(body: &str) -> Option<Self> {
        if body.is_empty() {
            return None;
        }
        let root: Value = serde_json::from_str(body).ok()?;
        let mut status = Self::default();

        let Some(args) = root.get("arguments").filter(|a| a.is_object()) else {
            return Some(status);
        };

        let uint = |key: &str| args.get(key).and_then(Value::as_u64);
        let boolean = |key: &str| args.get(key).and_then(Value::as_bool);
        let string = |key: &str| args.get(key).and_then(Value::as_str).map(String::from);

        if let Some(v) = uint("downloadSpeed") {
            status.download_speed = v;
        }
        if let Some(v) = uint("uploadSpeed") {
            status.upload_speed = v;
        }
        if let Some(v) = uint("activeTorrentCount") {
            status.active_torrent_count = v;
        }
        if let Some(v) = uint("seedingCount") {
            status.seeding_count = v;
        }
        if let Some(v) = boolean("allPaused") {
            status.all_paused = v;
        }
        if let Some(v) = boolean("uiAttached") {
            status.ui_attached = v;
        }
        if let Some(v) = string("downloadDir") {
            status.download_dir = v;
        }
        if let Some(v) = string("errorMessage") {
            status.error_message = v;
        }
        if let Some(ui) = args.get("ui").filter(|u| u.is_object()) {
            status.ui = parse_ui_preferences(ui);
        }

        Some(status)
    }
}

fn parse_ui_preferences(ui: &Value) -> UiPreferences {
    let mut prefs = UiPreferences::default();
    if let Some(v) = ui.get("autoOpen").and_then(Value::as_bool) {
        prefs.auto_open = v;
    }
    if let Some(v) = ui.get("autorunHidden").and_then(Value::as_bool) {
        prefs.autorun_hidden = v;
    }
    if let Some(v) = ui.get("showSplash").and_then(Value::as_bool) {
        prefs.show_splash = v;
    }
    if let Some(v) = ui.get("splashMessage").and_then(Value::as_str) {
        prefs.splash_message = v.to_string();
    }
    prefs
}
