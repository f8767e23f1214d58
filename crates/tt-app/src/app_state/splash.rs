//! Startup splash: a small frameless window showing a status line until
//! the attach handshake settles.

use std::sync::Arc;
use std::time::Instant;

use winit::dpi::LogicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes, WindowId};
use wry::{WebView, WebViewBuilder};

use super::core::TorrentHostApp;
use super::types::{DEFAULT_SPLASH_MESSAGE, SPLASH_AUTO_CLOSE};

const SPLASH_SIZE: f64 = 320.0;

/// Configured text first, then the daemon's, then the built-in default.
pub(super) fn splash_message<'a>(configured: &'a str, daemon: &'a str) -> &'a str {
    [configured, daemon]
        .into_iter()
        .map(str::trim)
        .find(|m| !m.is_empty())
        .unwrap_or(DEFAULT_SPLASH_MESSAGE)
}

/// A JS string literal safe to embed inside a `<script>` element.
fn script_literal(text: &str) -> String {
    serde_json::Value::from(text)
        .to_string()
        .replace("</", "<\\/")
}

fn message_script(text: &str) -> String {
    format!(
        "document.getElementById('message').textContent = {};",
        script_literal(text)
    )
}

pub(super) fn splash_html(message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><style>
html, body {{ margin: 0; height: 100%; overflow: hidden; user-select: none; cursor: default; }}
body {{ display: flex; flex-direction: column; align-items: center; justify-content: center;
  font: 14px "Segoe UI", system-ui, sans-serif; background: #1b1d22; color: #e8e8ea; }}
#title {{ font-size: 22px; font-weight: 600; margin-bottom: 18px; }}
#message {{ max-width: 260px; text-align: center; opacity: 0.8; }}
</style></head>
<body>
<div id="title">TinyTorrent</div>
<div id="message"></div>
<script>
{}
document.addEventListener('mousedown', function (e) {{
  if (e.button === 0 && window.ipc) {{ window.ipc.postMessage('drag'); }}
}});
</script>
</body></html>"#,
        message_script(message)
    )
}

pub(super) struct Splash {
    window: Arc<Window>,
    webview: WebView,
    opened: Instant,
    message: String,
}

impl Splash {
    pub(super) fn open(event_loop: &ActiveEventLoop, message: &str) -> Option<Self> {
        let attrs = WindowAttributes::default()
            .with_title("TinyTorrent")
            .with_decorations(false)
            .with_resizable(false)
            .with_inner_size(LogicalSize::new(SPLASH_SIZE, SPLASH_SIZE));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::warn!(error = %e, "failed to create splash window");
                return None;
            }
        };
        if let Some(monitor) = window.current_monitor() {
            let screen = monitor.size();
            let own = window.outer_size();
            window.set_outer_position(winit::dpi::PhysicalPosition::new(
                (screen.width.saturating_sub(own.width) / 2) as i32,
                (screen.height.saturating_sub(own.height) / 2) as i32,
            ));
        }

        let drag_target = Arc::clone(&window);
        let built = WebViewBuilder::new()
            .with_html(splash_html(message))
            .with_ipc_handler(move |request| {
                if request.body() == "drag" {
                    if let Err(e) = drag_target.drag_window() {
                        tracing::debug!(error = %e, "splash drag failed");
                    }
                }
            })
            .build(&*window);

        match built {
            Ok(webview) => {
                tracing::debug!("splash shown");
                Some(Self {
                    window,
                    webview,
                    opened: Instant::now(),
                    message: message.to_string(),
                })
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to create splash content");
                None
            }
        }
    }

    pub(super) fn id(&self) -> WindowId {
        self.window.id()
    }

    pub(super) fn expired(&self, now: Instant) -> bool {
        now.duration_since(self.opened) >= SPLASH_AUTO_CLOSE
    }

    pub(super) fn set_message(&mut self, message: &str) {
        if message == self.message {
            return;
        }
        self.message = message.to_string();
        if let Err(e) = self.webview.evaluate_script(&message_script(message)) {
            tracing::debug!(error = %e, "failed to update splash message");
        }
    }
}

impl TorrentHostApp {
    pub(super) fn open_splash(&mut self, event_loop: &ActiveEventLoop) {
        if self.splash.is_some() || !self.config.startup.show_splash {
            return;
        }
        let message = splash_message(&self.config.startup.splash_message, "").to_string();
        self.splash = Splash::open(event_loop, &message);
    }

    pub(super) fn close_splash(&mut self) {
        if self.splash.take().is_some() {
            tracing::debug!("splash closed");
        }
    }

    /// Close the splash once it has been up for its full lifetime.
    pub(super) fn poll_splash(&mut self, now: Instant) {
        if self.splash.as_ref().is_some_and(|s| s.expired(now)) {
            self.close_splash();
        }
    }

    pub(super) fn refresh_splash_message(&mut self) {
        let daemon = self
            .last_status
            .as_ref()
            .map(|s| s.ui.splash_message.as_str())
            .unwrap_or_default();
        let message = splash_message(&self.config.startup.splash_message, daemon).to_string();
        if let Some(splash) = self.splash.as_mut() {
            splash.set_message(&message);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
