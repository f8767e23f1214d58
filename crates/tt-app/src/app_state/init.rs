//! Window creation and hosting session setup.

use std::path::PathBuf;
use std::sync::Arc;

use tt_host::{DesktopPlatform, DesktopWindow, EngineOptions, HostWindow, HostingSession, SessionOptions};
use winit::dpi::LogicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowAttributes;

use super::core::TorrentHostApp;

impl TorrentHostApp {
    /// Create the frameless host window, hidden until content is ready.
    /// Returns `false` if the event loop should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let cfg = &self.config.window;
        let attrs = WindowAttributes::default()
            .with_title(cfg.title.clone())
            .with_decorations(false)
            .with_resizable(true)
            .with_visible(false)
            .with_inner_size(LogicalSize::new(cfg.width as f64, cfg.height as f64))
            .with_min_inner_size(LogicalSize::new(cfg.min_width as f64, cfg.min_height as f64));

        // File drops are handled by the engine.
        #[cfg(windows)]
        let attrs = {
            use winit::platform::windows::WindowAttributesExtWindows;
            attrs.with_drag_and_drop(false)
        };

        match event_loop.create_window(attrs) {
            Ok(w) => {
                self.window = Some(Arc::new(w));
                tracing::info!("host window created");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to create host window");
                false
            }
        }
    }

    fn engine_options(&self) -> EngineOptions {
        let daemon = &self.config.daemon;
        let engine = &self.config.engine;
        let user_data_dir = if engine.user_data_dir.trim().is_empty() {
            tt_platform::webview_data_dir().ok()
        } else {
            Some(PathBuf::from(engine.user_data_dir.trim()))
        };
        EngineOptions {
            init_scripts: vec![
                tt_bridge::BRIDGE_INIT_SCRIPT.to_string(),
                tt_bridge::native_info_script(&daemon.host, daemon.port, &daemon.token),
            ],
            user_data_dir,
            devtools: engine.devtools,
        }
    }

    /// Build the hosting session on first use and drive it to a terminal
    /// stage. Returns whether content is ready.
    pub(super) fn ensure_session(&mut self) -> bool {
        if let Some(session) = self.session.as_ref() {
            return session.is_ready();
        }
        let Some(window) = self.window.clone() else {
            return false;
        };

        let platform = DesktopPlatform::new(Arc::clone(&window), self.engine_options());
        let host_window = HostWindow::new(Box::new(DesktopWindow::new(window)));
        let options = SessionOptions {
            prefer_composition: self.config.engine.prefer_composition,
            entry_url: self.config.daemon.entry_url(),
        };

        let mut session = HostingSession::new(host_window, platform, options);
        let stage = session.start();
        self.pointer.forwarder.set_bounds(session.window().client_rect());

        if let Some(reason) = session.fallback_reason() {
            tracing::info!(reason = %reason, "running with direct hosting");
        }
        if !stage.is_ready() {
            let error = session
                .last_error()
                .unwrap_or("content hosting unavailable")
                .to_string();
            self.fatal_error = Some(error);
            self.should_exit = true;
        }
        self.session = Some(session);
        stage.is_ready()
    }
}
