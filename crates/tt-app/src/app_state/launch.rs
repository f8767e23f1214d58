//! Status handling, focus-or-launch and the close path.

use std::sync::atomic::Ordering;
use std::time::Instant;

use tt_rpc::TrayStatus;

use super::core::TorrentHostApp;
use super::watchdog::Settled;

impl TorrentHostApp {
    /// Take one poller snapshot on the UI thread.
    pub(super) fn handle_status(&mut self, status: Option<TrayStatus>) {
        self.status_pending.store(false, Ordering::Release);
        if self.shut_down {
            return;
        }

        match status.as_ref() {
            Some(s) => {
                if !s.error_message.is_empty() {
                    tracing::debug!(error = %s.error_message, "daemon reported an error");
                }
            }
            None => tracing::trace!("daemon status unavailable"),
        }

        let settled = self.handshake.observe(status.as_ref(), Instant::now());
        if status.is_some() {
            self.last_status = status;
            self.refresh_splash_message();
        }
        if let Some(settled) = settled {
            self.handshake_settled(settled);
        }
    }

    /// Fire the watchdog when no poll result arrives before the deadline.
    pub(super) fn poll_handshake_deadline(&mut self, now: Instant) {
        if let Some(settled) = self.handshake.tick(now) {
            self.handshake_settled(settled);
        }
    }

    fn handshake_settled(&mut self, settled: Settled) {
        if settled.timed_out {
            tracing::warn!("attach handshake timed out, continuing startup");
        } else {
            tracing::info!("daemon reported UI attached");
        }
        self.close_splash();
        if settled.open_ui {
            self.focus_or_launch();
        }
    }

    /// Focus the native window if it is up; otherwise hand focus to a UI the
    /// daemon already has attached; otherwise bring up the native window.
    pub(super) fn focus_or_launch(&mut self) {
        if self.shut_down {
            return;
        }
        if let Some(session) = self.session.as_mut() {
            if session.is_ready() && session.window().is_visible() {
                session.window_mut().present();
                self.handshake.set_user_closed_ui(false);
                return;
            }
        }

        if self.handshake.ui_attached() {
            if tt_rpc::request_ui_focus(&*self.rpc) {
                tracing::info!("focused daemon-attached UI");
                self.handshake.set_user_closed_ui(false);
                return;
            }
            self.handshake.set_detached();
        }

        self.show_native_window();
    }

    fn show_native_window(&mut self) {
        self.handshake.set_user_closed_ui(false);
        if !self.ensure_session() {
            return;
        }
        if let Some(session) = self.session.as_mut() {
            let window = session.window_mut();
            window.apply_placement();
            window.present();
        }
        self.close_splash();
    }

    /// Close requested by the user, from the OS or the content.
    pub(super) fn close_ui(&mut self) {
        tracing::info!("UI close requested");
        self.handshake.set_user_closed_ui(true);
        self.handshake.set_detached();
        if !tt_rpc::detach_ui(&*self.rpc) {
            tracing::debug!("daemon did not acknowledge detach");
        }

        if self.config.window.close_to_tray {
            if let Some(session) = self.session.as_mut() {
                session.window_mut().hide();
            }
        } else {
            self.shutdown();
            self.should_exit = true;
        }
    }
}
