//! Graceful shutdown: stop the poller, tear down hosting, close the splash.

use super::core::TorrentHostApp;

impl TorrentHostApp {
    /// Release every subsystem. Safe to call more than once.
    ///
    /// The poller goes first so no snapshot arrives for a closed session.
    pub(super) fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        tracing::info!("initiating graceful shutdown");

        if let Some(mut poller) = self.poller.take() {
            poller.stop();
        }
        if let Some(session) = self.session.as_mut() {
            session.shutdown();
        }
        self.close_splash();

        tracing::info!("graceful shutdown complete");
    }
}
