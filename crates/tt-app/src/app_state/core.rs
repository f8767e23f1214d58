//! TorrentHostApp struct definition and constructor.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Instant;

use tt_config::HostConfig;
use tt_host::{DesktopPlatform, HostingSession};
use tt_rpc::{RpcConnection, TrayStatus};
use winit::event_loop::EventLoopProxy;
use winit::window::Window;

use super::input_bridge::PointerState;
use super::polling::StatusPoller;
use super::splash::Splash;
use super::types::UserEvent;
use super::watchdog::Handshake;

/// Top-level application state.
pub struct TorrentHostApp {
    pub(super) config: HostConfig,
    pub(super) proxy: EventLoopProxy<UserEvent>,

    // Windowing
    pub(super) window: Option<Arc<Window>>,
    pub(super) session: Option<HostingSession<DesktopPlatform>>,
    pub(super) pointer: PointerState,
    pub(super) splash: Option<Splash>,

    // Daemon
    pub(super) rpc: Arc<RpcConnection>,
    pub(super) poller: Option<StatusPoller>,
    /// Set while a status snapshot is queued on the event loop.
    pub(super) status_pending: Arc<AtomicBool>,
    pub(super) last_status: Option<TrayStatus>,
    pub(super) handshake: Handshake,

    pub(super) fatal_error: Option<String>,
    pub(super) should_exit: bool,
    pub(super) shut_down: bool,
}

impl TorrentHostApp {
    pub fn new(config: HostConfig, start_hidden: bool, proxy: EventLoopProxy<UserEvent>) -> Self {
        let rpc = Arc::new(RpcConnection::new(&config.daemon));
        let handshake = Handshake::new(
            Instant::now(),
            config.startup.handshake_timeout(),
            config.startup.auto_open,
            start_hidden,
        );
        Self {
            config,
            proxy,
            window: None,
            session: None,
            pointer: PointerState::default(),
            splash: None,
            rpc,
            poller: None,
            status_pending: Arc::new(AtomicBool::new(false)),
            last_status: None,
            handshake,
            fatal_error: None,
            should_exit: false,
            shut_down: false,
        }
    }

    /// The error that ended the run, if content hosting failed.
    pub fn fatal_error(&self) -> Option<&str> {
        self.fatal_error.as_deref()
    }
}
