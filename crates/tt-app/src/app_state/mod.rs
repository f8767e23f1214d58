//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Coordinates the hosting session, bridge traffic, the daemon
//! status poller, the attach handshake and the splash window.

mod core;
mod engine_events;
mod event_handler;
mod init;
mod input_bridge;
mod launch;
mod polling;
mod services;
mod shutdown;
mod splash;
mod types;
mod watchdog;

pub use core::TorrentHostApp;
pub use types::UserEvent;
