mod app_state;
mod cli;
mod crash;
mod logging;

use std::error::Error;
use std::path::Path;

use tt_config::HostConfig;
use winit::event_loop::EventLoop;

use app_state::{TorrentHostApp, UserEvent};

fn load_config(args: &cli::Args) -> (HostConfig, Option<String>) {
    let loaded = match args.config.as_deref() {
        Some(path) => tt_config::load_config_from(Path::new(path)),
        None => tt_config::load_config(),
    };
    match loaded {
        Ok(config) => (config, None),
        Err(e) => (HostConfig::default(), Some(e.to_string())),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    crash::install_panic_hook();

    let args = cli::parse();

    // Logging depends on the config level, so load errors are reported
    // after the subscriber is up.
    let (mut config, config_error) = load_config(&args);
    args.apply_overrides(&mut config);
    logging::init(args.log_level.as_deref(), config.logging.level);

    tracing::info!("TinyTorrent host v{} starting", env!("CARGO_PKG_VERSION"));
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "config load failed, using defaults");
    }
    if let Some(ref path) = args.config {
        tracing::info!(path = %path, "using config override");
    }
    tracing::info!(
        host = %config.daemon.host,
        port = config.daemon.port,
        composition = config.engine.prefer_composition,
        "config loaded"
    );

    if let Err(e) = tt_platform::ensure_dirs() {
        tracing::warn!(error = %e, "failed to create data directories");
    }

    let event_loop = EventLoop::<UserEvent>::with_user_event().build()?;
    let mut app = TorrentHostApp::new(config, args.start_hidden, event_loop.create_proxy());

    tracing::info!("entering event loop");
    event_loop.run_app(&mut app)?;

    if let Some(error) = app.fatal_error() {
        tracing::error!(error = %error, "content hosting failed");
        return Err(error.into());
    }
    tracing::info!("shutdown complete");
    Ok(())
}
