use clap::Parser;
use tt_config::HostConfig;

/// TinyTorrent native host: embeds the web UI and bridges it to the OS and
/// the torrent daemon.
#[derive(Parser, Debug, Default)]
#[command(name = "tiny-torrent", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Daemon host override.
    #[arg(long)]
    pub host: Option<String>,

    /// Daemon RPC port override.
    #[arg(long)]
    pub port: Option<u16>,

    /// Daemon auth token override.
    #[arg(long)]
    pub token: Option<String>,

    /// Do not open the UI automatically once the daemon is ready.
    #[arg(long)]
    pub start_hidden: bool,
}

impl Args {
    /// Apply daemon overrides on top of the loaded config.
    pub fn apply_overrides(&self, config: &mut HostConfig) {
        if let Some(host) = self.host.as_deref().map(str::trim).filter(|h| !h.is_empty()) {
            config.daemon.host = host.to_string();
        }
        if let Some(port) = self.port {
            config.daemon.port = port;
        }
        if let Some(ref token) = self.token {
            config.daemon.token = token.clone();
        }
        if self.start_hidden {
            config.startup.show_splash = false;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_daemon_overrides() {
        let args = Args::try_parse_from([
            "tiny-torrent",
            "--host",
            "10.0.0.2",
            "--port",
            "9091",
            "--token",
            "abc",
            "--start-hidden",
        ])
        .unwrap();
        assert_eq!(args.host.as_deref(), Some("10.0.0.2"));
        assert_eq!(args.port, Some(9091));
        assert_eq!(args.token.as_deref(), Some("abc"));
        assert!(args.start_hidden);
    }

    #[test]
    fn rejects_out_of_range_port() {
        assert!(Args::try_parse_from(["tiny-torrent", "--port", "70000"]).is_err());
    }

    #[test]
    fn overrides_replace_only_given_fields() {
        let args = Args {
            port: Some(9091),
            ..Default::default()
        };
        let mut config = HostConfig::default();
        config.daemon.token = "from-file".into();
        args.apply_overrides(&mut config);
        assert_eq!(config.daemon.port, 9091);
        assert_eq!(config.daemon.host, "127.0.0.1");
        assert_eq!(config.daemon.token, "from-file");
        assert!(config.startup.show_splash);
    }

    #[test]
    fn blank_host_override_is_ignored() {
        let args = Args {
            host: Some("  ".into()),
            ..Default::default()
        };
        let mut config = HostConfig::default();
        args.apply_overrides(&mut config);
        assert_eq!(config.daemon.host, "127.0.0.1");
    }

    #[test]
    fn start_hidden_suppresses_splash() {
        let args = Args {
            start_hidden: true,
            ..Default::default()
        };
        let mut config = HostConfig::default();
        args.apply_overrides(&mut config);
        assert!(!config.startup.show_splash);
    }
}
