//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;
use tt_config::schema::LogLevel;

/// Pick the filter directive: command line, then `RUST_LOG`, then config.
pub fn filter_directive(cli: Option<&str>, env: Option<&str>, config: LogLevel) -> String {
    cli.or(env)
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| config.as_directive().to_string())
}

pub fn init(cli: Option<&str>, config: LogLevel) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = filter_directive(cli, env.as_deref(), config);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|e| {
        eprintln!("invalid log filter {directive:?}: {e}");
        EnvFilter::new(config.as_directive())
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_wins() {
        assert_eq!(
            filter_directive(Some("debug"), Some("warn"), LogLevel::Error),
            "debug"
        );
    }

    #[test]
    fn env_beats_config() {
        assert_eq!(
            filter_directive(None, Some("tt_rpc=trace"), LogLevel::Info),
            "tt_rpc=trace"
        );
    }

    #[test]
    fn falls_back_to_config_level() {
        assert_eq!(filter_directive(None, None, LogLevel::Warn), "warn");
        assert_eq!(filter_directive(Some(" "), None, LogLevel::Info), "info");
    }
}
