use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("path error: {0}")]
    PathError(String),

    #[error("disk query error: {0}")]
    DiskQueryError(String),

    #[error("shell open error: {0}")]
    ShellError(String),

    #[error("window manager error: {0}")]
    WindowManagerError(String),

    #[error("not supported: {0}")]
    NotSupported(String),
}

/// Host-level failures.
///
/// `Initialization` is recoverable (the session falls back to direct
/// hosting); `Fatal` means no content can be shown for this run.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("initialization failed at {step}: {reason}")]
    Initialization { step: &'static str, reason: String },

    #[error("fatal host failure: {0}")]
    Fatal(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("webview error: {0}")]
    WebView(String),

    #[error("{0}")]
    Other(String),
}

impl HostError {
    pub fn initialization(step: &'static str, reason: impl Into<String>) -> Self {
        Self::Initialization {
            step,
            reason: reason.into(),
        }
    }

    /// True when the error can be recovered by falling back to direct hosting.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Initialization { .. })
    }
}
