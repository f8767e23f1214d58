use std::path::PathBuf;

use tt_common::PlatformError;

pub(super) const APP_NAME: &str = "tiny-torrent";

/// Returns the platform-specific data directory.
///
/// - Windows: `%APPDATA%\tiny-torrent`
/// - Linux: `$XDG_DATA_HOME/tiny-torrent` (defaults to `~/.local/share/tiny-torrent`)
/// - macOS: `~/Library/Application Support/tiny-torrent`
pub fn data_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::data_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine data directory".into()))?
        .join(APP_NAME))
}

/// Returns the path to the log directory, `data_dir()/logs`.
pub fn log_dir() -> Result<PathBuf, PlatformError> {
    Ok(data_dir()?.join("logs"))
}

/// Returns the path to the crash report directory, `log_dir()/crash-reports`.
pub fn crash_report_dir() -> Result<PathBuf, PlatformError> {
    Ok(log_dir()?.join("crash-reports"))
}

/// Returns the content engine's profile directory, `data_dir()/WebView2`.
pub fn webview_data_dir() -> Result<PathBuf, PlatformError> {
    Ok(data_dir()?.join("WebView2"))
}
