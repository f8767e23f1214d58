use std::fs;

use tt_common::PlatformError;

use super::resolve::{crash_report_dir, data_dir, log_dir, webview_data_dir};

/// Creates all host directories if they do not already exist.
pub fn ensure_dirs() -> Result<(), PlatformError> {
    for dir in [data_dir()?, log_dir()?, crash_report_dir()?, webview_data_dir()?] {
        fs::create_dir_all(&dir).map_err(|e| PlatformError::PathError(e.to_string()))?;
    }
    Ok(())
}
