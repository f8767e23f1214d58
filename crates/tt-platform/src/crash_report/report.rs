use std::backtrace::Backtrace;
use std::panic::PanicHookInfo;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::paths::crash_report_dir;

use super::sanitize::sanitize_secrets;

#[derive(Debug, Serialize)]
pub struct PanicLocation {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

/// One panic, already redacted.
#[derive(Debug, Serialize)]
pub struct CrashReport {
    pub timestamp: String,
    pub version: &'static str,
    pub os: &'static str,
    pub arch: &'static str,
    pub thread: String,
    pub message: String,
    pub location: Option<PanicLocation>,
    pub backtrace: String,
}

impl CrashReport {
    /// Build a report from raw parts, redacting the message and backtrace.
    pub fn new(message: &str, location: Option<PanicLocation>, backtrace: &str) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION"),
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
            thread: std::thread::current()
                .name()
                .unwrap_or("<unnamed>")
                .to_string(),
            message: sanitize_secrets(message),
            location,
            backtrace: sanitize_secrets(backtrace),
        }
    }

    pub fn from_panic(info: &PanicHookInfo) -> Self {
        let payload = info.payload();
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic payload".to_string());

        let location = info.location().map(|loc| PanicLocation {
            file: loc.file().to_string(),
            line: loc.line(),
            column: loc.column(),
        });

        Self::new(&message, location, &Backtrace::force_capture().to_string())
    }

    /// Write the report as `crash_<stamp>.json` under `dir`.
    pub fn write_to(&self, dir: &Path) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let stamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
        let path = dir.join(format!("crash_{stamp}.json"));
        let body = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(&path, body)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(path)
    }
}

/// Panic-hook entry point. Every failure is swallowed; returns the report
/// path when one was written. `None` for `dir` means the default crash
/// directory.
pub fn write_crash_report(info: &PanicHookInfo, dir: Option<&Path>) -> Option<PathBuf> {
    let dir = match dir {
        Some(dir) => dir.to_path_buf(),
        None => crash_report_dir().ok()?,
    };
    CrashReport::from_panic(info).write_to(&dir).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_is_redacted_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let report = CrashReport::new(
            "rpc failed for http://127.0.0.1:9000/index.html?token=s3cret",
            Some(PanicLocation {
                file: "src/main.rs".into(),
                line: 10,
                column: 5,
            }),
            "X-TT-Auth: s3cret\n   0: main",
        );
        let path = report.write_to(dir.path()).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("s3cret"), "{written}");
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["location"]["line"], 10);
        assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
        assert!(path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("crash_") && n.ends_with(".json")));
    }

    #[cfg(unix)]
    #[test]
    fn report_file_is_private() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let path = CrashReport::new("boom", None, "").write_to(dir.path()).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
