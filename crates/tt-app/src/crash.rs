//! Process panic hook.

use std::panic::PanicHookInfo;
use std::path::{Path, PathBuf};

/// Write a crash report for `info` unless the panic belongs to a bridge
/// handler, which the dispatcher recovers as a failed response.
fn report_panic(info: &PanicHookInfo, dir: Option<&Path>) -> Option<PathBuf> {
    if tt_bridge::handler_running() {
        return None;
    }
    tt_platform::crash_report::write_crash_report(info, dir)
}

pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if tt_bridge::handler_running() {
            tracing::warn!(panic = %info, "bridge handler panicked");
            return;
        }

        let path = report_panic(info, None);

        eprintln!("\n--- TinyTorrent host crashed ---");
        if let Some(p) = &path {
            eprintln!("Crash report written to: {}", p.display());
        }
        eprintln!("--------------------------------\n");

        default_hook(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use tt_bridge::{BridgeMessage, HostServices, MessageType, PlacementError, WindowCommand};
    use tt_common::PlatformError;
    use tt_platform::DiskSpace;

    struct PanickingPicker;

    impl HostServices for PanickingPicker {
        fn window_command(&mut self, _command: WindowCommand) -> bool {
            true
        }

        fn pick_torrent_file(&mut self) -> Option<PathBuf> {
            panic!("picker failed");
        }

        fn pick_folder(&mut self, _initial: Option<&Path>) -> Option<PathBuf> {
            None
        }

        fn disk_space(&mut self, _dir: &Path) -> Result<DiskSpace, PlatformError> {
            Err(PlatformError::NotSupported("disk".into()))
        }

        fn open_path(&mut self, _path: &Path) -> Result<(), PlatformError> {
            Ok(())
        }

        fn persist_window_state(&mut self) -> Result<(), PlacementError> {
            Ok(())
        }
    }

    fn report_count(dir: &Path) -> usize {
        std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
    }

    // One test owns the process-wide hook so nothing races on it.
    #[test]
    fn crash_reports_skip_recovered_handler_panics() {
        let dir = tempfile::tempdir().unwrap();
        let reports = dir.path().to_path_buf();
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = report_panic(info, Some(&reports));
        }));

        let request = BridgeMessage {
            kind: MessageType::Request,
            id: Some("r1".into()),
            name: Some("open-file-dialog".into()),
            success: None,
            payload: None,
            error: None,
        };
        let response = tt_bridge::dispatch(&mut PanickingPicker, &request);
        let after_handler = report_count(dir.path());

        let outside = std::panic::catch_unwind(|| panic!("host bug"));
        let after_crash = report_count(dir.path());

        std::panic::set_hook(previous);

        assert_eq!(response.success, Some(false));
        assert_eq!(response.id.as_deref(), Some("r1"));
        assert_eq!(after_handler, 0);
        assert!(outside.is_err());
        assert_eq!(after_crash, 1);
    }
}
