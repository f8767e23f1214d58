use std::path::PathBuf;

use serde_json::{json, Value};

use crate::dispatch::{HostServices, RequestResult};

fn path_payload(path: Option<PathBuf>) -> Option<Value> {
    path.map(|p| json!({ "path": p.to_string_lossy() }))
}

/// `open-file-dialog`: pick a `.torrent` file. Cancel is a success with no
/// payload.
pub fn handle_open_file_dialog<S: HostServices + ?Sized>(services: &mut S) -> RequestResult {
    Ok(path_payload(services.pick_torrent_file()))
}

/// `browse-directory`: pick a folder, starting at `payload.path` when given.
pub fn handle_browse_directory<S: HostServices + ?Sized>(
    services: &mut S,
    payload: Option<&Value>,
) -> RequestResult {
    let initial = payload
        .and_then(|p| p.get("path"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from);

    Ok(path_payload(services.pick_folder(initial.as_deref())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::tests::FakeHost;

    #[test]
    fn cancelled_pickers_succeed_without_payload() {
        let mut host = FakeHost::alive();
        assert_eq!(handle_open_file_dialog(&mut host), Ok(None));
        assert_eq!(handle_browse_directory(&mut host, None), Ok(None));
    }

    #[test]
    fn picked_file_is_returned_as_path() {
        let mut host = FakeHost {
            picked_file: Some(PathBuf::from("/downloads/linux.torrent")),
            ..FakeHost::alive()
        };
        assert_eq!(
            handle_open_file_dialog(&mut host),
            Ok(Some(json!({"path": "/downloads/linux.torrent"})))
        );
    }

    #[test]
    fn browse_passes_trimmed_initial_directory() {
        let mut host = FakeHost {
            picked_folder: Some(PathBuf::from("/media/disk")),
            ..FakeHost::alive()
        };
        let payload = json!({"path": "  /media  "});
        assert_eq!(
            handle_browse_directory(&mut host, Some(&payload)),
            Ok(Some(json!({"path": "/media/disk"})))
        );
        assert_eq!(host.folder_initial, Some(PathBuf::from("/media")));
    }

    #[test]
    fn browse_ignores_blank_initial_directory() {
        let mut host = FakeHost::alive();
        let payload = json!({"path": ""});
        handle_browse_directory(&mut host, Some(&payload)).unwrap();
        assert_eq!(host.folder_initial, None);
    }
}
