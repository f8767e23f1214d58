use std::path::Path;

use serde_json::Value;

use super::{path_field, path_field_error};
use crate::dispatch::{HostServices, RequestResult};

const PREFIX: &str = "native host open-path";

/// `open-path`: hand a file or folder to the OS shell.
pub fn handle_open_path<S: HostServices + ?Sized>(
    services: &mut S,
    payload: Option<&Value>,
) -> RequestResult {
    let path = path_field(payload).map_err(|e| path_field_error(PREFIX, e))?;

    services.open_path(Path::new(&path)).map_err(|e| {
        tracing::warn!(path = %path, error = %e, "open-path failed");
        format!("{PREFIX} failed")
    })?;

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::tests::FakeHost;
    use serde_json::json;
    use std::path::PathBuf;

    #[test]
    fn opens_trimmed_path() {
        let mut host = FakeHost::alive();
        let payload = json!({"path": " /srv/torrents/done "});
        assert_eq!(handle_open_path(&mut host, Some(&payload)), Ok(None));
        assert_eq!(host.opened, vec![PathBuf::from("/srv/torrents/done")]);
    }

    #[test]
    fn shell_failure() {
        let mut host = FakeHost {
            open_fails: true,
            ..FakeHost::alive()
        };
        let payload = json!({"path": "/nowhere"});
        assert_eq!(
            handle_open_path(&mut host, Some(&payload)),
            Err("native host open-path failed".into())
        );
    }

    #[test]
    fn payload_errors() {
        let mut host = FakeHost::alive();
        assert_eq!(
            handle_open_path(&mut host, None),
            Err("native host open-path request missing payload".into())
        );
        assert_eq!(
            handle_open_path(&mut host, Some(&json!({"file": "x"}))),
            Err("native host open-path request missing path".into())
        );
        assert_eq!(
            handle_open_path(&mut host, Some(&json!({"path": ""}))),
            Err("native host open-path request empty path".into())
        );
        assert!(host.opened.is_empty());
    }
}
