use std::path::Path;

use serde_json::{json, Value};
use tt_platform::resolve_existing_directory;

use super::{path_field, path_field_error};
use crate::dispatch::{HostServices, RequestResult};

const PREFIX: &str = "native host free-space";

/// `check-free-space`: report free and total bytes for the volume holding
/// `payload.path`, or its nearest existing ancestor. The echoed `path` is
/// the directory that was actually queried.
pub fn handle_check_free_space<S: HostServices + ?Sized>(
    services: &mut S,
    payload: Option<&Value>,
) -> RequestResult {
    let path = path_field(payload).map_err(|e| path_field_error(PREFIX, e))?;

    let dir = resolve_existing_directory(Path::new(&path))
        .ok_or_else(|| format!("{PREFIX} path unavailable"))?;

    let space = services.disk_space(&dir).map_err(|e| {
        tracing::warn!(path = %dir.display(), error = %e, "free-space query failed");
        format!("{PREFIX} query failed")
    })?;

    Ok(Some(json!({
        "path": dir.display().to_string(),
        "sizeBytes": space.free_bytes,
        "totalSize": space.total_bytes,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::tests::FakeHost;
    use tt_platform::DiskSpace;

    fn host_with_space() -> FakeHost {
        FakeHost {
            space: Some(DiskSpace {
                free_bytes: 1_000,
                total_bytes: 4_000,
            }),
            ..FakeHost::alive()
        }
    }

    #[test]
    fn reports_space_for_missing_leaf_via_ancestor() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("not").join("yet").join("created");
        let mut host = host_with_space();
        let payload = json!({"path": format!("  {}  ", target.display())});

        let result = handle_check_free_space(&mut host, Some(&payload)).unwrap();
        assert_eq!(
            result,
            Some(json!({
                "path": dir.path().display().to_string(),
                "sizeBytes": 1_000,
                "totalSize": 4_000,
            }))
        );
        assert_eq!(host.disk_queries, vec![dir.path().to_path_buf()]);
    }

    #[test]
    fn queries_parent_of_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("partial.bin");
        std::fs::write(&file, b"abc").unwrap();
        let mut host = host_with_space();
        let payload = json!({"path": file.display().to_string()});

        let result = handle_check_free_space(&mut host, Some(&payload)).unwrap();
        assert_eq!(host.disk_queries, vec![dir.path().to_path_buf()]);
        assert_eq!(
            result.and_then(|v| v["path"].as_str().map(str::to_string)),
            Some(dir.path().display().to_string())
        );
    }

    #[test]
    fn payload_errors() {
        let mut host = host_with_space();
        assert_eq!(
            handle_check_free_space(&mut host, None),
            Err("native host free-space request missing payload".into())
        );
        assert_eq!(
            handle_check_free_space(&mut host, Some(&json!({}))),
            Err("native host free-space request missing path".into())
        );
        assert_eq!(
            handle_check_free_space(&mut host, Some(&json!({"path": " "}))),
            Err("native host free-space request empty path".into())
        );
        assert!(host.disk_queries.is_empty());
    }

    #[test]
    fn unresolvable_path_is_unavailable() {
        let mut host = host_with_space();
        let payload = json!({"path": "tt_missing_root_q7/a/b"});
        assert_eq!(
            handle_check_free_space(&mut host, Some(&payload)),
            Err("native host free-space path unavailable".into())
        );
    }

    #[test]
    fn query_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = FakeHost::alive();
        let payload = json!({"path": dir.path().display().to_string()});
        assert_eq!(
            handle_check_free_space(&mut host, Some(&payload)),
            Err("native host free-space query failed".into())
        );
    }
}
