//! Handlers for each bridge request name.
//!
//! Every handler returns a [`RequestResult`](crate::RequestResult); the
//! dispatcher turns it into the single response for the request.

pub mod dialogs;
pub mod free_space;
pub mod integration;
pub mod open_path;
pub mod placement;
pub mod window;

use serde_json::Value;

/// Why a `payload.path` string could not be extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PathFieldError {
    MissingPayload,
    MissingPath,
    EmptyPath,
}

/// Extract and trim `payload.path`.
pub(crate) fn path_field(payload: Option<&Value>) -> Result<String, PathFieldError> {
    let payload = payload
        .filter(|p| p.is_object())
        .ok_or(PathFieldError::MissingPayload)?;
    let raw = payload
        .get("path")
        .and_then(Value::as_str)
        .ok_or(PathFieldError::MissingPath)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PathFieldError::EmptyPath);
    }
    Ok(trimmed.to_string())
}

/// Build the error string for a path-field failure, prefixed by the
/// request's error family (`"native host free-space"`, ...).
pub(crate) fn path_field_error(prefix: &str, err: PathFieldError) -> String {
    match err {
        PathFieldError::MissingPayload => format!("{prefix} request missing payload"),
        PathFieldError::MissingPath => format!("{prefix} request missing path"),
        PathFieldError::EmptyPath => format!("{prefix} request empty path"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn path_field_trims() {
        let payload = json!({"path": "  /srv/media \t"});
        assert_eq!(path_field(Some(&payload)).unwrap(), "/srv/media");
    }

    #[test]
    fn path_field_errors() {
        assert_eq!(path_field(None), Err(PathFieldError::MissingPayload));
        assert_eq!(
            path_field(Some(&json!("just a string"))),
            Err(PathFieldError::MissingPayload)
        );
        assert_eq!(
            path_field(Some(&json!({"dir": "/x"}))),
            Err(PathFieldError::MissingPath)
        );
        assert_eq!(
            path_field(Some(&json!({"path": 5}))),
            Err(PathFieldError::MissingPath)
        );
        assert_eq!(
            path_field(Some(&json!({"path": "   "}))),
            Err(PathFieldError::EmptyPath)
        );
    }

    #[test]
    fn path_field_error_messages() {
        assert_eq!(
            path_field_error("native host open-path", PathFieldError::EmptyPath),
            "native host open-path request empty path"
        );
    }
}
