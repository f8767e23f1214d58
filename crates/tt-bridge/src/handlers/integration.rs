use serde_json::json;

use crate::dispatch::RequestResult;

/// `get-system-integration-status` / `set-system-integration`.
///
/// Autorun and file associations are not managed by this host, so both
/// requests report them as off.
pub fn handle_system_integration() -> RequestResult {
    Ok(Some(json!({
        "autorun": false,
        "associations": false,
    })))
}
