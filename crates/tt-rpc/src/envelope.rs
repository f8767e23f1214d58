//! `{method, arguments?}` request and `{result, arguments?}` response
//! envelopes.

use serde_json::{json, Value};

/// Encode a request envelope. `arguments` is omitted when `None`.
pub fn request_body(method: &str, arguments: Option<Value>) -> String {
    let mut body = json!({ "method": method });
    if let Some(args) = arguments {
        body["arguments"] = args;
    }
    body.to_string()
}

/// A response is successful iff its top-level object has `result` equal to
/// exactly `"success"`.
pub fn response_success(body: &str) -> bool {
    if body.is_empty() {
        return false;
    }
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("result").and_then(Value::as_str).map(|r| r == "success"))
        .unwrap_or(false)
}

/// The `arguments` object of a response, if any.
pub fn response_arguments(body: &str) -> Option<Value> {
    let mut value: Value = serde_json::from_str(body).ok()?;
    let args = value.get_mut("arguments")?.take();
    args.is_object().then_some(args)
}
