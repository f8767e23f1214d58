use serde_json::Value;

use crate::dispatch::{HostServices, RequestResult, WindowCommand};

const WINDOW_COMMAND_FAILED: &str = "native host window command failed";

/// `window-command`: close, minimize, or toggle maximize.
pub fn handle_window_command<S: HostServices + ?Sized>(
    services: &mut S,
    payload: Option<&Value>,
) -> RequestResult {
    let command = payload
        .and_then(|p| p.get("command"))
        .and_then(Value::as_str)
        .and_then(WindowCommand::parse)
        .ok_or_else(|| WINDOW_COMMAND_FAILED.to_string())?;

    if services.window_command(command) {
        Ok(None)
    } else {
        Err(WINDOW_COMMAND_FAILED.to_string())
    }
}
