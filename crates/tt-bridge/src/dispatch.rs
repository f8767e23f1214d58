//! Request validation and dispatch from the content engine to host handlers.

use std::cell::Cell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tt_common::PlatformError;
use tt_platform::DiskSpace;

use crate::handlers;
use crate::message::BridgeMessage;

// =============================================================================
// HOST SERVICES
// =============================================================================

/// Commands accepted by `window-command`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowCommand {
    Close,
    Minimize,
    /// Toggles between maximized and restored.
    Maximize,
}

impl WindowCommand {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "close" => Some(Self::Close),
            "minimize" => Some(Self::Minimize),
            "maximize" => Some(Self::Maximize),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    WindowUnavailable,
    CaptureFailed,
}

/// Native operations the bridge may invoke on behalf of the content.
///
/// Implemented by the application over the live window; tests use fakes.
pub trait HostServices {
    /// Returns `false` when the window is gone or shutting down.
    fn window_command(&mut self, command: WindowCommand) -> bool;

    fn pick_torrent_file(&mut self) -> Option<PathBuf>;

    fn pick_folder(&mut self, initial: Option<&Path>) -> Option<PathBuf>;

    fn disk_space(&mut self, dir: &Path) -> Result<DiskSpace, PlatformError>;

    fn open_path(&mut self, path: &Path) -> Result<(), PlatformError>;

    /// Capture the window placement so it is reapplied on the next show.
    fn persist_window_state(&mut self) -> Result<(), PlacementError>;
}

/// Outcome of a single handler: a success payload (possibly absent) or
/// the error string returned to the content.
pub type RequestResult = Result<Option<Value>, String>;

// =============================================================================
// REQUEST TABLE
// =============================================================================

/// Every request name the host answers with a real handler.
pub const KNOWN_REQUESTS: &[&str] = &[
    "window-command",
    "open-file-dialog",
    "browse-directory",
    "check-free-space",
    "open-path",
    "get-system-integration-status",
    "set-system-integration",
    "persist-window-state",
];

pub const UNHANDLED_REQUEST: &str = "unhandled request";

const HANDLER_PANICKED: &str = "native host internal error";

thread_local! {
    static HANDLER_RUNNING: Cell<bool> = const { Cell::new(false) };
}

/// Whether a bridge handler is executing on this thread.
///
/// A panic seen while this is `true` is caught by [`dispatch`] and answered
/// as a failed response, so panic hooks should not treat it as a crash.
pub fn handler_running() -> bool {
    HANDLER_RUNNING.with(Cell::get)
}

/// Marks the current thread as running a handler until dropped, including
/// when the handler unwinds.
struct HandlerScope {
    previous: bool,
}

impl HandlerScope {
    fn enter() -> Self {
        Self {
            previous: HANDLER_RUNNING.with(|flag| flag.replace(true)),
        }
    }
}

impl Drop for HandlerScope {
    fn drop(&mut self) {
        let previous = self.previous;
        HANDLER_RUNNING.with(|flag| flag.set(previous));
    }
}

/// Check whether a request name has a handler.
pub fn is_known_request(name: &str) -> bool {
    KNOWN_REQUESTS.contains(&name)
}

fn run_handler<S: HostServices + ?Sized>(
    services: &mut S,
    name: &str,
    payload: Option<&Value>,
) -> RequestResult {
    match name {
        "window-command" => handlers::window::handle_window_command(services, payload),
        "open-file-dialog" => handlers::dialogs::handle_open_file_dialog(services),
        "browse-directory" => handlers::dialogs::handle_browse_directory(services, payload),
        "check-free-space" => handlers::free_space::handle_check_free_space(services, payload),
        "open-path" => handlers::open_path::handle_open_path(services, payload),
        "get-system-integration-status" | "set-system-integration" => {
            handlers::integration::handle_system_integration()
        }
        "persist-window-state" => handlers::placement::handle_persist_window_state(services),
        _ => Err(UNHANDLED_REQUEST.to_string()),
    }
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Answer one request. Always returns exactly one response carrying the
/// request's `id`, including for unknown names and panicking handlers.
pub fn dispatch<S: HostServices + ?Sized>(services: &mut S, request: &BridgeMessage) -> BridgeMessage {
    let id = request.id.clone().unwrap_or_default();
    let name = request.name.as_deref().unwrap_or_default();

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        let _scope = HandlerScope::enter();
        run_handler(services, name, request.payload.as_ref())
    }))
    .unwrap_or_else(|_| {
        tracing::error!(request = %name, id = %id, "bridge handler panicked");
        Err(HANDLER_PANICKED.to_string())
    });

    match outcome {
        Ok(payload) => {
            tracing::debug!(request = %name, id = %id, "bridge request succeeded");
            BridgeMessage::response_ok(id, payload)
        }
        Err(error) => {
            tracing::debug!(request = %name, id = %id, error = %error, "bridge request failed");
            BridgeMessage::response_err(id, error)
        }
    }
}

/// Decode a raw channel message and answer it.
///
/// Returns the encoded response, or `None` when the message is malformed
/// or is not a request. Malformed input is channel noise and is never
/// answered.
pub fn handle_raw<S: HostServices + ?Sized>(services: &mut S, raw: &str) -> Option<String> {
    let message = match BridgeMessage::decode(raw) {
        Ok(m) => m,
        Err(e) => {
            tracing::debug!(body_len = raw.len(), error = %e, "bridge message dropped");
            return None;
        }
    };

    if !message.is_request() {
        tracing::debug!(kind = ?message.kind, "ignoring non-request bridge message");
        return None;
    }

    Some(dispatch(services, &message).to_json())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    /// Scripted host used by dispatcher and handler tests.
    #[derive(Default)]
    pub(crate) struct FakeHost {
        pub window_alive: bool,
        pub commands: Vec<WindowCommand>,
        pub picked_file: Option<PathBuf>,
        pub picked_folder: Option<PathBuf>,
        pub folder_initial: Option<PathBuf>,
        pub space: Option<DiskSpace>,
        pub disk_queries: Vec<PathBuf>,
        pub opened: Vec<PathBuf>,
        pub open_fails: bool,
        pub placement: Option<Result<(), PlacementError>>,
        pub panic_on_pick: bool,
        pub running_during_pick: Option<bool>,
    }

    impl FakeHost {
        pub(crate) fn alive() -> Self {
            Self {
                window_alive: true,
                ..Default::default()
            }
        }
    }

    impl HostServices for FakeHost {
        fn window_command(&mut self, command: WindowCommand) -> bool {
            self.commands.push(command);
            self.window_alive
        }

        fn pick_torrent_file(&mut self) -> Option<PathBuf> {
            self.running_during_pick = Some(handler_running());
            if self.panic_on_pick {
                panic!("dialog exploded");
            }
            self.picked_file.clone()
        }

        fn pick_folder(&mut self, initial: Option<&Path>) -> Option<PathBuf> {
            self.folder_initial = initial.map(Path::to_path_buf);
            self.picked_folder.clone()
        }

        fn disk_space(&mut self, dir: &Path) -> Result<DiskSpace, PlatformError> {
            self.disk_queries.push(dir.to_path_buf());
            self.space
                .ok_or_else(|| PlatformError::DiskQueryError("no volume".into()))
        }

        fn open_path(&mut self, path: &Path) -> Result<(), PlatformError> {
            self.opened.push(path.to_path_buf());
            if self.open_fails {
                Err(PlatformError::ShellError("no handler".into()))
            } else {
                Ok(())
            }
        }

        fn persist_window_state(&mut self) -> Result<(), PlacementError> {
            self.placement
                .clone()
                .unwrap_or(Err(PlacementError::WindowUnavailable))
        }
    }

    fn request(id: &str, name: &str, payload: Option<Value>) -> BridgeMessage {
        BridgeMessage {
            kind: crate::MessageType::Request,
            id: Some(id.into()),
            name: Some(name.into()),
            success: None,
            payload,
            error: None,
        }
    }

    #[test]
    fn unknown_request_is_unhandled() {
        let mut host = FakeHost::alive();
        let response = dispatch(&mut host, &request("u1", "format-disk", None));
        assert_eq!(response.id.as_deref(), Some("u1"));
        assert_eq!(response.success, Some(false));
        assert_eq!(response.error.as_deref(), Some("unhandled request"));
    }

    #[test]
    fn every_request_gets_exactly_one_response_with_its_id() {
        let mut names: Vec<&str> = KNOWN_REQUESTS.to_vec();
        names.extend(["", "WINDOW-COMMAND", "eval", "window-command\0"]);
        for (i, name) in names.iter().enumerate() {
            let mut host = FakeHost::alive();
            let id = format!("req-{i}");
            let raw = json!({"type": "request", "id": id, "name": name, "payload": {}}).to_string();
            let out = handle_raw(&mut host, &raw).expect("request must be answered");
            let response = BridgeMessage::decode(&out).unwrap();
            assert_eq!(response.kind, crate::MessageType::Response);
            assert_eq!(response.id.as_deref(), Some(id.as_str()), "name {name:?}");
            assert!(response.success.is_some());
        }
    }

    #[test]
    fn malformed_messages_are_dropped() {
        let mut host = FakeHost::alive();
        for raw in [
            "",
            "null",
            "[]",
            r#"{"type":"request","name":"open-path"}"#,
            r#"{"type":"request","id":"1"}"#,
            r#"{"id":"1","name":"open-path"}"#,
        ] {
            assert_eq!(handle_raw(&mut host, raw), None, "raw {raw:?}");
        }
        assert!(host.opened.is_empty());
    }

    #[test]
    fn events_and_responses_from_content_are_ignored() {
        let mut host = FakeHost::alive();
        assert_eq!(
            handle_raw(&mut host, r#"{"type":"event","name":"ready","payload":{}}"#),
            None
        );
        assert_eq!(
            handle_raw(&mut host, r#"{"type":"response","id":"1","success":true}"#),
            None
        );
    }

    #[test]
    fn panicking_handler_still_answers() {
        let mut host = FakeHost {
            panic_on_pick: true,
            ..FakeHost::alive()
        };
        let response = dispatch(&mut host, &request("p1", "open-file-dialog", None));
        assert_eq!(response.id.as_deref(), Some("p1"));
        assert_eq!(response.success, Some(false));
        assert_eq!(response.error.as_deref(), Some("native host internal error"));
        assert_eq!(host.running_during_pick, Some(true));
        assert!(!handler_running());
    }

    #[test]
    fn handler_flag_is_only_set_inside_handlers() {
        assert!(!handler_running());
        let mut host = FakeHost::alive();
        let response = dispatch(&mut host, &request("f1", "open-file-dialog", None));
        assert_eq!(response.success, Some(true));
        assert_eq!(host.running_during_pick, Some(true));
        assert!(!handler_running());
    }

    #[test]
    fn window_command_parses_known_commands() {
        assert_eq!(WindowCommand::parse("close"), Some(WindowCommand::Close));
        assert_eq!(WindowCommand::parse("minimize"), Some(WindowCommand::Minimize));
        assert_eq!(WindowCommand::parse("maximize"), Some(WindowCommand::Maximize));
        assert_eq!(WindowCommand::parse("Maximize"), None);
        assert_eq!(WindowCommand::parse(""), None);
    }

    #[test]
    fn known_request_table() {
        assert_eq!(KNOWN_REQUESTS.len(), 8);
        assert!(is_known_request("check-free-space"));
        assert!(!is_known_request("check-free-space "));
    }
}
