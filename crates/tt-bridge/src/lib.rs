//! Bridge protocol between the embedded content and the native host.
//!
//! Messages are JSON envelopes carried over the content engine's message
//! channel:
//! - **content -> host**: `request` envelopes, each answered by exactly one
//!   `response` with the same `id`.
//! - **host -> content**: `response` envelopes and unsolicited `event`s
//!   (the host never sends requests).

pub mod dispatch;
pub mod handlers;
pub mod message;
pub mod script;

pub use dispatch::{
    dispatch, handle_raw, handler_running, is_known_request, HostServices, PlacementError, RequestResult,
    WindowCommand, KNOWN_REQUESTS,
};
pub use message::{BridgeMessage, DecodeError, MessageType};
pub use script::{auth_token_event, deliver_script, native_info_script, BRIDGE_INIT_SCRIPT};
