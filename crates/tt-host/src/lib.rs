//! Native content host: window, composition surface, embedded engine,
//! hit testing and input forwarding.

pub mod composition;
pub mod engine;
pub mod input;
pub mod platform;
pub mod session;
pub mod window;

pub use engine::{ContentEngine, EngineEvent, EngineHandle, EngineOptions, HostingMode};
pub use hit_test::{classify, resolve, FrameHit, HitZone, ResizeCursor};
pub use input::{ClickTracker, Forwarded, InputForwarder, Modifiers, MouseButton, PointerAction, PointerEvent};
pub use platform::DesktopPlatform;
pub use session::{HostPlatform, HostingSession, SessionOptions, Stage};
pub use window::{DesktopWindow, HostWindow, NativeWindow, Placement, ShowState};
