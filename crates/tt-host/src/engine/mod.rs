//! Embedded web content engine in one of two hosting modes.

pub mod direct;

#[cfg(windows)]
pub mod composed;

use std::path::PathBuf;

use serde::Serialize;
use tt_common::{Dpi, HostError, PixelPoint, PixelRect};

use crate::input::EngineInput;

// =============================================================================
// TYPES
// =============================================================================

/// How content reaches the screen. Chosen once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HostingMode {
    /// Rendered into a composition visual; the host forwards input.
    Composed,
    /// Rendered into its own child window.
    Direct,
}

/// Events raised by an engine, queued and drained by the host loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// A raw message from the content channel.
    Message(String),
    NavigationCompleted { success: bool },
    /// Files dropped onto the content.
    FilesDropped(Vec<PathBuf>),
}

/// Startup settings shared by both engines.
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    /// Scripts run before any page script, in order.
    pub init_scripts: Vec<String>,
    /// Profile directory. Empty means the engine default.
    pub user_data_dir: Option<PathBuf>,
    pub devtools: bool,
}

/// Operations the host performs on a running engine.
pub trait EngineHandle {
    fn navigate(&mut self, url: &str) -> Result<(), HostError>;

    /// Send an encoded bridge envelope to the content.
    fn post_message(&mut self, json: &str) -> Result<(), HostError>;

    /// Bounds are physical pixels; `dpi` lets logical-unit engines convert.
    fn set_bounds(&mut self, bounds: PixelRect, dpi: Dpi) -> Result<(), HostError>;

    fn set_visible(&mut self, visible: bool) -> Result<(), HostError>;

    /// Deliver synthetic pointer input. Engines that receive native input
    /// ignore this.
    fn send_input(&mut self, input: &EngineInput) -> Result<(), HostError>;

    /// Whether the content marks `point` (bounds-relative) as a caption
    /// drag region.
    fn caption_at(&self, point: PixelPoint) -> bool;

    /// Take all queued events.
    fn drain_events(&mut self) -> Vec<EngineEvent>;
}

// =============================================================================
// CONTENT ENGINE
// =============================================================================

/// The active engine, tagged with its hosting mode.
pub enum ContentEngine<C, D> {
    Composed(C),
    Direct(D),
}

impl<C: EngineHandle, D: EngineHandle> ContentEngine<C, D> {
    pub fn mode(&self) -> HostingMode {
        match self {
            Self::Composed(_) => HostingMode::Composed,
            Self::Direct(_) => HostingMode::Direct,
        }
    }

    fn handle(&self) -> &dyn EngineHandle {
        match self {
            Self::Composed(c) => c,
            Self::Direct(d) => d,
        }
    }

    fn handle_mut(&mut self) -> &mut dyn EngineHandle {
        match self {
            Self::Composed(c) => c,
            Self::Direct(d) => d,
        }
    }
}

impl<C: EngineHandle, D: EngineHandle> EngineHandle for ContentEngine<C, D> {
    fn navigate(&mut self, url: &str) -> Result<(), HostError> {
        self.handle_mut().navigate(url)
    }

    fn post_message(&mut self, json: &str) -> Result<(), HostError> {
        self.handle_mut().post_message(json)
    }

    fn set_bounds(&mut self, bounds: PixelRect, dpi: Dpi) -> Result<(), HostError> {
        self.handle_mut().set_bounds(bounds, dpi)
    }

    fn set_visible(&mut self, visible: bool) -> Result<(), HostError> {
        self.handle_mut().set_visible(visible)
    }

    fn send_input(&mut self, input: &EngineInput) -> Result<(), HostError> {
        self.handle_mut().send_input(input)
    }

    fn caption_at(&self, point: PixelPoint) -> bool {
        self.handle().caption_at(point)
    }

    fn drain_events(&mut self) -> Vec<EngineEvent> {
        self.handle_mut().drain_events()
    }
}

/// Engine type for platforms that cannot host composed content. Never
/// constructed.
pub enum NoEngine {}

impl EngineHandle for NoEngine {
    fn navigate(&mut self, _url: &str) -> Result<(), HostError> {
        match *self {}
    }

    fn post_message(&mut self, _json: &str) -> Result<(), HostError> {
        match *self {}
    }

    fn set_bounds(&mut self, _bounds: PixelRect, _dpi: Dpi) -> Result<(), HostError> {
        match *self {}
    }

    fn set_visible(&mut self, _visible: bool) -> Result<(), HostError> {
        match *self {}
    }

    fn send_input(&mut self, _input: &EngineInput) -> Result<(), HostError> {
        match *self {}
    }

    fn caption_at(&self, _point: PixelPoint) -> bool {
        match *self {}
    }

    fn drain_events(&mut self) -> Vec<EngineEvent> {
        match *self {}
    }
}
