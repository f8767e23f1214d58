//! GPU composition surface that the composed engine renders into.
//!
//! Building is split into the same steps the hosting session reports, so
//! a failure can be attributed to one of them. Dropping a builder releases
//! whatever it acquired so far.

#[cfg(windows)]
pub mod dcomp;

use tt_common::{HostError, PixelRect};

/// Stepwise construction of a [`CompositionSurface`].
pub trait SurfaceBuilder {
    type Surface: CompositionSurface;

    /// Acquire the GPU device and the compositor device on top of it.
    fn create_device(&mut self) -> Result<(), HostError>;

    /// Create root and content visuals, parent content under root and clip
    /// it to `client`.
    fn build_visual_tree(&mut self, client: PixelRect) -> Result<(), HostError>;

    /// Bind a render target to the window, set the root visual and commit.
    fn attach_target(self) -> Result<Self::Surface, HostError>;
}

/// A fully built surface.
pub trait CompositionSurface {
    /// Resize the clip to `client` and commit. While `interactive`, block
    /// until the commit has been flushed to screen.
    fn resize(&mut self, client: PixelRect, interactive: bool) -> Result<(), HostError>;
}

/// Stand-in types for platforms without a compositor. Never constructed.
#[derive(Debug)]
pub enum Unsupported {}

impl SurfaceBuilder for Unsupported {
    type Surface = Unsupported;

    fn create_device(&mut self) -> Result<(), HostError> {
        match *self {}
    }

    fn build_visual_tree(&mut self, _client: PixelRect) -> Result<(), HostError> {
        match *self {}
    }

    fn attach_target(self) -> Result<Self::Surface, HostError> {
        match self {}
    }
}

impl CompositionSurface for Unsupported {
    fn resize(&mut self, _client: PixelRect, _interactive: bool) -> Result<(), HostError> {
        match *self {}
    }
}
