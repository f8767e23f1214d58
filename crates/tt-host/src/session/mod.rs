//! Hosting session: sequences surface and engine construction, falls back
//! from composed to direct hosting, and owns the window.


use tt_common::HostError;

use crate::composition::{CompositionSurface, SurfaceBuilder};
use crate::engine::{ContentEngine, EngineHandle, HostingMode};
use crate::window::HostWindow;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Uninitialized,
    EnvironmentCreating,
    DeviceCreating,
    VisualTreeBuilding,
    TargetAttaching,
    ComposedReady,
    DirectControllerCreating,
    DirectReady,
    Failed,
    Closed,
}

impl Stage {
    /// `start()` stops at these.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::ComposedReady | Self::DirectReady | Self::Failed | Self::Closed
        )
    }

    pub fn is_ready(self) -> bool {
        matches!(self, Self::ComposedReady | Self::DirectReady)
    }

    /// Stages that belong to the composed construction branch.
    pub fn is_composed(self) -> bool {
        matches!(
            self,
            Self::DeviceCreating | Self::VisualTreeBuilding | Self::TargetAttaching | Self::ComposedReady
        )
    }
}

/// Construction steps the session drives. Each one may fail.
pub trait HostPlatform {
    type Builder: SurfaceBuilder<Surface = Self::Surface>;
    type Surface: CompositionSurface;
    type Composed: EngineHandle;
    type Direct: EngineHandle;

    /// Prepare the engine runtime shared by both modes.
    fn create_environment(&mut self) -> Result<(), HostError>;

    /// A fresh surface builder, or `None` when no compositor is available.
    fn surface_builder(&mut self, window: &HostWindow) -> Option<Self::Builder>;

    fn create_composed_engine(
        &mut self,
        window: &HostWindow,
        surface: &Self::Surface,
    ) -> Result<Self::Composed, HostError>;

    fn create_direct_engine(&mut self, window: &HostWindow) -> Result<Self::Direct, HostError>;
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub prefer_composition: bool,
    /// The one resource loaded once an engine is ready.
    pub entry_url: String,
}

pub type SessionEngine<P> =
    ContentEngine<<P as HostPlatform>::Composed, <P as HostPlatform>::Direct>;

// =============================================================================
// SESSION
// =============================================================================

pub struct HostingSession<P: HostPlatform> {
    platform: P,
    window: HostWindow,
    options: SessionOptions,
    stage: Stage,
    builder: Option<P::Builder>,
    surface: Option<P::Surface>,
    engine: Option<SessionEngine<P>>,
    last_error: Option<String>,
    fallback_reason: Option<String>,
}

impl<P: HostPlatform> HostingSession<P> {
    pub fn new(window: HostWindow, platform: P, options: SessionOptions) -> Self {
        Self {
            platform,
            window,
            options,
            stage: Stage::Uninitialized,
            builder: None,
            surface: None,
            engine: None,
            last_error: None,
            fallback_reason: None,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn mode(&self) -> Option<HostingMode> {
        self.engine.as_ref().map(ContentEngine::mode)
    }

    pub fn is_ready(&self) -> bool {
        self.stage.is_ready()
    }

    /// Why the run could not host content at all.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Why composed hosting was abandoned, if it was.
    pub fn fallback_reason(&self) -> Option<&str> {
        self.fallback_reason.as_deref()
    }

    pub fn window(&self) -> &HostWindow {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut HostWindow {
        &mut self.window
    }

    pub fn engine(&self) -> Option<&SessionEngine<P>> {
        self.engine.as_ref()
    }

    pub fn engine_mut(&mut self) -> Option<&mut SessionEngine<P>> {
        self.engine.as_mut()
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Drive construction until a ready, failed or closed stage.
    pub fn start(&mut self) -> Stage {
        while !self.stage.is_terminal() {
            self.advance();
        }
        self.stage
    }

    /// Perform the work of the current stage and move to the next one.
    /// Terminal stages are left unchanged.
    pub fn advance(&mut self) -> Stage {
        let next = match self.stage {
            Stage::Uninitialized => Stage::EnvironmentCreating,
            Stage::EnvironmentCreating => self.create_environment(),
            Stage::DeviceCreating => self.composed_step(Stage::VisualTreeBuilding, |b, _| b.create_device()),
            Stage::VisualTreeBuilding => self.composed_step(Stage::TargetAttaching, |b, window| {
                b.build_visual_tree(window.client_rect())
            }),
            Stage::TargetAttaching => self.attach_composed(),
            Stage::DirectControllerCreating => self.create_direct(),
            terminal => terminal,
        };
        if next != self.stage {
            tracing::debug!(from = ?self.stage, to = ?next, "hosting stage");
        }
        self.stage = next;
        next
    }

    fn create_environment(&mut self) -> Stage {
        if let Err(e) = self.platform.create_environment() {
            tracing::warn!(error = %e, "engine environment failed, composition disabled");
            self.fallback_reason = Some(e.to_string());
            return Stage::DirectControllerCreating;
        }
        if !self.options.prefer_composition {
            tracing::info!("composition disabled by configuration");
            return Stage::DirectControllerCreating;
        }
        match self.platform.surface_builder(&self.window) {
            Some(builder) => {
                self.builder = Some(builder);
                Stage::DeviceCreating
            }
            None => {
                tracing::info!("no compositor available, using direct hosting");
                Stage::DirectControllerCreating
            }
        }
    }

    fn composed_step(
        &mut self,
        next: Stage,
        step: impl FnOnce(&mut P::Builder, &HostWindow) -> Result<(), HostError>,
    ) -> Stage {
        let result = match self.builder.as_mut() {
            Some(builder) => step(builder, &self.window),
            None => Err(HostError::initialization("composition", "surface builder missing")),
        };
        match result {
            Ok(()) => next,
            Err(e) => self.fall_back(e),
        }
    }

    fn attach_composed(&mut self) -> Stage {
        let Some(builder) = self.builder.take() else {
            return self.fall_back(HostError::initialization("render target", "surface builder missing"));
        };
        let surface = match builder.attach_target() {
            Ok(s) => s,
            Err(e) => return self.fall_back(e),
        };
        let engine = match self.platform.create_composed_engine(&self.window, &surface) {
            Ok(e) => e,
            Err(e) => {
                drop(surface);
                return self.fall_back(e);
            }
        };
        self.surface = Some(surface);
        self.engine = Some(ContentEngine::Composed(engine));

        match self.enter_ready() {
            Ok(()) => Stage::ComposedReady,
            Err(e) => self.fall_back(e),
        }
    }

    fn create_direct(&mut self) -> Stage {
        match self.platform.create_direct_engine(&self.window) {
            Ok(engine) => {
                self.engine = Some(ContentEngine::Direct(engine));
                match self.enter_ready() {
                    Ok(()) => Stage::DirectReady,
                    Err(e) => self.fail(e),
                }
            }
            Err(e) => self.fail(e),
        }
    }

    /// Size the engine, load the entry resource, then reapply the saved
    /// placement and show the window.
    fn enter_ready(&mut self) -> Result<(), HostError> {
        let client = self.window.client_rect();
        let dpi = self.window.dpi();
        let Some(engine) = self.engine.as_mut() else {
            return Err(HostError::Other("no engine".into()));
        };
        engine.set_bounds(client, dpi)?;
        engine.navigate(&self.options.entry_url)?;

        self.window.apply_placement();
        self.window.show();
        tracing::info!(mode = ?engine.mode(), "content hosting ready");
        Ok(())
    }

    /// Tear down surface and engine together and switch to direct hosting.
    fn fall_back(&mut self, error: HostError) -> Stage {
        tracing::warn!(stage = ?self.stage, error = %error, "composed hosting failed, falling back to direct");
        self.release();
        self.fallback_reason = Some(error.to_string());
        Stage::DirectControllerCreating
    }

    fn fail(&mut self, error: HostError) -> Stage {
        tracing::error!(error = %error, "content hosting failed");
        self.release();
        self.window.hide();
        self.last_error = Some(error.to_string());
        Stage::Failed
    }

    fn release(&mut self) {
        self.engine = None;
        self.surface = None;
        self.builder = None;
    }

    /// Propagate a client-area change to the surface clip and engine bounds.
    pub fn resize(&mut self, interactive: bool) {
        let client = self.window.client_rect();
        let dpi = self.window.dpi();
        if let Some(surface) = self.surface.as_mut() {
            if let Err(e) = surface.resize(client, interactive) {
                tracing::warn!(error = %e, "surface resize failed");
            }
        }
        if let Some(engine) = self.engine.as_mut() {
            if let Err(e) = engine.set_bounds(client, dpi) {
                tracing::warn!(error = %e, "engine bounds update failed");
            }
        }
    }

    /// Release everything and close. Safe to call from any stage, any
    /// number of times.
    pub fn shutdown(&mut self) {
        if self.stage == Stage::Closed {
            return;
        }
        tracing::info!(stage = ?self.stage, "hosting session shutting down");
        self.release();
        self.window.hide();
        self.stage = Stage::Closed;
    }
}
