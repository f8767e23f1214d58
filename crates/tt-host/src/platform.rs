//! The real platform behind a [`HostingSession`](crate::HostingSession).

use std::sync::Arc;

use tt_common::HostError;
use winit::window::Window;

use crate::engine::direct::DirectEngine;
use crate::engine::EngineOptions;
use crate::session::HostPlatform;
use crate::window::HostWindow;

#[cfg(windows)]
use crate::composition::dcomp::{window_hwnd, DcompBuilder, DcompSurface};
#[cfg(windows)]
use crate::engine::composed::{self, ComposedEngine};
#[cfg(windows)]
use webview2_com::Microsoft::Web::WebView2::Win32::ICoreWebView2Environment3;

#[cfg(not(windows))]
use crate::composition::Unsupported;
#[cfg(not(windows))]
use crate::engine::NoEngine;

/// Builds surfaces and engines for a winit window.
pub struct DesktopPlatform {
    window: Arc<Window>,
    options: EngineOptions,
    #[cfg(windows)]
    environment: Option<ICoreWebView2Environment3>,
}

impl DesktopPlatform {
    pub fn new(window: Arc<Window>, options: EngineOptions) -> Self {
        Self {
            window,
            options,
            #[cfg(windows)]
            environment: None,
        }
    }
}

#[cfg(windows)]
impl HostPlatform for DesktopPlatform {
    type Builder = DcompBuilder;
    type Surface = DcompSurface;
    type Composed = ComposedEngine;
    type Direct = DirectEngine;

    fn create_environment(&mut self) -> Result<(), HostError> {
        use windows::Win32::System::Com::{CoInitializeEx, COINIT_APARTMENTTHREADED};

        // S_FALSE and RPC_E_CHANGED_MODE both leave a usable apartment.
        let _ = unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) };
        let env = composed::create_environment(self.options.user_data_dir.as_deref())?;
        self.environment = Some(env);
        Ok(())
    }

    fn surface_builder(&mut self, _window: &HostWindow) -> Option<DcompBuilder> {
        self.environment.as_ref()?;
        window_hwnd(&self.window).map(DcompBuilder::new)
    }

    fn create_composed_engine(
        &mut self,
        window: &HostWindow,
        surface: &DcompSurface,
    ) -> Result<ComposedEngine, HostError> {
        let environment = self
            .environment
            .as_ref()
            .ok_or_else(|| HostError::initialization("composition controller", "no environment"))?;
        let hwnd = window_hwnd(&self.window)
            .ok_or_else(|| HostError::initialization("composition controller", "no window handle"))?;
        ComposedEngine::create(
            environment,
            hwnd,
            surface,
            window.client_rect(),
            window.dpi(),
            &self.options,
        )
    }

    fn create_direct_engine(&mut self, window: &HostWindow) -> Result<DirectEngine, HostError> {
        DirectEngine::create(&*self.window, window.client_rect(), window.dpi(), &self.options)
    }
}

#[cfg(not(windows))]
impl HostPlatform for DesktopPlatform {
    type Builder = Unsupported;
    type Surface = Unsupported;
    type Composed = NoEngine;
    type Direct = DirectEngine;

    fn create_environment(&mut self) -> Result<(), HostError> {
        Ok(())
    }

    fn surface_builder(&mut self, _window: &HostWindow) -> Option<Unsupported> {
        None
    }

    fn create_composed_engine(
        &mut self,
        _window: &HostWindow,
        surface: &Unsupported,
    ) -> Result<NoEngine, HostError> {
        match *surface {}
    }

    fn create_direct_engine(&mut self, window: &HostWindow) -> Result<DirectEngine, HostError> {
        DirectEngine::create(&*self.window, window.client_rect(), window.dpi(), &self.options)
    }
}
