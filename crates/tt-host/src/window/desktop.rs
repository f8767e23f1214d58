use std::sync::Arc;

use tt_common::{Dpi, PixelPoint, PixelSize};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::window::Window;

use super::{NativeWindow, ShowState};

/// A winit window seen through [`NativeWindow`].
#[derive(Clone)]
pub struct DesktopWindow(Arc<Window>);

impl DesktopWindow {
    pub fn new(window: Arc<Window>) -> Self {
        Self(window)
    }

    pub fn winit(&self) -> &Arc<Window> {
        &self.0
    }
}

impl NativeWindow for DesktopWindow {
    fn client_size(&self) -> PixelSize {
        let size = self.0.inner_size();
        PixelSize::new(size.width, size.height)
    }

    fn dpi(&self) -> Dpi {
        Dpi::from_scale_factor(self.0.scale_factor())
    }

    fn outer_position(&self) -> Option<PixelPoint> {
        self.0
            .outer_position()
            .ok()
            .map(|p| PixelPoint::new(p.x, p.y))
    }

    fn client_origin(&self) -> Option<PixelPoint> {
        self.0
            .inner_position()
            .ok()
            .map(|p| PixelPoint::new(p.x, p.y))
    }

    fn show_state(&self) -> ShowState {
        if self.0.is_minimized().unwrap_or(false) {
            ShowState::Minimized
        } else if self.0.is_maximized() {
            ShowState::Maximized
        } else {
            ShowState::Normal
        }
    }

    fn set_visible(&self, visible: bool) {
        self.0.set_visible(visible);
    }

    fn set_show_state(&self, state: ShowState) {
        match state {
            ShowState::Normal => {
                self.0.set_minimized(false);
                self.0.set_maximized(false);
            }
            ShowState::Minimized => self.0.set_minimized(true),
            ShowState::Maximized => {
                self.0.set_minimized(false);
                self.0.set_maximized(true);
            }
        }
    }

    fn set_outer_position(&self, position: PixelPoint) {
        self.0
            .set_outer_position(PhysicalPosition::new(position.x, position.y));
    }

    fn set_client_size(&self, size: PixelSize) {
        let _ = self
            .0
            .request_inner_size(PhysicalSize::new(size.width, size.height));
    }

    fn focus(&self) {
        self.0.focus_window();
    }
}
