//! The native top-level window and its placement snapshot.

mod desktop;

pub use desktop::DesktopWindow;

use serde::{Deserialize, Serialize};
use tt_bridge::PlacementError;
use tt_common::{Dpi, PixelPoint, PixelRect, PixelSize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShowState {
    #[default]
    Normal,
    Minimized,
    Maximized,
}

/// Position, size and show state captured from the window and reapplied
/// verbatim before it is next shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub position: PixelPoint,
    pub size: PixelSize,
    pub show_state: ShowState,
}

/// Operations the host needs from the OS window. All coordinates are
/// physical pixels.
pub trait NativeWindow {
    fn client_size(&self) -> PixelSize;

    fn dpi(&self) -> Dpi;

    /// Screen position of the outer frame.
    fn outer_position(&self) -> Option<PixelPoint>;

    /// Screen position of the client area's top-left corner.
    fn client_origin(&self) -> Option<PixelPoint>;

    fn show_state(&self) -> ShowState;

    fn set_visible(&self, visible: bool);

    fn set_show_state(&self, state: ShowState);

    fn set_outer_position(&self, position: PixelPoint);

    fn set_client_size(&self, size: PixelSize);

    fn focus(&self);
}

/// The host's one window: native handle, visibility and the optional
/// placement snapshot.
pub struct HostWindow {
    native: Box<dyn NativeWindow>,
    placement: Option<Placement>,
    /// Last outer position and client size seen in the normal state.
    normal_rect: Option<(PixelPoint, PixelSize)>,
    visible: bool,
}

impl HostWindow {
    /// Wrap a native window. The window is expected to start hidden.
    pub fn new(native: Box<dyn NativeWindow>) -> Self {
        let mut window = Self {
            native,
            placement: None,
            normal_rect: None,
            visible: false,
        };
        window.track_geometry();
        window
    }

    pub fn native(&self) -> &dyn NativeWindow {
        self.native.as_ref()
    }

    pub fn client_size(&self) -> PixelSize {
        self.native.client_size()
    }

    pub fn client_rect(&self) -> PixelRect {
        PixelRect::from_size(self.native.client_size())
    }

    pub fn dpi(&self) -> Dpi {
        self.native.dpi()
    }

    pub fn show_state(&self) -> ShowState {
        self.native.show_state()
    }

    pub fn is_maximized(&self) -> bool {
        self.show_state() == ShowState::Maximized
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn placement(&self) -> Option<&Placement> {
        self.placement.as_ref()
    }

    /// Remember the current geometry if the window is in the normal state.
    /// Call after every move or resize.
    pub fn track_geometry(&mut self) {
        if self.native.show_state() != ShowState::Normal {
            return;
        }
        if let Some(rect) = self.current_rect() {
            self.normal_rect = Some(rect);
        }
    }

    fn current_rect(&self) -> Option<(PixelPoint, PixelSize)> {
        let position = self.native.outer_position()?;
        let size = self.native.client_size();
        (!size.is_empty()).then_some((position, size))
    }

    /// Snapshot the current placement, replacing any previous one.
    ///
    /// The saved rect is always the normal (restored) one. A maximized
    /// window with no normal rect on record saves its current rect; a
    /// minimized one cannot be captured.
    pub fn capture_placement(&mut self) -> Result<Placement, PlacementError> {
        let show_state = self.native.show_state();
        let rect = match show_state {
            ShowState::Normal => {
                self.track_geometry();
                self.current_rect()
            }
            ShowState::Maximized => self.normal_rect.or_else(|| self.current_rect()),
            ShowState::Minimized => self.normal_rect,
        };
        let (position, size) = rect.ok_or(PlacementError::CaptureFailed)?;
        let placement = Placement {
            position,
            size,
            show_state,
        };
        tracing::debug!(?placement, "window placement captured");
        self.placement = Some(placement);
        Ok(placement)
    }

    /// Reapply the saved placement. Returns `false` when none is saved.
    pub fn apply_placement(&mut self) -> bool {
        let Some(placement) = self.placement else {
            return false;
        };
        self.native.set_show_state(ShowState::Normal);
        self.native.set_outer_position(placement.position);
        self.native.set_client_size(placement.size);
        self.normal_rect = Some((placement.position, placement.size));
        if placement.show_state != ShowState::Normal {
            self.native.set_show_state(placement.show_state);
        }
        true
    }

    pub fn show(&mut self) {
        self.native.set_visible(true);
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.native.set_visible(false);
        self.visible = false;
    }

    /// Bring the window up: restore if minimized, show and focus.
    pub fn present(&mut self) {
        if self.show_state() == ShowState::Minimized {
            self.native.set_show_state(ShowState::Normal);
        }
        self.show();
        self.native.focus();
    }

    pub fn minimize(&self) {
        self.native.set_show_state(ShowState::Minimized);
    }

    pub fn toggle_maximize(&self) {
        let next = if self.is_maximized() {
            ShowState::Normal
        } else {
            ShowState::Maximized
        };
        self.native.set_show_state(next);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    pub(crate) struct FakeState {
        pub size: PixelSize,
        pub position: Option<PixelPoint>,
        pub show_state: ShowState,
        pub visible: bool,
        pub focused: u32,
    }

    /// In-memory window. Clones share state so tests can observe it after
    /// handing ownership to a `HostWindow`.
    #[derive(Clone, Default)]
    pub(crate) struct FakeWindow(pub Rc<RefCell<FakeState>>);

    impl FakeWindow {
        pub(crate) fn sized(width: u32, height: u32) -> Self {
            let fake = Self::default();
            {
                let mut s = fake.0.borrow_mut();
                s.size = PixelSize::new(width, height);
                s.position = Some(PixelPoint::new(100, 80));
            }
            fake
        }
    }

    impl NativeWindow for FakeWindow {
        fn client_size(&self) -> PixelSize {
            self.0.borrow().size
        }

        fn dpi(&self) -> Dpi {
            Dpi::default()
        }

        fn outer_position(&self) -> Option<PixelPoint> {
            self.0.borrow().position
        }

        fn client_origin(&self) -> Option<PixelPoint> {
            self.0.borrow().position
        }

        fn show_state(&self) -> ShowState {
            self.0.borrow().show_state
        }

        fn set_visible(&self, visible: bool) {
            self.0.borrow_mut().visible = visible;
        }

        fn set_show_state(&self, state: ShowState) {
            self.0.borrow_mut().show_state = state;
        }

        fn set_outer_position(&self, position: PixelPoint) {
            self.0.borrow_mut().position = Some(position);
        }

        fn set_client_size(&self, size: PixelSize) {
            self.0.borrow_mut().size = size;
        }

        fn focus(&self) {
            self.0.borrow_mut().focused += 1;
        }
    }

    #[test]
    fn placement_round_trips() {
        let fake = FakeWindow::sized(1024, 700);
        fake.0.borrow_mut().show_state = ShowState::Maximized;
        let mut window = HostWindow::new(Box::new(fake.clone()));

        let captured = window.capture_placement().unwrap();

        {
            let mut s = fake.0.borrow_mut();
            s.size = PixelSize::new(300, 200);
            s.position = Some(PixelPoint::new(-5, 9));
            s.show_state = ShowState::Normal;
        }

        assert!(window.apply_placement());
        let s = fake.0.borrow();
        assert_eq!(s.size, captured.size);
        assert_eq!(s.position, Some(captured.position));
        assert_eq!(s.show_state, ShowState::Maximized);
    }

    #[test]
    fn capture_while_maximized_keeps_normal_rect() {
        let fake = FakeWindow::sized(900, 640);
        let mut window = HostWindow::new(Box::new(fake.clone()));

        fake.0.borrow_mut().position = Some(PixelPoint::new(220, 140));
        window.track_geometry();
        {
            let mut s = fake.0.borrow_mut();
            s.show_state = ShowState::Maximized;
            s.position = Some(PixelPoint::new(-8, -8));
            s.size = PixelSize::new(2576, 1416);
        }
        window.track_geometry();

        let captured = window.capture_placement().unwrap();
        assert_eq!(captured.position, PixelPoint::new(220, 140));
        assert_eq!(captured.size, PixelSize::new(900, 640));
        assert_eq!(captured.show_state, ShowState::Maximized);

        fake.0.borrow_mut().show_state = ShowState::Normal;
        assert!(window.apply_placement());
        let s = fake.0.borrow();
        assert_eq!(s.size, PixelSize::new(900, 640));
        assert_eq!(s.position, Some(PixelPoint::new(220, 140)));
        assert_eq!(s.show_state, ShowState::Maximized);
    }

    #[test]
    fn capture_while_minimized_ignores_iconic_position() {
        let fake = FakeWindow::sized(800, 600);
        let mut window = HostWindow::new(Box::new(fake.clone()));
        {
            let mut s = fake.0.borrow_mut();
            s.show_state = ShowState::Minimized;
            s.position = Some(PixelPoint::new(-32000, -32000));
            s.size = PixelSize::new(160, 28);
        }
        window.track_geometry();

        let captured = window.capture_placement().unwrap();
        assert_eq!(captured.position, PixelPoint::new(100, 80));
        assert_eq!(captured.size, PixelSize::new(800, 600));
        assert_eq!(captured.show_state, ShowState::Minimized);
    }

    #[test]
    fn minimized_window_without_normal_rect_cannot_be_captured() {
        let fake = FakeWindow::sized(800, 600);
        fake.0.borrow_mut().show_state = ShowState::Minimized;
        let mut window = HostWindow::new(Box::new(fake));
        assert_eq!(window.capture_placement(), Err(PlacementError::CaptureFailed));
    }

    #[test]
    fn apply_without_snapshot_is_noop() {
        let fake = FakeWindow::sized(800, 600);
        let mut window = HostWindow::new(Box::new(fake.clone()));
        assert!(!window.apply_placement());
        assert_eq!(fake.0.borrow().position, Some(PixelPoint::new(100, 80)));
    }

    #[test]
    fn capture_fails_without_position_or_size() {
        let fake = FakeWindow::sized(800, 600);
        fake.0.borrow_mut().position = None;
        let mut window = HostWindow::new(Box::new(fake.clone()));
        assert_eq!(window.capture_placement(), Err(PlacementError::CaptureFailed));

        let fake = FakeWindow::sized(0, 0);
        let mut window = HostWindow::new(Box::new(fake));
        assert_eq!(window.capture_placement(), Err(PlacementError::CaptureFailed));
        assert!(window.placement().is_none());
    }

    #[test]
    fn toggle_maximize_restores() {
        let fake = FakeWindow::sized(800, 600);
        let window = HostWindow::new(Box::new(fake.clone()));
        window.toggle_maximize();
        assert_eq!(fake.0.borrow().show_state, ShowState::Maximized);
        window.toggle_maximize();
        assert_eq!(fake.0.borrow().show_state, ShowState::Normal);
    }

    #[test]
    fn present_restores_minimized_window() {
        let fake = FakeWindow::sized(800, 600);
        fake.0.borrow_mut().show_state = ShowState::Minimized;
        let mut window = HostWindow::new(Box::new(fake.clone()));
        window.present();
        let s = fake.0.borrow();
        assert_eq!(s.show_state, ShowState::Normal);
        assert!(s.visible);
        assert_eq!(s.focused, 1);
        assert!(window.is_visible());
    }
}
