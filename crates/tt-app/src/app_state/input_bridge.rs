//! Window pointer input: frame hit testing, caption drags and forwarding
//! to the composed engine.

use std::time::Instant;

use tt_common::PixelPoint;
use tt_host::{
    classify, resolve, ClickTracker, EngineHandle, FrameHit, HitZone, InputForwarder, Modifiers,
    MouseButton, NativeWindow, PointerAction, PointerEvent, ResizeCursor,
};
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseScrollDelta};
use winit::keyboard::ModifiersState;
use winit::window::CursorIcon;

use super::core::TorrentHostApp;

/// Wheel-delta units per notch.
const WHEEL_DELTA: f64 = 120.0;

#[derive(Debug)]
pub(super) struct PointerState {
    pub(super) forwarder: InputForwarder,
    clicks: ClickTracker,
    modifiers: Modifiers,
    /// Last window-local cursor position.
    cursor: PixelPoint,
    zone: HitZone,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            forwarder: InputForwarder::default(),
            clicks: ClickTracker::default(),
            modifiers: Modifiers::default(),
            cursor: PixelPoint::default(),
            zone: HitZone::None,
        }
    }
}

pub(super) fn map_button(button: winit::event::MouseButton) -> Option<MouseButton> {
    use winit::event::MouseButton as W;
    match button {
        W::Left => Some(MouseButton::Left),
        W::Right => Some(MouseButton::Right),
        W::Middle => Some(MouseButton::Middle),
        W::Back => Some(MouseButton::X1),
        W::Forward => Some(MouseButton::X2),
        W::Other(_) => None,
    }
}

/// Vertical and horizontal wheel deltas in engine units.
///
/// winit reports horizontal scroll with the opposite sign.
pub(super) fn wheel_delta(delta: MouseScrollDelta) -> (i32, i32) {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => (
            (y as f64 * WHEEL_DELTA).round() as i32,
            (-(x as f64) * WHEEL_DELTA).round() as i32,
        ),
        MouseScrollDelta::PixelDelta(p) => (p.y.round() as i32, (-p.x).round() as i32),
    }
}

impl TorrentHostApp {
    pub(super) fn handle_modifiers(&mut self, state: ModifiersState) {
        self.pointer.modifiers.shift = state.shift_key();
        self.pointer.modifiers.control = state.control_key();
    }

    fn zone_at(&self, point: PixelPoint) -> HitZone {
        let Some(session) = self.session.as_ref() else {
            return HitZone::None;
        };
        let window = session.window();
        classify(window.client_size(), window.dpi(), point, window.is_maximized())
    }

    pub(super) fn handle_cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        let point = PixelPoint::new(position.x.floor() as i32, position.y.floor() as i32);
        self.pointer.cursor = point;

        let zone = self.zone_at(point);
        if zone != self.pointer.zone {
            self.pointer.zone = zone;
            if let Some(window) = self.window.as_ref() {
                window.set_cursor(zone.cursor().map_or(CursorIcon::Default, ResizeCursor::icon));
            }
        }

        // The resize band belongs to the frame unless a drag started in
        // the content.
        if zone != HitZone::None && !self.pointer.forwarder.is_captured() {
            return;
        }
        self.forward(PointerAction::Move, point);
    }

    pub(super) fn handle_mouse_input(&mut self, state: ElementState, button: winit::event::MouseButton) {
        let Some(button) = map_button(button) else {
            return;
        };
        let point = self.pointer.cursor;

        match state {
            ElementState::Pressed => {
                let action = self.pointer.clicks.press(button, point, Instant::now());
                if button == MouseButton::Left
                    && !self.pointer.forwarder.is_captured()
                    && self.handle_frame_press(point, action)
                {
                    return;
                }
                self.pointer.modifiers.set_button(button, true);
                self.forward(action, point);
            }
            ElementState::Released => {
                self.pointer.modifiers.set_button(button, false);
                self.forward(PointerAction::Up(button), point);
            }
        }
    }

    pub(super) fn handle_mouse_wheel(&mut self, delta: MouseScrollDelta) {
        let (vertical, horizontal) = wheel_delta(delta);
        let origin = self
            .session
            .as_ref()
            .and_then(|s| s.window().native().client_origin())
            .unwrap_or_default();
        self.pointer.forwarder.set_window_origin(origin);

        let cursor = self.pointer.cursor;
        let screen = PixelPoint::new(cursor.x + origin.x, cursor.y + origin.y);
        if vertical != 0 {
            self.forward(PointerAction::Wheel(vertical), screen);
        }
        if horizontal != 0 {
            self.forward(PointerAction::HorizontalWheel(horizontal), screen);
        }
    }

    /// Start an edge resize or caption drag. Returns `true` when the press
    /// was consumed by the frame.
    fn handle_frame_press(&mut self, point: PixelPoint, action: PointerAction) -> bool {
        let (Some(session), Some(window)) = (self.session.as_ref(), self.window.as_ref()) else {
            return false;
        };
        let host = session.window();
        let zone = classify(host.client_size(), host.dpi(), point, host.is_maximized());
        let hit = resolve(zone, point, host.client_rect(), |p| {
            session.engine().is_some_and(|e| e.caption_at(p))
        });

        match hit {
            FrameHit::Resize(zone) => {
                if let Some(direction) = zone.resize_direction() {
                    if let Err(e) = window.drag_resize_window(direction) {
                        tracing::debug!(error = %e, "edge resize unavailable");
                    }
                }
                self.pointer.forwarder.begin_interactive_resize();
                true
            }
            FrameHit::Caption => {
                if matches!(action, PointerAction::DoubleClick(_)) {
                    host.toggle_maximize();
                } else if let Err(e) = window.drag_window() {
                    tracing::debug!(error = %e, "caption drag unavailable");
                }
                true
            }
            FrameHit::Client => false,
        }
    }

    fn forward(&mut self, action: PointerAction, position: PixelPoint) {
        let forwarded = self.pointer.forwarder.forward(PointerEvent {
            action,
            position,
            modifiers: self.pointer.modifiers,
        });
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if forwarded.resize_finished {
            session.resize(true);
        }
        if let Some(input) = forwarded.input {
            if let Some(engine) = session.engine_mut() {
                if let Err(e) = engine.send_input(&input) {
                    tracing::trace!(error = %e, "pointer input not delivered");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::event::MouseButton as W;

    #[test]
    fn maps_winit_buttons() {
        assert_eq!(map_button(W::Left), Some(MouseButton::Left));
        assert_eq!(map_button(W::Back), Some(MouseButton::X1));
        assert_eq!(map_button(W::Forward), Some(MouseButton::X2));
        assert_eq!(map_button(W::Other(7)), None);
    }

    #[test]
    fn line_delta_is_scaled_to_notches() {
        assert_eq!(wheel_delta(MouseScrollDelta::LineDelta(0.0, 1.0)), (120, 0));
        assert_eq!(wheel_delta(MouseScrollDelta::LineDelta(0.0, -2.0)), (-240, 0));
        assert_eq!(wheel_delta(MouseScrollDelta::LineDelta(1.0, 0.0)), (0, -120));
    }

    #[test]
    fn pixel_delta_passes_through() {
        let delta = MouseScrollDelta::PixelDelta(PhysicalPosition::new(-30.0, 45.4));
        assert_eq!(wheel_delta(delta), (45, 30));
    }
}
