//! Native pointer input translated into synthetic engine input.
//!
//! Only the composed engine consumes this; in direct mode the engine owns
//! its own window and receives input from the OS.

use std::time::{Duration, Instant};

use tt_common::{PixelPoint, PixelRect};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    /// First extended button (browser "back").
    X1,
    /// Second extended button (browser "forward").
    X2,
}

/// What happened, in host terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Move,
    Down(MouseButton),
    Up(MouseButton),
    DoubleClick(MouseButton),
    /// Vertical wheel, in wheel-delta units (120 per notch).
    Wheel(i32),
    HorizontalWheel(i32),
}

/// Buttons held and keyboard modifiers at the time of the event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub left: bool,
    pub right: bool,
    pub middle: bool,
    pub x1: bool,
    pub x2: bool,
    pub shift: bool,
    pub control: bool,
}

impl Modifiers {
    const LBUTTON: u32 = 0x0001;
    const RBUTTON: u32 = 0x0002;
    const SHIFT: u32 = 0x0004;
    const CONTROL: u32 = 0x0008;
    const MBUTTON: u32 = 0x0010;
    const XBUTTON1: u32 = 0x0020;
    const XBUTTON2: u32 = 0x0040;

    /// Virtual-key flag word understood by the engine.
    pub fn bits(self) -> u32 {
        let mut bits = 0;
        for (set, flag) in [
            (self.left, Self::LBUTTON),
            (self.right, Self::RBUTTON),
            (self.shift, Self::SHIFT),
            (self.control, Self::CONTROL),
            (self.middle, Self::MBUTTON),
            (self.x1, Self::XBUTTON1),
            (self.x2, Self::XBUTTON2),
        ] {
            if set {
                bits |= flag;
            }
        }
        bits
    }

    pub fn set_button(&mut self, button: MouseButton, pressed: bool) {
        match button {
            MouseButton::Left => self.left = pressed,
            MouseButton::Right => self.right = pressed,
            MouseButton::Middle => self.middle = pressed,
            MouseButton::X1 => self.x1 = pressed,
            MouseButton::X2 => self.x2 = pressed,
        }
    }
}

/// One native pointer event.
///
/// `position` is window-local, except for wheel actions where it is in
/// screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub action: PointerAction,
    pub position: PixelPoint,
    pub modifiers: Modifiers,
}

/// Engine-side mouse event kinds, numbered like the matching window
/// messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    Move,
    LeftDown,
    LeftUp,
    LeftDoubleClick,
    RightDown,
    RightUp,
    RightDoubleClick,
    MiddleDown,
    MiddleUp,
    MiddleDoubleClick,
    Wheel,
    XDown,
    XUp,
    XDoubleClick,
    HorizontalWheel,
}

impl MouseEventKind {
    pub fn code(self) -> u32 {
        match self {
            Self::Move => 0x0200,
            Self::LeftDown => 0x0201,
            Self::LeftUp => 0x0202,
            Self::LeftDoubleClick => 0x0203,
            Self::RightDown => 0x0204,
            Self::RightUp => 0x0205,
            Self::RightDoubleClick => 0x0206,
            Self::MiddleDown => 0x0207,
            Self::MiddleUp => 0x0208,
            Self::MiddleDoubleClick => 0x0209,
            Self::Wheel => 0x020A,
            Self::XDown => 0x020B,
            Self::XUp => 0x020C,
            Self::XDoubleClick => 0x020D,
            Self::HorizontalWheel => 0x020E,
        }
    }
}

/// Synthetic input ready for the engine. `point` is relative to the
/// content bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineInput {
    pub kind: MouseEventKind,
    pub virtual_keys: u32,
    pub mouse_data: u32,
    pub point: PixelPoint,
}

/// Result of forwarding one event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Forwarded {
    /// Input to send to the engine, if the event was handled.
    pub input: Option<EngineInput>,
    /// An interactive resize just ended; the surface needs one final
    /// synchronous commit.
    pub resize_finished: bool,
}

// =============================================================================
// FORWARDER
// =============================================================================

/// Down, up and double-click kinds for a button.
fn kinds_for(button: MouseButton) -> [MouseEventKind; 3] {
    use MouseEventKind::*;
    match button {
        MouseButton::Left => [LeftDown, LeftUp, LeftDoubleClick],
        MouseButton::Right => [RightDown, RightUp, RightDoubleClick],
        MouseButton::Middle => [MiddleDown, MiddleUp, MiddleDoubleClick],
        MouseButton::X1 | MouseButton::X2 => [XDown, XUp, XDoubleClick],
    }
}

fn x_data(button: MouseButton) -> u32 {
    match button {
        MouseButton::X1 => 1,
        MouseButton::X2 => 2,
        _ => 0,
    }
}

/// Clips native pointer input to the content bounds and holds pointer
/// capture across drags.
#[derive(Debug, Default)]
pub struct InputForwarder {
    bounds: PixelRect,
    window_origin: PixelPoint,
    captured: bool,
    interactive_resize: bool,
}

impl InputForwarder {
    pub fn new(bounds: PixelRect) -> Self {
        Self {
            bounds,
            ..Default::default()
        }
    }

    pub fn set_bounds(&mut self, bounds: PixelRect) {
        self.bounds = bounds;
    }

    /// Screen position of the window's client origin, used to convert
    /// wheel coordinates.
    pub fn set_window_origin(&mut self, origin: PixelPoint) {
        self.window_origin = origin;
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Mark the start of an edge drag.
    pub fn begin_interactive_resize(&mut self) {
        self.interactive_resize = true;
    }

    pub fn is_interactive_resize(&self) -> bool {
        self.interactive_resize
    }

    /// Translate one event.
    ///
    /// Events outside the content bounds are dropped unless capture is
    /// held, in which case they are clamped into bounds. Capture begins on
    /// a button-down inside bounds and ends on button-up.
    pub fn forward(&mut self, event: PointerEvent) -> Forwarded {
        let resize_finished = std::mem::take(&mut self.interactive_resize);

        let local = match event.action {
            PointerAction::Wheel(_) | PointerAction::HorizontalWheel(_) => PixelPoint::new(
                event.position.x - self.window_origin.x,
                event.position.y - self.window_origin.y,
            ),
            _ => event.position,
        };

        let inside = self.bounds.contains(local);
        if !inside && !self.captured {
            return Forwarded {
                input: None,
                resize_finished,
            };
        }

        let clamped = if inside { local } else { self.bounds.clamp(local) };
        let point = PixelPoint::new(clamped.x - self.bounds.x, clamped.y - self.bounds.y);

        let (kind, mouse_data) = match event.action {
            PointerAction::Move => (MouseEventKind::Move, 0),
            PointerAction::Down(button) => {
                self.captured = true;
                (kinds_for(button)[0], x_data(button))
            }
            PointerAction::Up(button) => {
                self.captured = false;
                (kinds_for(button)[1], x_data(button))
            }
            PointerAction::DoubleClick(button) => (kinds_for(button)[2], x_data(button)),
            PointerAction::Wheel(delta) => (MouseEventKind::Wheel, delta as u32),
            PointerAction::HorizontalWheel(delta) => (MouseEventKind::HorizontalWheel, delta as u32),
        };

        Forwarded {
            input: Some(EngineInput {
                kind,
                virtual_keys: event.modifiers.bits(),
                mouse_data,
                point,
            }),
            resize_finished,
        }
    }
}

// =============================================================================
// DOUBLE-CLICK DETECTION
// =============================================================================

/// Turns a second button-down within the double-click interval and slop
/// distance into a double-click.
#[derive(Debug)]
pub struct ClickTracker {
    interval: Duration,
    slop: i32,
    last: Option<(MouseButton, Instant, PixelPoint)>,
}

impl Default for ClickTracker {
    fn default() -> Self {
        Self::new(Duration::from_millis(500), 4)
    }
}

impl ClickTracker {
    pub fn new(interval: Duration, slop: i32) -> Self {
        Self {
            interval,
            slop,
            last: None,
        }
    }

    pub fn press(&mut self, button: MouseButton, position: PixelPoint, now: Instant) -> PointerAction {
        if let Some((last_button, at, last_pos)) = self.last {
            let close = (position.x - last_pos.x).abs() <= self.slop
                && (position.y - last_pos.y).abs() <= self.slop;
            if last_button == button && close && now.duration_since(at) <= self.interval {
                self.last = None;
                return PointerAction::DoubleClick(button);
            }
        }
        self.last = Some((button, now, position));
        PointerAction::Down(button)
    }
}

// =============================================================================
// TESTS
// =============================================================================
