use serde::{Deserialize, Serialize};

/// Reference DPI at which one logical pixel equals one physical pixel.
pub const BASE_DPI: u32 = 96;

/// Dots per inch of the monitor a window currently lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dpi(pub u32);

impl Dpi {
    /// Build from a winit-style scale factor (1.0 == 96 DPI).
    pub fn from_scale_factor(scale: f64) -> Self {
        let dpi = (scale * BASE_DPI as f64).round();
        Self(if dpi < 1.0 { BASE_DPI } else { dpi as u32 })
    }

    pub fn scale_factor(self) -> f64 {
        self.0 as f64 / BASE_DPI as f64
    }

    /// Scale a 96-DPI metric to this DPI, rounding like `MulDiv`.
    pub fn scale(self, value: i32) -> i32 {
        let scaled = value as i64 * self.0 as i64;
        let half = BASE_DPI as i64 / 2;
        let rounded = if scaled >= 0 {
            (scaled + half) / BASE_DPI as i64
        } else {
            (scaled - half) / BASE_DPI as i64
        };
        rounded as i32
    }
}

impl Default for Dpi {
    fn default() -> Self {
        Self(BASE_DPI)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Physical-pixel rectangle, origin at top-left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect anchored at the origin covering `size`.
    pub const fn from_size(size: PixelSize) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    pub fn size(&self) -> PixelSize {
        PixelSize::new(self.width, self.height)
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width as i32)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height as i32)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, point: PixelPoint) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Nearest in-bounds pixel. An empty rect clamps to its origin.
    pub fn clamp(&self, point: PixelPoint) -> PixelPoint {
        let max_x = (self.right() - 1).max(self.x);
        let max_y = (self.bottom() - 1).max(self.y);
        PixelPoint::new(point.x.clamp(self.x, max_x), point.y.clamp(self.y, max_y))
    }
}
