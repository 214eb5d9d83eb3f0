//! Resolution scaling against a 1920-wide reference layout.

/// Width the UI layouts are authored against.
pub const REFERENCE_WIDTH: u32 = 1920;
pub const REFERENCE_HEIGHT: u32 = 1080;

/// Current screen dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self::new(REFERENCE_WIDTH, REFERENCE_HEIGHT)
    }
}

/// Axis-aligned rectangle, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Scales reference-layout pixels by `screen width / 1920`.
///
/// Only the width ratio is used, so non-16:9 screens get the horizontal scale on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenScale {
    screen: ScreenSize,
}

impl ScreenScale {
    pub fn new(screen: ScreenSize) -> Self {
        Self { screen }
    }

    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    pub fn factor(&self) -> f32 {
        self.screen.width as f32 / REFERENCE_WIDTH as f32
    }

    pub fn pixels(&self, reference: f32) -> f32 {
        reference * self.factor()
    }

    /// Integer variant, truncating toward zero.
    pub fn pixels_i(&self, reference: i32) -> i32 {
        (reference as f32 * self.factor()) as i32
    }

    pub fn scale_rect(&self, rect: Rect) -> Rect {
        Rect {
            x: self.pixels(rect.x),
            y: self.pixels(rect.y),
            width: self.pixels(rect.width),
            height: self.pixels(rect.height),
        }
    }
}
