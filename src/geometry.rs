//! Shared geometric primitives used by the gesture interpreter and media handlers.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn delta_from(self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1920, 1080)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn capped_to(self, viewport: Viewport) -> Self {
        Self {
            width: self.width.min(viewport.width),
            height: self.height.min(viewport.height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_from_subtracts_origin() {
        let delta = Point::new(30.0, -5.0).delta_from(Point::new(10.0, 5.0));
        assert_eq!(delta, Point::new(20.0, -10.0));
    }

    #[test]
    fn frame_size_is_capped_per_axis() {
        let size = FrameSize::new(1280, 720).capped_to(Viewport::new(800, 1000));
        assert_eq!(size, FrameSize::new(800, 720));
    }
}
