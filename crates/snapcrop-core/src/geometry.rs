//! Geometry primitives shared by the mapper and the crop state machine.
//!
//! # Coordinate System
//!
//! - View-space values (`Point`, `Rect`) are `f64` units of the display surface
//! - Pixel-space values (`PixelSize`, `PixelRect`) are whole source pixels
//! - Origin is the top-left corner, y grows downwards

use serde::{Deserialize, Serialize};

/// A point in view coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in view coordinates.
///
/// Containment is half-open: a point on the right or bottom edge is outside.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// The zero rectangle, meaning "no image loaded" when returned by the mapper.
    pub const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given size centered on `center`.
    pub fn centered_at(center: Point, width: f64, height: f64) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    #[inline]
    pub fn min_x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn min_y(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// True when either side is zero, negative or not a number.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x()
            && point.x < self.max_x()
            && point.y >= self.min_y()
            && point.y < self.max_y()
    }

    /// True when `other` lies entirely inside `self`, allowing `epsilon` of slack.
    pub fn contains_rect(&self, other: &Rect, epsilon: f64) -> bool {
        other.min_x() >= self.min_x() - epsilon
            && other.min_y() >= self.min_y() - epsilon
            && other.max_x() <= self.max_x() + epsilon
            && other.max_y() <= self.max_y() + epsilon
    }

    pub fn offset_by(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// Dimensions of a source image in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
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

/// Crop region in source-image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check that the region is non-empty and fits inside an image of `size`.
    pub fn fits_within(&self, size: PixelSize) -> bool {
        self.width > 0
            && self.height > 0
            && self.x as u64 + self.width as u64 <= size.width as u64
            && self.y as u64 + self.height as u64 <= size.height as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(20.0, 30.0, 100.0, 50.0);
        assert_eq!(r.min_x(), 20.0);
        assert_eq!(r.max_x(), 120.0);
        assert_eq!(r.min_y(), 30.0);
        assert_eq!(r.max_y(), 80.0);
        assert_eq!(r.center(), Point::new(70.0, 55.0));
    }

    #[test]
    fn test_contains_is_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(9.999, 9.999)));
        assert!(!r.contains(Point::new(10.0, 5.0)));
        assert!(!r.contains(Point::new(5.0, 10.0)));
        assert!(!r.contains(Point::new(-0.1, 5.0)));
    }

    #[test]
    fn test_empty_rects() {
        assert!(Rect::ZERO.is_empty());
        assert!(Rect::new(5.0, 5.0, 0.0, 10.0).is_empty());
        assert!(Rect::new(0.0, 0.0, f64::NAN, 10.0).is_empty());
        assert!(!Rect::new(0.0, 0.0, 0.5, 0.5).is_empty());
    }

    #[test]
    fn test_contains_rect_with_epsilon() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(outer.contains_rect(&Rect::new(10.0, 10.0, 90.0, 90.0), 0.0));
        assert!(!outer.contains_rect(&Rect::new(10.0, 10.0, 90.1, 90.0), 0.0));
        assert!(outer.contains_rect(&Rect::new(10.0, 10.0, 90.0 + 1e-9, 90.0), 1e-6));
    }

    #[test]
    fn test_centered_at() {
        let r = Rect::centered_at(Point::new(50.0, 50.0), 20.0, 10.0);
        assert_eq!(r, Rect::new(40.0, 45.0, 20.0, 10.0));
    }

    #[test]
    fn test_pixel_rect_fits_within() {
        let size = PixelSize::new(100, 50);
        assert!(PixelRect::new(0, 0, 100, 50).fits_within(size));
        assert!(!PixelRect::new(1, 0, 100, 50).fits_within(size));
        assert!(!PixelRect::new(0, 0, 0, 10).fits_within(size));
        assert!(!PixelRect::new(u32::MAX, 0, 1, 1).fits_within(size));
    }
}
