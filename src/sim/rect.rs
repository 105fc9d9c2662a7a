//! Axis-aligned rectangles and circles in screen space
//!
//! Screen coordinates: x grows right, y grows down. A rectangle is stored as
//! its four edges so block equality is an exact edge comparison:
//! - x0, x1: left and right
//! - y0, y1: top and bottom
//!
//! Both types are `Copy` values. Movement builds a new value instead of
//! patching a shared one.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x0: f32,
    pub x1: f32,
    pub y0: f32,
    pub y1: f32,
}

impl Rect {
    pub fn new(x0: f32, x1: f32, y0: f32, y1: f32) -> Self {
        Self { x0, x1, y0, y1 }
    }

    /// Build from top-left corner and size
    pub fn from_origin(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, x + width, y, y + height)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x1 - self.width() / 2.0, self.y1 - self.height() / 2.0)
    }

    /// Half width and half height
    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width() / 2.0, self.height() / 2.0)
    }

    /// Same size, moved by (dx, dy)
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x0 + dx, self.x1 + dx, self.y0 + dy, self.y1 + dy)
    }

    /// True if the horizontal extent lies inside [0, width]
    pub fn within_span(&self, width: f32) -> bool {
        self.x0 >= 0.0 && self.x1 <= width
    }
}

/// A circle (the ball body)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn with_center(&self, center: Vec2) -> Self {
        Self {
            center,
            radius: self.radius,
        }
    }

    /// Leftmost, rightmost, top and bottom extents
    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.radius
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.radius
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_geometry() {
        let rect = Rect::from_origin(290.0, 430.0, 60.0, 20.0);
        assert_eq!(rect, Rect::new(290.0, 350.0, 430.0, 450.0));
        assert_eq!(rect.width(), 60.0);
        assert_eq!(rect.height(), 20.0);
        assert_eq!(rect.center(), Vec2::new(320.0, 440.0));
        assert_eq!(rect.half_extents(), Vec2::new(30.0, 10.0));
    }

    #[test]
    fn test_translated_is_a_new_value() {
        let rect = Rect::new(0.0, 40.0, 0.0, 20.0);
        let moved = rect.translated(20.0, 0.0);
        assert_eq!(rect.x0, 0.0);
        assert_eq!(moved, Rect::new(20.0, 60.0, 0.0, 20.0));
    }

    #[test]
    fn test_within_span() {
        assert!(Rect::new(0.0, 640.0, 0.0, 1.0).within_span(640.0));
        assert!(!Rect::new(-1.0, 59.0, 0.0, 1.0).within_span(640.0));
        assert!(!Rect::new(590.0, 650.0, 0.0, 1.0).within_span(640.0));
    }

    #[test]
    fn test_circle_extents() {
        let ball = Circle::new(Vec2::new(100.0, 50.0), 10.0);
        assert_eq!(ball.left(), 90.0);
        assert_eq!(ball.right(), 110.0);
        assert_eq!(ball.top(), 40.0);
        assert_eq!(ball.bottom(), 60.0);
        let moved = ball.with_center(Vec2::new(5.0, 5.0));
        assert_eq!(moved.radius, 10.0);
        assert_eq!(ball.center, Vec2::new(100.0, 50.0));
    }
}
