//! Axis-aligned rectangles in the logical coordinate space
//!
//! Tap hitboxes are rectangles. Contact is strict: a pointer resting exactly
//! on an edge is outside, so a finger parked on the border can't flicker
//! between pouring and not pouring.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A rectangle with its origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Zero or negative extent (or non-finite geometry)
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
            || !self.x.is_finite()
            || !self.y.is_finite()
            || !self.right().is_finite()
            || !self.bottom().is_finite()
    }

    /// Check if a point lies strictly inside (edges excluded).
    ///
    /// Degenerate rectangles contain nothing.
    pub fn contains_strict(&self, point: Vec2) -> bool {
        if self.is_degenerate() {
            return false;
        }
        point.x > self.x && point.x < self.right() && point.y > self.y && point.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_interior_point() {
        let rect = Rect::new(250.0, 180.0, 100.0, 250.0);
        assert!(rect.contains_strict(Vec2::new(300.0, 200.0)));
        assert!(rect.contains_strict(rect.center()));
    }

    #[test]
    fn test_edges_are_outside() {
        let rect = Rect::new(250.0, 180.0, 100.0, 250.0);
        assert!(!rect.contains_strict(Vec2::new(250.0, 200.0))); // left edge
        assert!(!rect.contains_strict(Vec2::new(350.0, 200.0))); // right edge
        assert!(!rect.contains_strict(Vec2::new(300.0, 180.0))); // top edge
        assert!(!rect.contains_strict(Vec2::new(300.0, 430.0))); // bottom edge
        assert!(!rect.contains_strict(Vec2::new(250.0, 180.0))); // corner
    }

    #[test]
    fn test_outside_points() {
        let rect = Rect::new(250.0, 180.0, 100.0, 250.0);
        assert!(!rect.contains_strict(Vec2::new(100.0, 200.0)));
        assert!(!rect.contains_strict(Vec2::new(300.0, 500.0)));
    }

    #[test]
    fn test_degenerate_contains_nothing() {
        let flat = Rect::new(10.0, 10.0, 0.0, 50.0);
        assert!(flat.is_degenerate());
        assert!(!flat.contains_strict(Vec2::new(10.0, 20.0)));

        let thin = Rect::new(10.0, 10.0, 50.0, 0.0);
        assert!(!thin.contains_strict(Vec2::new(20.0, 10.0)));

        let inverted = Rect::new(10.0, 10.0, -5.0, 20.0);
        assert!(!inverted.contains_strict(Vec2::new(8.0, 15.0)));

        let nan = Rect::new(f32::NAN, 0.0, 10.0, 10.0);
        assert!(!nan.contains_strict(Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn test_nan_point_is_outside() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!rect.contains_strict(Vec2::new(f32::NAN, 5.0)));
    }
}
