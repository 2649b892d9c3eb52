//! Axis-aligned rectangles used for collision
//!
//! Screen-space convention: origin at top-left, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned hitbox (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RectHitbox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectHitbox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build from a top-left corner and a size
    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self::new(min.x, min.y, size.x, size.y)
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Zero or negative extent on either axis
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Shrink by `pad` on every side. Extents never go below zero.
    pub fn inset(&self, pad: f32) -> Self {
        let size = (self.size() - Vec2::splat(pad * 2.0)).max(Vec2::ZERO);
        Self::from_min_size(self.min() + Vec2::splat(pad), size)
    }

    /// Strict overlap: boxes sharing only an edge do not intersect.
    ///
    /// This is the gameplay predicate.
    #[inline]
    pub fn intersects(&self, other: &RectHitbox) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    /// Inclusive overlap: shared edges count.
    ///
    /// For debug overlays only, never for hit tests.
    #[inline]
    pub fn touches(&self, other: &RectHitbox) -> bool {
        self.x <= other.x + other.width
            && self.x + self.width >= other.x
            && self.y <= other.y + other.height
            && self.y + self.height >= other.y
    }
}
