//! Axis-aligned box geometry for the skater, bricks and gems
//!
//! Every entity is a box centered on its position:
//! - center: entity position (y grows upward, origin at bottom-left)
//! - size: full width and height

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.size / 2.0
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents()
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents()
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min().x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max().x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min().y
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.max().y
    }

    /// Overlap on each axis (negative on an axis means separated)
    pub fn overlap(&self, other: &Aabb) -> Vec2 {
        let reach = self.half_extents() + other.half_extents();
        reach - (self.center - other.center).abs()
    }

    /// Strict intersection; touching edges do not count
    pub fn intersects(&self, other: &Aabb) -> bool {
        let o = self.overlap(other);
        o.x > 0.0 && o.y > 0.0
    }

    /// Whether the horizontal spans overlap
    pub fn spans_x(&self, other: &Aabb) -> bool {
        self.overlap(other).x > 0.0
    }
}
