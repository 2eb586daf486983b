//! Axis-aligned rectangle geometry for hitboxes and the playfield
//!
//! Screen coordinates: origin at the top-left, +y points down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl Aabb {
    /// Box with its top-left corner at `pos`
    #[inline]
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Box covering `(0, 0)..size`
    #[inline]
    pub fn from_size(size: Vec2) -> Self {
        Self {
            min: Vec2::ZERO,
            max: size,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// True if the two boxes share any area or touch along an edge
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// True if this box lies entirely outside `field`.
    ///
    /// A box touching the field edge still counts as inside, so obstacles can
    /// spawn flush against the top edge.
    #[inline]
    pub fn fully_outside(&self, field: &Aabb) -> bool {
        !self.overlaps(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_and_touch() {
        let a = Aabb::from_pos_size(Vec2::ZERO, Vec2::splat(10.0));
        let b = Aabb::from_pos_size(Vec2::new(5.0, 5.0), Vec2::splat(10.0));
        let touching = Aabb::from_pos_size(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        let apart = Aabb::from_pos_size(Vec2::new(20.1, 0.0), Vec2::splat(10.0));

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(a.overlaps(&touching));
        assert!(!a.overlaps(&apart));
    }

    #[test]
    fn test_fully_outside() {
        let field = Aabb::from_size(Vec2::new(100.0, 200.0));
        // Sitting just above the top edge, bottom flush with it
        let flush = Aabb::from_pos_size(Vec2::new(10.0, -20.0), Vec2::splat(20.0));
        assert!(!flush.fully_outside(&field));

        let below = Aabb::from_pos_size(Vec2::new(10.0, 200.5), Vec2::splat(20.0));
        assert!(below.fully_outside(&field));

        let left = Aabb::from_pos_size(Vec2::new(-30.0, 50.0), Vec2::splat(20.0));
        assert!(left.fully_outside(&field));
    }
}
