//! Axis-aligned collision primitives
//!
//! Everything here works on boxes anchored at their top-left corner, with y
//! growing downward. `distance_between` measures corner to corner rather than
//! box to box: it is the cheap cull pre-filter the platform step runs before
//! any real overlap math, not exact geometry.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// X coordinate of the right edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Y coordinate of the bottom edge
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Inclusive AABB overlap test; touching edges count as overlap.
#[inline]
pub fn boxes_overlap(a: &Aabb, b: &Aabb) -> bool {
    a.right() >= b.pos.x && a.pos.x <= b.right() && a.bottom() >= b.pos.y && a.pos.y <= b.bottom()
}

/// Inclusive point-in-box test.
#[inline]
pub fn point_in_box(p: Vec2, b: &Aabb) -> bool {
    p.x >= b.pos.x && p.x <= b.right() && p.y >= b.pos.y && p.y <= b.bottom()
}

/// Distance between two boxes' top-left corners.
#[inline]
pub fn distance_between(a: &Aabb, b: &Aabb) -> f32 {
    (b.pos - a.pos).length()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn aabb(x: f32, y: f32, w: f32, h: f32) -> Aabb {
        Aabb::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_overlap_basic() {
        let a = aabb(0.0, 0.0, 10.0, 10.0);
        let b = aabb(5.0, 5.0, 10.0, 10.0);
        assert!(boxes_overlap(&a, &b));

        let c = aabb(20.0, 20.0, 5.0, 5.0);
        assert!(!boxes_overlap(&a, &c));
    }

    #[test]
    fn test_touching_edges_count_as_overlap() {
        let a = aabb(0.0, 0.0, 10.0, 10.0);
        // Shares only the x = 10 edge
        let b = aabb(10.0, 0.0, 10.0, 10.0);
        assert!(boxes_overlap(&a, &b));
        // Shares only the corner at (10, 10)
        let c = aabb(10.0, 10.0, 10.0, 10.0);
        assert!(boxes_overlap(&a, &c));
    }

    #[test]
    fn test_overlap_reflexive() {
        let a = aabb(3.0, 4.0, 7.0, 2.0);
        assert!(boxes_overlap(&a, &a));
    }

    #[test]
    fn test_point_in_box_edges_inclusive() {
        let b = aabb(0.0, 0.0, 10.0, 10.0);
        assert!(point_in_box(Vec2::new(0.0, 0.0), &b));
        assert!(point_in_box(Vec2::new(10.0, 10.0), &b));
        assert!(point_in_box(Vec2::new(5.0, 10.0), &b));
        assert!(!point_in_box(Vec2::new(10.1, 5.0), &b));
        assert!(!point_in_box(Vec2::new(5.0, -0.1), &b));
    }

    #[test]
    fn test_distance_uses_corners() {
        let a = aabb(0.0, 0.0, 100.0, 100.0);
        let b = aabb(3.0, 4.0, 1.0, 1.0);
        // Corner distance, regardless of how much the boxes overlap
        assert!((distance_between(&a, &b) - 5.0).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            aw in 0.0f32..200.0, ah in 0.0f32..200.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            bw in 0.0f32..200.0, bh in 0.0f32..200.0,
        ) {
            let a = aabb(ax, ay, aw, ah);
            let b = aabb(bx, by, bw, bh);
            prop_assert_eq!(boxes_overlap(&a, &b), boxes_overlap(&b, &a));
        }

        #[test]
        fn distance_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
        ) {
            let a = aabb(ax, ay, 10.0, 10.0);
            let b = aabb(bx, by, 10.0, 10.0);
            prop_assert!((distance_between(&a, &b) - distance_between(&b, &a)).abs() < 1e-3);
        }

        #[test]
        fn box_corners_are_inside(
            x in -500.0f32..500.0, y in -500.0f32..500.0,
            w in 0.0f32..200.0, h in 0.0f32..200.0,
        ) {
            let b = aabb(x, y, w, h);
            prop_assert!(point_in_box(b.pos, &b));
            prop_assert!(point_in_box(Vec2::new(b.right(), b.bottom()), &b));
        }
    }
}
