//! Vector helpers and axis-aligned overlap tests.

use glam::Vec2;

/// Unit vector pointing along `v`, or `v` itself when it has zero length.
#[inline]
pub fn normalize(v: Vec2) -> Vec2 {
    v.normalize_or_zero()
}

/// Axis-aligned bounding box stored as centre + half extents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half: Vec2) -> Self {
        Self { center, half }
    }

    /// Box of a square entity with side `size`.
    pub fn square(center: Vec2, size: f32) -> Self {
        Self::new(center, Vec2::splat(size / 2.0))
    }

    /// Bounding box of a circle of `radius`.
    pub fn circle(center: Vec2, radius: f32) -> Self {
        Self::new(center, Vec2::splat(radius))
    }

    /// Strict overlap: boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        let d = (self.center - other.center).abs();
        let reach = self.half + other.half;
        d.x < reach.x && d.y < reach.y
    }
}
