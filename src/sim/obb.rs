//! Oriented bounding boxes and the Separating Axis Theorem
//!
//! Every actor collides as a rectangle with a center, half extents and a
//! rotation. Two boxes are disjoint iff some edge normal of either box
//! separates their projections.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::rotate;

/// Closed 1D range produced by projecting a box onto an axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.max - self.min
    }

    /// Empty iff `max <= min`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length() <= 0.0
    }

    /// Strict overlap: intervals that only share an endpoint do not overlap,
    /// and an empty interval overlaps nothing.
    pub fn overlaps(&self, other: &Interval) -> bool {
        !self.is_empty() && !other.is_empty() && self.min < other.max && other.min < self.max
    }

    /// The shared part of two overlapping intervals
    pub fn overlap(&self, other: &Interval) -> Option<Interval> {
        if self.overlaps(other) {
            Some(Interval::new(
                self.min.max(other.min),
                self.max.min(other.max),
            ))
        } else {
            None
        }
    }
}

/// Oriented bounding box
///
/// `angle` rotates the box counter-clockwise around its center. The same
/// angle is used for vertex generation and for [`Obb::translate`], so moving
/// "forward" in local space always follows the box's visual heading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obb {
    pub center: Vec2,
    half_size: Vec2,
    /// Rotation in radians (not normalized)
    pub angle: f32,
}

impl Obb {
    /// Create a box. Panics on negative or non-finite half extents.
    pub fn new(center: Vec2, half_size: Vec2, angle: f32) -> Self {
        assert!(
            half_size.is_finite() && half_size.x >= 0.0 && half_size.y >= 0.0,
            "OBB half extents must be finite and non-negative, got {half_size}"
        );
        Self {
            center,
            half_size,
            angle,
        }
    }

    /// Axis-aligned box from full width and height
    pub fn from_size(center: Vec2, width: f32, height: f32) -> Self {
        Self::new(center, Vec2::new(width, height) * 0.5, 0.0)
    }

    #[inline]
    pub fn half_size(&self) -> Vec2 {
        self.half_size
    }

    /// Local x axis (the box's heading) in world space
    #[inline]
    pub fn axis_x(&self) -> Vec2 {
        Vec2::new(self.angle.cos(), self.angle.sin())
    }

    /// Local y axis in world space
    #[inline]
    pub fn axis_y(&self) -> Vec2 {
        self.axis_x().perp()
    }

    /// Corners, starting at local (+x, +y) and walking clockwise in local space
    pub fn vertices(&self) -> [Vec2; 4] {
        let ex = self.axis_x() * self.half_size.x;
        let ey = self.axis_y() * self.half_size.y;
        let c = self.center;
        [c + ex + ey, c + ex - ey, c - ex - ey, c - ex + ey]
    }

    /// Edges as vertex pairs, in vertex order
    pub fn edges(&self) -> [(Vec2, Vec2); 4] {
        let v = self.vertices();
        [(v[0], v[1]), (v[1], v[2]), (v[2], v[3]), (v[3], v[0])]
    }

    /// Outward unit normals of the four edges, matching [`Obb::edges`]
    ///
    /// Derived from the rotation rather than the edge vectors so a degenerate
    /// (zero-extent) box still has well-defined normals.
    pub fn normals(&self) -> [Vec2; 4] {
        let x = self.axis_x();
        let y = self.axis_y();
        [x, -y, -x, y]
    }

    /// The two unique separating-axis candidates of this box
    #[inline]
    pub fn axes(&self) -> [Vec2; 2] {
        [self.axis_x(), self.axis_y()]
    }

    /// Project all vertices onto `axis`
    pub fn project(&self, axis: Vec2) -> Interval {
        self.vertices()
            .iter()
            .map(|v| v.dot(axis))
            .fold(Interval::new(f32::INFINITY, f32::NEG_INFINITY), |acc, p| {
                Interval::new(acc.min.min(p), acc.max.max(p))
            })
    }

    /// Move by a delta expressed in the box's local frame
    pub fn translate(&mut self, local_delta: Vec2) {
        self.center += rotate(local_delta, self.angle);
    }

    /// Move by a world-space delta, ignoring rotation
    pub fn shift(&mut self, world_delta: Vec2) {
        self.center += world_delta;
    }

    /// Rotate in place around the center
    pub fn rotate_by(&mut self, delta: f32) {
        self.angle += delta;
    }

    /// Whether the disc at `point` with `radius` reaches into the box
    pub fn intersects_circle(&self, point: Vec2, radius: f32) -> bool {
        let local = rotate(point - self.center, -self.angle);
        let closest = local.clamp(-self.half_size, self.half_size);
        local.distance_squared(closest) < radius * radius
    }
}

/// SAT overlap test
///
/// Checks the axes of both boxes and stops at the first separating one.
/// Boxes whose projections only touch on every axis are reported as disjoint.
pub fn are_colliding(a: &Obb, b: &Obb) -> bool {
    a.axes()
        .into_iter()
        .chain(b.axes())
        .all(|axis| a.project(axis).overlaps(&b.project(axis)))
}
