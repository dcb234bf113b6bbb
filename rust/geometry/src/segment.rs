// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bounded segments and unbounded lines.
//!
//! Segments are immutable value objects: an ordered (start, end) pair with
//! a derived direction and length. Unbounded lines carry an origin and a
//! direction and are used for ray-style queries against faces.

use nalgebra::{Isometry3, Point3, Vector3};

use crate::algebra;
use crate::tolerance::nearly_equal;

/// A bounded straight segment from `start` to `end`.
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
}

impl Segment {
    pub fn new(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self { start, end }
    }

    /// Unit direction from start to end.
    pub fn direction(&self) -> Vector3<f64> {
        (self.end - self.start).normalize()
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Point at `distance` from the start, measured along the segment.
    ///
    /// The distance is not clamped; callers sampling within the extent pass
    /// values in `[0, length]`.
    pub fn point_at(&self, distance: f64) -> Point3<f64> {
        self.start + self.direction() * distance
    }

    pub fn midpoint(&self) -> Point3<f64> {
        algebra::midpoint(&self.start, &self.end)
    }

    /// The same segment flattened onto the XY plane.
    pub fn project_xy(&self) -> Segment {
        Segment::new(algebra::project_xy(&self.start), algebra::project_xy(&self.end))
    }

    /// The segment with start and end swapped.
    pub fn reversed(&self) -> Segment {
        Segment::new(self.end, self.start)
    }

    /// Positional tolerant equality: start matches start and end matches
    /// end. Two segments tracing the same extent in opposite directions do
    /// NOT compare equal here.
    pub fn same_endpoints(&self, other: &Segment) -> bool {
        nearly_equal(&self.start, &other.start) && nearly_equal(&self.end, &other.end)
    }

    /// Whether the segment is degenerate (endpoints coincide within
    /// tolerance).
    pub fn is_degenerate(&self) -> bool {
        nearly_equal(&self.start, &self.end)
    }

    /// Whether the segment runs vertically, irrespective of sign.
    pub fn is_vertical(&self) -> bool {
        let abs_dir = algebra::abs_components(&self.direction());
        nearly_equal(&Point3::from(abs_dir), &Point3::new(0.0, 0.0, 1.0))
    }

    /// The segment transformed by a rigid placement.
    pub fn transformed(&self, placement: &Isometry3<f64>) -> Segment {
        Segment::new(placement * self.start, placement * self.end)
    }

    /// The unbounded line through this segment.
    pub fn to_line(&self) -> Line {
        Line::new(self.start, self.direction())
    }
}

/// An unbounded line through `origin` along `direction`.
#[derive(Debug, Clone, Copy)]
pub struct Line {
    pub origin: Point3<f64>,
    pub direction: Vector3<f64>,
}

impl Line {
    pub fn new(origin: Point3<f64>, direction: Vector3<f64>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Perpendicular distance from a point to this line.
    pub fn distance_to(&self, p: &Point3<f64>) -> f64 {
        (p - self.origin).cross(&self.direction).norm()
    }

    /// Signed parameter of the closest point on the line to `p`.
    pub fn parameter_of(&self, p: &Point3<f64>) -> f64 {
        (p - self.origin).dot(&self.direction)
    }

    pub fn point_at(&self, t: f64) -> Point3<f64> {
        self.origin + self.direction * t
    }
}
