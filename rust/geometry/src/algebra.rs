// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vector and point algebra built on the tolerant equality kernel.

use nalgebra::{Point3, Vector3};

use crate::tolerance::{self, is_zero_length};

/// Whether two vectors are parallel (collinear directions).
///
/// The cross product of parallel vectors is the zero vector. Magnitude and
/// orientation play no role, so antiparallel vectors count as parallel.
pub fn is_parallel(v1: &Vector3<f64>, v2: &Vector3<f64>) -> bool {
    is_zero_length(&v1.cross(v2))
}

/// Whether two vectors are perpendicular: their dot product rounds to zero.
pub fn is_perpendicular(v1: &Vector3<f64>, v2: &Vector3<f64>) -> bool {
    tolerance::rounds_to_zero(v1.dot(v2))
}

/// Projects a point onto the XY plane by zeroing its Z component.
pub fn project_xy(p: &Point3<f64>) -> Point3<f64> {
    Point3::new(p.x, p.y, 0.0)
}

/// Clockwise 90-degree rotation of a 2D unit vector in the XY plane.
pub fn perpendicular_cw(v: &Vector3<f64>) -> Vector3<f64> {
    Vector3::new(-v.y, v.x, 0.0)
}

/// Counter-clockwise 90-degree rotation of a 2D unit vector in the XY plane.
pub fn perpendicular_ccw(v: &Vector3<f64>) -> Vector3<f64> {
    Vector3::new(v.y, -v.x, 0.0)
}

/// Component-wise absolute value, used to test vector verticality
/// irrespective of sign.
pub fn abs_components(v: &Vector3<f64>) -> Vector3<f64> {
    Vector3::new(v.x.abs(), v.y.abs(), v.z.abs())
}

/// Arithmetic mean of a point set.
///
/// Returns `None` for an empty slice.
pub fn centroid(points: &[Point3<f64>]) -> Option<Point3<f64>> {
    if points.is_empty() {
        return None;
    }
    let mut sum = Vector3::zeros();
    for p in points {
        sum += p.coords;
    }
    Some(Point3::from(sum / points.len() as f64))
}

/// Midpoint of two points.
pub fn midpoint(a: &Point3<f64>, b: &Point3<f64>) -> Point3<f64> {
    Point3::from((a.coords + b.coords) / 2.0)
}
