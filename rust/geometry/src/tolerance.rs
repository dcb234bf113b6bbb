// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tolerant equality kernel.
//!
//! Every comparison in this crate goes through fixed-precision rounding:
//! two points are equal iff their component-wise rounded difference has
//! zero length, never by comparing raw coordinates.

use nalgebra::{Point3, Vector3};

/// Number of decimal places all comparisons round to.
pub const DECIMAL_PLACES: i32 = 7;

/// Tolerance = 10^-DECIMAL_PLACES.
pub const TOLERANCE: f64 = 1e-7;

/// Rounds a scalar to `places` decimal places, ties to even.
///
/// Ties-to-even keeps values exactly on a rounding midpoint from
/// rounding apart by sign, so symmetric offsets of half the tolerance
/// still compare equal.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

/// Rounds each component of a point to `places` decimal places.
pub fn round_point(p: &Point3<f64>, places: i32) -> Point3<f64> {
    Point3::new(
        round_to(p.x, places),
        round_to(p.y, places),
        round_to(p.z, places),
    )
}

/// Rounds each component of a vector to `places` decimal places.
pub fn round_vector(v: &Vector3<f64>, places: i32) -> Vector3<f64> {
    Vector3::new(
        round_to(v.x, places),
        round_to(v.y, places),
        round_to(v.z, places),
    )
}

/// Whether a vector's magnitude is below tolerance.
pub fn is_zero_length(v: &Vector3<f64>) -> bool {
    v.norm() < TOLERANCE
}

/// Tolerant point equality: round both points, then test the difference
/// for zero length.
pub fn nearly_equal(p1: &Point3<f64>, p2: &Point3<f64>) -> bool {
    let a = round_point(p1, DECIMAL_PLACES);
    let b = round_point(p2, DECIMAL_PLACES);
    is_zero_length(&(a - b))
}

/// Whether a scalar rounds to zero at the configured precision.
pub fn rounds_to_zero(value: f64) -> bool {
    round_to(value, DECIMAL_PLACES) == 0.0
}

/// Hashable key for a point under tolerant equality.
///
/// Points that compare equal via [`nearly_equal`] map to the same key, so
/// sets of keys count distinct vertices without pairwise comparison.
pub fn point_key(p: &Point3<f64>) -> (i64, i64, i64) {
    let factor = 10f64.powi(DECIMAL_PLACES);
    (
        (p.x * factor).round_ties_even() as i64,
        (p.y * factor).round_ties_even() as i64,
        (p.z * factor).round_ties_even() as i64,
    )
}
