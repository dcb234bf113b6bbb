// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pairwise segment relationship classification.
//!
//! Relationships are defined over geometric extents, not parametric
//! domains: two segments tracing the same extent in opposite directions
//! are Equal. All comparisons are tolerant (see [`crate::tolerance`]).

use nalgebra::Point3;
use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::segment::Segment;
use crate::tolerance::{nearly_equal, TOLERANCE};
use crate::{algebra, tolerance};

/// Qualitative intersection classification between two segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// The extents share no point.
    Disjoint,
    /// The extents cross at a single point or share a partial sub-length
    /// without either containing the other.
    Overlap,
    /// The first extent lies entirely inside the second.
    Subset,
    /// The second extent lies entirely inside the first.
    Superset,
    /// Both endpoints coincide, in either order.
    Equal,
}

/// Classifies the relationship between two bounded segments.
pub fn classify(a: &Segment, b: &Segment) -> Relation {
    if algebra::is_parallel(&a.direction(), &b.direction()) {
        classify_parallel(a, b)
    } else {
        classify_skew(a, b)
    }
}

/// Whether two segments share at least one point.
pub fn intersects(a: &Segment, b: &Segment) -> bool {
    classify(a, b) != Relation::Disjoint
}

/// Whether two segments trace the same physical edge (relation is exactly
/// Equal).
pub fn coincident(a: &Segment, b: &Segment) -> bool {
    classify(a, b) == Relation::Equal
}

/// The single point where two segments intersect.
///
/// `None` when the segments are disjoint, or when they share a
/// non-degenerate sub-length and therefore have no single intersection
/// point.
pub fn intersection_point(a: &Segment, b: &Segment) -> Option<Point3<f64>> {
    if algebra::is_parallel(&a.direction(), &b.direction()) {
        collinear_touch_point(a, b)
    } else {
        skew_crossing_point(a, b)
    }
}

/// Given two segments that intersect at a single point, whether that point
/// coincides with any of the four endpoints.
///
/// Fails with [`Error::NoPointIntersection`] when the segments are
/// disjoint or share a sub-length instead of a point.
pub fn intersects_at_endpoint(a: &Segment, b: &Segment) -> Result<bool> {
    let point = intersection_point(a, b).ok_or(Error::NoPointIntersection)?;

    let endpoints: SmallVec<[Point3<f64>; 4]> =
        SmallVec::from_buf([a.start, a.end, b.start, b.end]);

    Ok(endpoints.iter().any(|p| nearly_equal(p, &point)))
}

fn classify_parallel(a: &Segment, b: &Segment) -> Relation {
    let line = a.to_line();
    if line.distance_to(&b.start) >= TOLERANCE {
        return Relation::Disjoint;
    }

    // Both extents live on one carrier line; compare parameter intervals
    // measured from a.start.
    let len_a = a.length();
    let s0 = line.parameter_of(&b.start);
    let s1 = line.parameter_of(&b.end);
    let (lo, hi) = if s0 <= s1 { (s0, s1) } else { (s1, s0) };

    if hi < -TOLERANCE || lo > len_a + TOLERANCE {
        return Relation::Disjoint;
    }

    let starts_match = tolerance::rounds_to_zero(lo);
    let ends_match = tolerance::rounds_to_zero(hi - len_a);
    if starts_match && ends_match {
        return Relation::Equal;
    }
    if lo >= -TOLERANCE && hi <= len_a + TOLERANCE {
        return Relation::Superset;
    }
    if lo <= TOLERANCE && hi >= len_a - TOLERANCE {
        return Relation::Subset;
    }

    Relation::Overlap
}

fn classify_skew(a: &Segment, b: &Segment) -> Relation {
    match closest_parameters(a, b) {
        Some((s, t)) => {
            let within_a = (-TOLERANCE..=a.length() + TOLERANCE).contains(&s);
            let within_b = (-TOLERANCE..=b.length() + TOLERANCE).contains(&t);
            if within_a && within_b {
                Relation::Overlap
            } else {
                Relation::Disjoint
            }
        }
        None => Relation::Disjoint,
    }
}

/// Closest-approach parameters of the two carrier lines, or `None` when
/// the lines pass farther apart than tolerance (skew in 3D).
fn closest_parameters(a: &Segment, b: &Segment) -> Option<(f64, f64)> {
    let d1 = a.direction();
    let d2 = b.direction();
    let w0 = a.start - b.start;

    let dot = d1.dot(&d2);
    let d = d1.dot(&w0);
    let e = d2.dot(&w0);
    let denom = 1.0 - dot * dot;

    // Caller has excluded parallel directions, so denom is bounded away
    // from zero.
    let s = (dot * e - d) / denom;
    let t = (e - dot * d) / denom;

    let gap = (a.start + d1 * s) - (b.start + d2 * t);
    if tolerance::is_zero_length(&gap) {
        Some((s, t))
    } else {
        None
    }
}

fn skew_crossing_point(a: &Segment, b: &Segment) -> Option<Point3<f64>> {
    let (s, t) = closest_parameters(a, b)?;
    let within_a = (-TOLERANCE..=a.length() + TOLERANCE).contains(&s);
    let within_b = (-TOLERANCE..=b.length() + TOLERANCE).contains(&t);
    if within_a && within_b {
        Some(algebra::midpoint(&a.point_at(s), &b.point_at(t)))
    } else {
        None
    }
}

/// For collinear segments, the single endpoint where the extents touch.
///
/// An extended shared sub-length has no single point and yields `None`.
fn collinear_touch_point(a: &Segment, b: &Segment) -> Option<Point3<f64>> {
    let line = a.to_line();
    if line.distance_to(&b.start) >= TOLERANCE {
        return None;
    }

    let len_a = a.length();
    let s0 = line.parameter_of(&b.start);
    let s1 = line.parameter_of(&b.end);
    let (lo, hi) = if s0 <= s1 { (s0, s1) } else { (s1, s0) };

    if hi < -TOLERANCE || lo > len_a + TOLERANCE {
        return None;
    }
    if tolerance::rounds_to_zero(hi) {
        return Some(a.start);
    }
    if tolerance::rounds_to_zero(lo - len_a) {
        return Some(a.end);
    }

    None
}
