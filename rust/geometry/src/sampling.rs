// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Segment subdivision into evenly spaced points.

use nalgebra::Point3;

use crate::error::{Error, Result};
use crate::segment::Segment;
use crate::tolerance;

/// Remainder and endpoint policy for [`divide_by_distance`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DivideOptions {
    /// When the segment length is not a whole multiple of the distance,
    /// recompute the spacing so the points distribute evenly with no
    /// leftover fragment.
    pub eliminate_remainder: bool,
    /// Prepend the segment start point to the result.
    pub append_start: bool,
    /// Append the segment end point to the result.
    pub append_end: bool,
}

/// Subdivides a segment into points spaced `distance` apart from the
/// start.
///
/// A point that would coincide with the segment end is dropped. When the
/// remainder is kept (not eliminated), the implied final interval is
/// shorter than `distance`.
pub fn divide_by_distance(
    segment: &Segment,
    distance: f64,
    options: &DivideOptions,
) -> Result<Vec<Point3<f64>>> {
    if distance <= 0.0 {
        return Err(Error::InvalidDistance(distance));
    }

    let length = segment.length();
    let mut spacing = distance;
    // Round the quotient before flooring so float noise in an exact
    // multiple does not shed an interval.
    let whole = |len: f64, step: f64| {
        tolerance::round_to(len / step, tolerance::DECIMAL_PLACES).floor() as i64
    };
    let mut count = whole(length, spacing);
    // Measure the leftover against the rounded count, so a length a hair
    // under an exact multiple leaves the same (zero) remainder as the
    // multiple itself.
    let remainder = length - count as f64 * spacing;

    if tolerance::rounds_to_zero(remainder) {
        // The last generated point would duplicate the end point
        count -= 1;
    } else if options.eliminate_remainder && count > 0 {
        spacing = length / count as f64;
        count = whole(length, spacing) - 1;
    }

    let mut points = Vec::new();
    let mut cumulative = 0.0;
    for _ in 0..count {
        cumulative += spacing;
        points.push(segment.point_at(cumulative));
    }

    if options.append_start {
        points.insert(0, segment.start);
    }
    if options.append_end {
        points.push(segment.end);
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tolerance::nearly_equal;
    use nalgebra::Point3;

    fn x_segment(length: f64) -> Segment {
        Segment::new(Point3::new(0.0, 0.0, 0.0), Point3::new(length, 0.0, 0.0))
    }

    #[test]
    fn test_exact_multiple_drops_endpoint() {
        let points =
            divide_by_distance(&x_segment(12.0), 3.0, &DivideOptions::default()).unwrap();
        assert_eq!(points.len(), 3);
        for (i, expected) in [3.0, 6.0, 9.0].iter().enumerate() {
            assert!(nearly_equal(&points[i], &Point3::new(*expected, 0.0, 0.0)));
        }
    }

    #[test]
    fn test_near_multiple_drops_duplicate_endpoint() {
        // Just shy of an exact multiple: the fourth point would coincide
        // with the segment end within tolerance and must be dropped
        let seg = x_segment(12.0 - 1e-10);
        let points = divide_by_distance(&seg, 3.0, &DivideOptions::default()).unwrap();
        assert_eq!(points.len(), 3);
        assert!(!nearly_equal(points.last().unwrap(), &seg.end));
    }

    #[test]
    fn test_remainder_kept() {
        let points =
            divide_by_distance(&x_segment(10.0), 3.0, &DivideOptions::default()).unwrap();
        // 3 intervals fit; points at 3, 6, 9 with an implied 1-unit tail
        assert_eq!(points.len(), 3);
        assert!(nearly_equal(&points[2], &Point3::new(9.0, 0.0, 0.0)));
    }

    #[test]
    fn test_remainder_eliminated() {
        let options = DivideOptions {
            eliminate_remainder: true,
            ..Default::default()
        };
        let points = divide_by_distance(&x_segment(10.0), 3.0, &options).unwrap();
        // Spacing becomes 10/3; two interior points at 10/3 and 20/3
        assert_eq!(points.len(), 2);
        assert!(nearly_equal(&points[0], &Point3::new(10.0 / 3.0, 0.0, 0.0)));
        assert!(nearly_equal(&points[1], &Point3::new(20.0 / 3.0, 0.0, 0.0)));
    }

    #[test]
    fn test_append_endpoints() {
        let options = DivideOptions {
            append_start: true,
            append_end: true,
            ..Default::default()
        };
        let points = divide_by_distance(&x_segment(12.0), 3.0, &options).unwrap();
        assert_eq!(points.len(), 5);
        assert!(nearly_equal(&points[0], &Point3::new(0.0, 0.0, 0.0)));
        assert!(nearly_equal(&points[4], &Point3::new(12.0, 0.0, 0.0)));
    }

    #[test]
    fn test_invalid_distance() {
        assert!(matches!(
            divide_by_distance(&x_segment(5.0), 0.0, &DivideOptions::default()),
            Err(Error::InvalidDistance(_))
        ));
    }
}
