// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Closed-loop detection, repair, and boundary splicing.
//!
//! Detection functions return boolean verdicts on best-effort geometric
//! evidence and never fail. Repair returns `None` when no continuous
//! ordering exists, so callers can present "no valid boundary" as a
//! normal outcome.

use nalgebra::Point3;
use rustc_hash::FxHashSet;

use crate::error::{Error, Result};
use crate::segment::Segment;
use crate::tolerance::{nearly_equal, point_key};
use crate::relation;

/// Whether the segments form a closed loop: the count of distinct
/// endpoints (under tolerant equality) equals the segment count, i.e.
/// every vertex is shared by exactly two segments.
pub fn is_closed_loop(segments: &[Segment]) -> bool {
    let unique: FxHashSet<_> = segments
        .iter()
        .flat_map(|s| [point_key(&s.start), point_key(&s.end)])
        .collect();
    unique.len() == segments.len()
}

/// Whether consecutive segments connect end-to-start in order.
///
/// False for zero or one segment. With `closed_loop`, the last segment's
/// end must additionally meet the first segment's start.
pub fn are_continuous(segments: &[Segment], closed_loop: bool) -> bool {
    if segments.len() <= 1 {
        return false;
    }

    for pair in segments.windows(2) {
        if !nearly_equal(&pair[0].end, &pair[1].start) {
            return false;
        }
    }

    if closed_loop {
        let last = &segments[segments.len() - 1];
        let first = &segments[0];
        return nearly_equal(&last.end, &first.start);
    }

    true
}

/// Reorders unordered segments into a continuous chain by greedy
/// first-match search.
///
/// Starting from the first input segment, repeatedly scans the remaining
/// pool for any segment whose start meets the current end. `None` when no
/// continuation exists at some step. The scan takes the first match and
/// never backtracks, so a pool admitting several valid continuations at a
/// vertex silently resolves to one of them.
pub fn make_continuous(segments: &[Segment]) -> Option<Vec<Segment>> {
    if segments.len() <= 1 {
        return None;
    }

    let mut ordered = vec![segments[0]];

    for _ in 0..segments.len() - 1 {
        let current = *ordered.last().expect("chain starts non-empty");

        let next = segments
            .iter()
            .filter(|candidate| !candidate.same_endpoints(&current))
            .find(|candidate| nearly_equal(&current.end, &candidate.start));

        match next {
            Some(seg) => ordered.push(*seg),
            None => return None,
        }
    }

    Some(ordered)
}

/// Whether any pair of segments intersects at a point that is not an
/// endpoint of either. Used as a validity gate before boundary creation:
/// loops with interior (non-vertex) crossings are rejected.
pub fn has_interior_intersection(segments: &[Segment]) -> bool {
    for (i, seg) in segments.iter().enumerate() {
        let crossed = segments
            .iter()
            .enumerate()
            .filter(|(j, other)| *j != i && !other.same_endpoints(seg))
            .any(|(_, other)| {
                // A collinear shared sub-length has no single intersection
                // point; it still disqualifies the loop.
                relation::intersects(other, seg)
                    && !relation::intersects_at_endpoint(other, seg).unwrap_or(false)
            });

        if crossed {
            return true;
        }
    }

    false
}

/// Creates bound segments between consecutive points.
///
/// With exactly two points, a single segment. With more, the loop closes
/// with a final segment from the last point back to the first. Fewer than
/// two points is an invalid-input error.
pub fn loop_from_points(points: &[Point3<f64>]) -> Result<Vec<Segment>> {
    if points.len() < 2 {
        return Err(Error::TooFewPoints(points.len()));
    }

    if points.len() == 2 {
        return Ok(vec![Segment::new(points[0], points[1])]);
    }

    let mut segments = Vec::with_capacity(points.len());
    for i in 0..points.len() {
        let j = (i + 1) % points.len();
        segments.push(Segment::new(points[i], points[j]));
    }

    Ok(segments)
}

/// A group of points to splice into a boundary along one of its edges,
/// e.g. a door threshold's four corners.
#[derive(Debug, Clone)]
pub struct BoundaryInsertion {
    /// Index of the base-loop edge the points attach to.
    pub edge_index: usize,
    /// Inserted points, already ordered to trace the detour.
    pub points: Vec<Point3<f64>>,
}

/// Splices point groups into a base loop, producing the point sequence of
/// a composite boundary.
///
/// Walks the base edges in vertex order; each edge contributes its start
/// point followed by the point groups attached to it, ordered by the
/// distance of each group's first point from the edge start. Feeding the
/// result to [`loop_from_points`] yields a continuous loop that dents the
/// base boundary at every insertion.
pub fn splice_boundary(
    base: &[Segment],
    insertions: &[BoundaryInsertion],
) -> Result<Vec<Point3<f64>>> {
    for ins in insertions {
        if ins.edge_index >= base.len() {
            return Err(Error::InsertionOutOfRange {
                index: ins.edge_index,
                edges: base.len(),
            });
        }
    }

    let mut points = Vec::new();

    for (i, edge) in base.iter().enumerate() {
        points.push(edge.start);

        let mut on_edge: Vec<&BoundaryInsertion> = insertions
            .iter()
            .filter(|ins| ins.edge_index == i && !ins.points.is_empty())
            .collect();
        on_edge.sort_by(|a, b| {
            let da = (a.points[0] - edge.start).norm();
            let db = (b.points[0] - edge.start).norm();
            da.partial_cmp(&db).expect("finite distances")
        });

        for ins in on_edge {
            points.extend_from_slice(&ins.points);
        }
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> Point3<f64> {
        Point3::new(x, y, 0.0)
    }

    fn triangle_closed() -> Vec<Segment> {
        vec![
            Segment::new(pt(0.0, 0.0), pt(5.0, 0.0)),
            Segment::new(pt(5.0, 0.0), pt(5.0, 5.0)),
            Segment::new(pt(5.0, 5.0), pt(0.0, 0.0)),
        ]
    }

    fn polyline_open() -> Vec<Segment> {
        vec![
            Segment::new(pt(0.0, 0.0), pt(5.0, 0.0)),
            Segment::new(pt(5.0, 0.0), pt(5.0, 5.0)),
            Segment::new(pt(5.0, 5.0), pt(0.0, 5.0)),
        ]
    }

    #[test]
    fn test_is_closed_loop() {
        assert!(is_closed_loop(&triangle_closed()));
        // Open polyline: 3 segments but 4 distinct vertices
        assert!(!is_closed_loop(&polyline_open()));
    }

    #[test]
    fn test_are_continuous() {
        assert!(are_continuous(&triangle_closed(), true));
        assert!(are_continuous(&polyline_open(), false));
        assert!(!are_continuous(&polyline_open(), true));

        let shuffled = vec![triangle_closed()[0], triangle_closed()[2], triangle_closed()[1]];
        assert!(!are_continuous(&shuffled, true));

        assert!(!are_continuous(&[], false));
        assert!(!are_continuous(&triangle_closed()[..1], false));
    }

    #[test]
    fn test_make_continuous_reorders() {
        let square = vec![
            Segment::new(pt(0.0, 0.0), pt(5.0, 0.0)),
            Segment::new(pt(5.0, 5.0), pt(0.0, 5.0)),
            Segment::new(pt(5.0, 0.0), pt(5.0, 5.0)),
            Segment::new(pt(0.0, 5.0), pt(0.0, 0.0)),
        ];
        let ordered = make_continuous(&square).unwrap();
        assert_eq!(ordered.len(), 4);
        assert!(are_continuous(&ordered, true));
    }

    #[test]
    fn test_make_continuous_fails_on_disconnected() {
        let disconnected = vec![
            Segment::new(pt(0.0, 0.0), pt(5.0, 0.0)),
            Segment::new(pt(5.0, 0.0), pt(5.0, 5.0)),
            Segment::new(pt(25.0, 7.0), pt(23.0, 9.0)),
        ];
        assert!(make_continuous(&disconnected).is_none());
        assert!(make_continuous(&[]).is_none());
    }

    #[test]
    fn test_interior_intersection_gate() {
        let mut rectangle = vec![
            Segment::new(pt(0.0, 0.0), pt(6.0, 0.0)),
            Segment::new(pt(6.0, 0.0), pt(6.0, 4.0)),
            Segment::new(pt(6.0, 4.0), pt(0.0, 4.0)),
            Segment::new(pt(0.0, 4.0), pt(0.0, 0.0)),
        ];
        assert!(!has_interior_intersection(&rectangle));

        // A chord crossing two opposite sides at their midpoints
        rectangle.push(Segment::new(pt(3.0, -1.0), pt(3.0, 5.0)));
        assert!(has_interior_intersection(&rectangle));
    }

    #[test]
    fn test_loop_from_points() {
        let two = loop_from_points(&[pt(0.0, 0.0), pt(5.0, 0.0)]).unwrap();
        assert_eq!(two.len(), 1);

        let three = loop_from_points(&[pt(0.0, 0.0), pt(5.0, 0.0), pt(5.0, 5.0)]).unwrap();
        assert_eq!(three.len(), 3);
        assert!(are_continuous(&three, true));

        assert!(matches!(
            loop_from_points(&[pt(0.0, 0.0)]),
            Err(Error::TooFewPoints(1))
        ));
    }

    #[test]
    fn test_splice_boundary_orders_by_distance() {
        let base = loop_from_points(&[pt(0.0, 0.0), pt(12.0, 0.0), pt(12.0, 8.0), pt(0.0, 8.0)])
            .unwrap();

        // Two detours on the bottom edge, given out of order
        let far = BoundaryInsertion {
            edge_index: 0,
            points: vec![pt(8.0, 0.0), pt(8.0, -1.0), pt(9.0, -1.0), pt(9.0, 0.0)],
        };
        let near = BoundaryInsertion {
            edge_index: 0,
            points: vec![pt(2.0, 0.0), pt(2.0, -1.0), pt(3.0, -1.0), pt(3.0, 0.0)],
        };

        let points = splice_boundary(&base, &[far, near]).unwrap();
        assert_eq!(points.len(), 12);
        // Near group comes first
        assert_eq!(points[1], pt(2.0, 0.0));
        assert_eq!(points[5], pt(8.0, 0.0));

        let loop_segments = loop_from_points(&points).unwrap();
        assert!(are_continuous(&loop_segments, true));
        assert!(is_closed_loop(&loop_segments));
        assert!(!has_interior_intersection(&loop_segments));
    }

    #[test]
    fn test_splice_boundary_rejects_bad_edge() {
        let base = triangle_closed();
        let bad = BoundaryInsertion {
            edge_index: 7,
            points: vec![pt(1.0, 0.0)],
        };
        assert!(matches!(
            splice_boundary(&base, &[bad]),
            Err(Error::InsertionOutOfRange { index: 7, edges: 3 })
        ));
    }
}
