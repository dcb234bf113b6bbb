// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar faces bounded by segment loops.
//!
//! The first loop is always the external boundary; subsequent loops are
//! holes. Face/segment relations mirror segment/segment relations but are
//! evaluated against the face's planar extent, bounded by the external
//! loop.

use nalgebra::{Point3, Vector3};

use crate::relation::Relation;
use crate::segment::{Line, Segment};
use crate::tolerance::{self, TOLERANCE};

/// A plane (unit normal + reference point) bounded by one or more loops.
#[derive(Debug, Clone)]
pub struct PlanarFace {
    pub normal: Vector3<f64>,
    pub origin: Point3<f64>,
    /// Boundary loops; `loops[0]` is the external boundary.
    pub loops: Vec<Vec<Segment>>,
}

impl PlanarFace {
    pub fn new(normal: Vector3<f64>, origin: Point3<f64>, loops: Vec<Vec<Segment>>) -> Self {
        Self {
            normal: normal.normalize(),
            origin,
            loops,
        }
    }

    /// Builds a face from a single continuous boundary loop, deriving the
    /// normal with Newell's method.
    ///
    /// Returns `None` for fewer than 3 segments or a degenerate normal.
    pub fn from_loop(boundary: Vec<Segment>) -> Option<Self> {
        if boundary.len() < 3 {
            return None;
        }

        // Newell's method over the loop start points
        let mut normal = Vector3::zeros();
        let n = boundary.len();
        for i in 0..n {
            let curr = boundary[i].start;
            let next = boundary[(i + 1) % n].start;
            normal.x += (curr.y - next.y) * (curr.z + next.z);
            normal.y += (curr.z - next.z) * (curr.x + next.x);
            normal.z += (curr.x - next.x) * (curr.y + next.y);
        }
        if tolerance::is_zero_length(&normal) {
            return None;
        }

        let origin = boundary[0].start;
        Some(Self::new(normal.normalize(), origin, vec![boundary]))
    }

    /// The external boundary loop (first loop by convention).
    pub fn external_loop(&self) -> &[Segment] {
        self.loops.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Start points of the external boundary segments.
    pub fn boundary_vertices(&self) -> Vec<Point3<f64>> {
        self.external_loop().iter().map(|s| s.start).collect()
    }

    /// Signed distance from a point to the face plane.
    pub fn signed_distance(&self, p: &Point3<f64>) -> f64 {
        self.normal.dot(&(p - self.origin))
    }

    /// Whether a point lies on the face: on the plane and inside (or on)
    /// the external boundary.
    pub fn contains_point(&self, p: &Point3<f64>) -> bool {
        if !tolerance::rounds_to_zero(self.signed_distance(p)) {
            return false;
        }
        self.boundary_contains(p)
    }

    /// Classifies a segment against the face's planar extent.
    ///
    /// Subset: the segment lies in the plane, inside the boundary.
    /// Overlap: the segment crosses the plane inside the boundary, or lies
    /// in the plane partially inside. Disjoint otherwise.
    pub fn relation_to(&self, seg: &Segment) -> Relation {
        let d0 = self.signed_distance(&seg.start);
        let d1 = self.signed_distance(&seg.end);
        let on0 = tolerance::rounds_to_zero(d0);
        let on1 = tolerance::rounds_to_zero(d1);

        if on0 && on1 {
            // Coplanar: classify by how much of the segment the boundary
            // covers, sampling endpoints and midpoint.
            let inside = [seg.start, seg.midpoint(), seg.end]
                .iter()
                .filter(|p| self.boundary_contains(p))
                .count();
            return match inside {
                3 => Relation::Subset,
                0 => Relation::Disjoint,
                _ => Relation::Overlap,
            };
        }

        if d0.signum() == d1.signum() && !on0 && !on1 {
            return Relation::Disjoint;
        }

        // Transversal crossing: single point on the plane
        let t = d0 / (d0 - d1);
        let crossing = seg.start + (seg.end - seg.start) * t;
        if self.boundary_contains(&crossing) {
            Relation::Overlap
        } else {
            Relation::Disjoint
        }
    }

    /// Whether the face contains the whole segment (relation is Subset).
    pub fn contains_segment(&self, seg: &Segment) -> bool {
        self.relation_to(seg) == Relation::Subset
    }

    /// Whether the face and segment share at least one point.
    pub fn intersects_segment(&self, seg: &Segment) -> bool {
        self.relation_to(seg) != Relation::Disjoint
    }

    /// Intersection point of an unbounded line with the bounded face, or
    /// `None` when the line misses the face or runs parallel to the plane.
    pub fn intersection_with_line(&self, line: &Line) -> Option<Point3<f64>> {
        let denom = self.normal.dot(&line.direction);
        if tolerance::rounds_to_zero(denom) {
            return None;
        }
        let t = self.normal.dot(&(self.origin - line.origin)) / denom;
        let p = line.point_at(t);
        if self.boundary_contains(&p) {
            Some(p)
        } else {
            None
        }
    }

    /// Even-odd containment test against the external boundary, projected
    /// onto the face plane. Points on the boundary count as inside.
    fn boundary_contains(&self, p: &Point3<f64>) -> bool {
        let boundary = self.external_loop();
        if boundary.len() < 3 {
            return false;
        }

        let (u, v) = self.plane_basis(boundary);
        let project = |pt: &Point3<f64>| -> (f64, f64) {
            let d = pt - self.origin;
            (d.dot(&u), d.dot(&v))
        };

        let (px, py) = project(p);

        // Boundary points count as contained
        for seg in boundary {
            let (ax, ay) = project(&seg.start);
            let (bx, by) = project(&seg.end);
            if point_to_segment_2d(px, py, ax, ay, bx, by) < TOLERANCE {
                return true;
            }
        }

        // Even-odd ray cast along +u
        let mut inside = false;
        for seg in boundary {
            let (ax, ay) = project(&seg.start);
            let (bx, by) = project(&seg.end);
            if (ay > py) != (by > py) {
                let x_cross = ax + (py - ay) / (by - ay) * (bx - ax);
                if px < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Orthonormal in-plane basis (u along the first boundary edge).
    fn plane_basis(&self, boundary: &[Segment]) -> (Vector3<f64>, Vector3<f64>) {
        let u = boundary[0].direction();
        let v = self.normal.cross(&u);
        (u, v)
    }
}

/// 2D distance from a point to a bounded segment.
fn point_to_segment_2d(px: f64, py: f64, ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    let dx = bx - ax;
    let dy = by - ay;
    let len_sq = dx * dx + dy * dy;
    if len_sq < TOLERANCE * TOLERANCE {
        return ((px - ax).powi(2) + (py - ay).powi(2)).sqrt();
    }
    let t = (((px - ax) * dx + (py - ay) * dy) / len_sq).clamp(0.0, 1.0);
    let qx = ax + t * dx;
    let qy = ay + t * dy;
    ((px - qx).powi(2) + (py - qy).powi(2)).sqrt()
}
