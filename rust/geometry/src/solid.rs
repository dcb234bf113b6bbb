// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boundary-representation solids and planar-face partitioning.
//!
//! Faces partition by the rounded Z component of their normal: positive
//! is a top face, negative a bottom face, and any face whose |Z| is not
//! exactly 1 after rounding counts as a side face (inclined side faces
//! included).

use nalgebra::{Isometry3, Point3, Vector3};

use crate::algebra;
use crate::bounds::BoundingBox;
use crate::face::PlanarFace;
use crate::tolerance::{round_to, DECIMAL_PLACES};

/// A solid bounded by planar faces.
#[derive(Debug, Clone, Default)]
pub struct Solid {
    pub faces: Vec<PlanarFace>,
}

impl Solid {
    pub fn new(faces: Vec<PlanarFace>) -> Self {
        Self { faces }
    }

    /// Axis-aligned box with outward-facing planar faces.
    pub fn rectangular(min: Point3<f64>, max: Point3<f64>) -> Solid {
        let p = |x: f64, y: f64, z: f64| Point3::new(x, y, z);
        let face = |points: [Point3<f64>; 4], normal: Vector3<f64>| {
            let boundary = crate::loops::loop_from_points(&points).expect("distinct corners");
            PlanarFace::new(normal, points[0], vec![boundary])
        };
        let (a, b) = (min, max);
        Solid::new(vec![
            face(
                [p(a.x, a.y, b.z), p(b.x, a.y, b.z), p(b.x, b.y, b.z), p(a.x, b.y, b.z)],
                Vector3::new(0.0, 0.0, 1.0),
            ),
            face(
                [p(a.x, a.y, a.z), p(a.x, b.y, a.z), p(b.x, b.y, a.z), p(b.x, a.y, a.z)],
                Vector3::new(0.0, 0.0, -1.0),
            ),
            face(
                [p(a.x, a.y, a.z), p(b.x, a.y, a.z), p(b.x, a.y, b.z), p(a.x, a.y, b.z)],
                Vector3::new(0.0, -1.0, 0.0),
            ),
            face(
                [p(b.x, a.y, a.z), p(b.x, b.y, a.z), p(b.x, b.y, b.z), p(b.x, a.y, b.z)],
                Vector3::new(1.0, 0.0, 0.0),
            ),
            face(
                [p(b.x, b.y, a.z), p(a.x, b.y, a.z), p(a.x, b.y, b.z), p(b.x, b.y, b.z)],
                Vector3::new(0.0, 1.0, 0.0),
            ),
            face(
                [p(a.x, b.y, a.z), p(a.x, a.y, a.z), p(a.x, a.y, b.z), p(a.x, b.y, b.z)],
                Vector3::new(-1.0, 0.0, 0.0),
            ),
        ])
    }

    /// Faces whose rounded normal Z is positive (horizontal or inclined
    /// tops).
    pub fn top_planar_faces(&self) -> Vec<&PlanarFace> {
        self.faces
            .iter()
            .filter(|f| round_to(f.normal.z, DECIMAL_PLACES) > 0.0)
            .collect()
    }

    /// Faces whose rounded normal Z is negative.
    pub fn bottom_planar_faces(&self) -> Vec<&PlanarFace> {
        self.faces
            .iter()
            .filter(|f| round_to(f.normal.z, DECIMAL_PLACES) < 0.0)
            .collect()
    }

    /// Faces that are not purely horizontal: |rounded normal Z| != 1.
    pub fn side_planar_faces(&self) -> Vec<&PlanarFace> {
        self.faces
            .iter()
            .filter(|f| round_to(f.normal.z, DECIMAL_PLACES).abs() != 1.0)
            .collect()
    }

    /// The most upward-facing top face.
    pub fn top_planar_face(&self) -> Option<&PlanarFace> {
        self.top_planar_faces()
            .into_iter()
            .max_by(|a, b| a.normal.z.partial_cmp(&b.normal.z).expect("unit normals"))
    }

    /// The most downward-facing bottom face.
    pub fn bottom_planar_face(&self) -> Option<&PlanarFace> {
        self.bottom_planar_faces()
            .into_iter()
            .min_by(|a, b| a.normal.z.partial_cmp(&b.normal.z).expect("unit normals"))
    }

    /// The top face whose boundary reaches highest.
    ///
    /// For an inclined solid hosting an opening, the steepest normal is
    /// not necessarily the physical top; the highest boundary point is.
    pub fn highest_boundary_face(&self) -> Option<&PlanarFace> {
        self.top_planar_faces().into_iter().max_by(|a, b| {
            let za = face_max_z(a);
            let zb = face_max_z(b);
            za.partial_cmp(&zb).expect("finite coordinates")
        })
    }

    /// All external-boundary vertices across faces.
    pub fn boundary_vertices(&self) -> Vec<Point3<f64>> {
        self.faces
            .iter()
            .flat_map(|f| f.boundary_vertices())
            .collect()
    }

    /// Vertex centroid of the boundary representation.
    pub fn centroid(&self) -> Option<Point3<f64>> {
        algebra::centroid(&self.boundary_vertices())
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::around(&self.boundary_vertices())
    }

    /// Volume by the divergence theorem: one third of the sum over faces
    /// of (centroid · normal) × area. Exact for closed polyhedra with
    /// outward normals.
    pub fn volume(&self) -> f64 {
        let mut total = 0.0;
        for face in &self.faces {
            let vertices = face.boundary_vertices();
            let Some(centroid) = algebra::centroid(&vertices) else {
                continue;
            };
            total += centroid.coords.dot(&face.normal) * polygon_area(&vertices);
        }
        total / 3.0
    }

    /// The solid transformed by a rigid placement.
    pub fn transformed(&self, placement: &Isometry3<f64>) -> Solid {
        let faces = self
            .faces
            .iter()
            .map(|f| {
                let loops = f
                    .loops
                    .iter()
                    .map(|lp| lp.iter().map(|s| s.transformed(placement)).collect())
                    .collect();
                PlanarFace::new(placement * f.normal, placement * f.origin, loops)
            })
            .collect();
        Solid::new(faces)
    }
}

/// Planar polygon area via the triangle-fan cross-product method.
fn polygon_area(vertices: &[Point3<f64>]) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let p0 = vertices[0];
    let mut total = Vector3::zeros();
    for i in 1..vertices.len() - 1 {
        let v1 = vertices[i] - p0;
        let v2 = vertices[i + 1] - p0;
        total += v1.cross(&v2);
    }
    total.norm() / 2.0
}

fn face_max_z(face: &PlanarFace) -> f64 {
    face.external_loop()
        .iter()
        .flat_map(|s| [s.start.z, s.end.z])
        .fold(f64::NEG_INFINITY, f64::max)
}
