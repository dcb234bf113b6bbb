// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis-aligned bounds and corner queries.

use nalgebra::Point3;

use crate::algebra;

/// Plan-view corner of a bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    BottomLeft,
    BottomRight,
    TopRight,
    TopLeft,
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl BoundingBox {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// Smallest box enclosing a point set. `None` for an empty slice.
    pub fn around(points: &[Point3<f64>]) -> Option<Self> {
        let first = points.first()?;
        let mut min = *first;
        let mut max = *first;
        for p in &points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }
        Some(Self { min, max })
    }

    pub fn centroid(&self) -> Point3<f64> {
        algebra::midpoint(&self.min, &self.max)
    }

    /// Whether the box contains a point, expanded by `tolerance` on every
    /// side.
    pub fn contains(&self, p: &Point3<f64>, tolerance: f64) -> bool {
        p.x >= self.min.x - tolerance
            && p.y >= self.min.y - tolerance
            && p.z >= self.min.z - tolerance
            && p.x <= self.max.x + tolerance
            && p.y <= self.max.y + tolerance
            && p.z <= self.max.z + tolerance
    }

    /// The four plan-view corners projected on the XY plane, tagged with
    /// their corner position.
    pub fn corners_xy(&self) -> [(Point3<f64>, Corner); 4] {
        [
            (algebra::project_xy(&self.min), Corner::BottomLeft),
            (Point3::new(self.max.x, self.min.y, 0.0), Corner::BottomRight),
            (algebra::project_xy(&self.max), Corner::TopRight),
            (Point3::new(self.min.x, self.max.y, 0.0), Corner::TopLeft),
        ]
    }
}
