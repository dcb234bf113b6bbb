// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Design-time visualization of intermediate geometry.

use nalgebra::Point3;
use plankit_geometry::Segment;

use crate::document::HostDocument;
use crate::element::ElementId;
use crate::error::Result;

/// Draws every segment as a model line, optionally marking endpoints.
pub fn sketch_segments<D: HostDocument>(
    doc: &mut D,
    segments: &[Segment],
    mark_endpoints: bool,
) -> Result<Vec<ElementId>> {
    let mut created = Vec::new();
    for segment in segments {
        created.push(doc.create_model_line(segment)?);
        if mark_endpoints {
            created.push(doc.create_model_point(&segment.start)?);
            created.push(doc.create_model_point(&segment.end)?);
        }
    }
    tracing::debug!(count = created.len(), "sketched segments");
    Ok(created)
}

/// Draws a reference point per input point.
pub fn sketch_points<D: HostDocument>(
    doc: &mut D,
    points: &[Point3<f64>],
) -> Result<Vec<ElementId>> {
    points.iter().map(|p| doc.create_model_point(p)).collect()
}
