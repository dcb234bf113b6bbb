// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Section views spanning two picked points.
//!
//! The section plane runs through both points: its X axis follows the
//! picked span, its Y axis is vertical, and the view looks along the
//! counter-clockwise plan perpendicular, completing a right-handed
//! frame. The crop box starts at the nearest level below the picks.

use nalgebra::{Point3, Vector3};
use plankit_geometry::{algebra, tolerance};
use plankit_host::{
    level_at_or_below, HostDocument, Result, SectionBox, SectionFrame, SelectionProvider,
};
use serde::{Deserialize, Serialize};

use crate::outcome::TaskOutcome;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionConfig {
    /// Vertical extent of the crop box above its base level.
    pub height: f64,
    /// Far-clip depth of the view.
    pub depth: f64,
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self {
            height: 10.0,
            depth: 10.0,
        }
    }
}

/// Creates a section view through two picked points.
pub fn create_section_between_points(
    doc: &mut impl HostDocument,
    picks: &mut impl SelectionProvider,
    config: &SectionConfig,
) -> Result<TaskOutcome> {
    let Some(first) = picks.pick_point("Pick the section start point") else {
        return Ok(TaskOutcome::Cancelled);
    };
    let Some(second) = picks.pick_point("Pick the section end point") else {
        return Ok(TaskOutcome::Cancelled);
    };

    let span = algebra::project_xy(&second) - algebra::project_xy(&first);
    if tolerance::rounds_to_zero(span.norm()) {
        return Ok(TaskOutcome::rejected("the picked points coincide in plan"));
    }
    let direction = span.normalize();

    let origin = algebra::midpoint(&first, &second);
    // basis_z = basis_x x basis_y keeps the frame right-handed
    let frame = SectionFrame {
        origin,
        basis_x: direction,
        basis_y: Vector3::new(0.0, 0.0, 1.0),
        basis_z: algebra::perpendicular_ccw(&direction),
    };

    let elevation = level_at_or_below(&doc.levels(), first.z)
        .map(|l| l.elevation)
        .unwrap_or(origin.z);
    let half = span.norm() / 2.0;
    let section = SectionBox {
        frame,
        min: Point3::new(-half, elevation, 0.0),
        max: Point3::new(half, elevation + config.height, config.depth),
    };

    doc.transaction("Create section", |doc| {
        let id = doc.create_section(&section)?;
        Ok(TaskOutcome::Created(vec![id]))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use plankit_host::{CreatedElement, ElementId, Level, MemoryDocument, ScriptedSelection};

    fn doc_with_level(elevation: f64) -> MemoryDocument {
        MemoryDocument::new().with_level(Level {
            id: ElementId(1),
            name: "L1".to_owned(),
            elevation,
        })
    }

    #[test]
    fn test_frame_spans_the_picked_points() {
        let mut doc = doc_with_level(0.0);
        let mut picks = ScriptedSelection::new()
            .with_point(Point3::new(0.0, 0.0, 0.0))
            .with_point(Point3::new(10.0, 0.0, 0.0));
        let outcome =
            create_section_between_points(&mut doc, &mut picks, &SectionConfig::default())
                .unwrap();
        assert!(outcome.is_created());

        let CreatedElement::Section { section, .. } = &doc.created[0] else {
            panic!("expected a section");
        };
        assert_relative_eq!(section.frame.origin.x, 5.0);
        assert_relative_eq!(section.frame.basis_x.x, 1.0);
        assert_relative_eq!(section.frame.basis_y.z, 1.0);
        assert_relative_eq!(section.frame.basis_z.y, -1.0);
        // Right-handed: basis_z is basis_x x basis_y
        let cross = section.frame.basis_x.cross(&section.frame.basis_y);
        assert_relative_eq!(cross.dot(&section.frame.basis_z), 1.0, epsilon = 1e-9);
        assert_relative_eq!(section.min.x, -5.0);
        assert_relative_eq!(section.max.x, 5.0);
        assert_relative_eq!(section.max.y, 10.0);
    }

    #[test]
    fn test_crop_box_starts_at_the_level_below() {
        let mut doc = doc_with_level(-2.0);
        let mut picks = ScriptedSelection::new()
            .with_point(Point3::new(0.0, 0.0, 0.0))
            .with_point(Point3::new(4.0, 0.0, 0.0));
        create_section_between_points(&mut doc, &mut picks, &SectionConfig::default()).unwrap();

        let CreatedElement::Section { section, .. } = &doc.created[0] else {
            panic!("expected a section");
        };
        assert_relative_eq!(section.min.y, -2.0);
        assert_relative_eq!(section.max.y, 8.0);
    }

    #[test]
    fn test_coincident_points_rejected() {
        let mut doc = doc_with_level(0.0);
        let mut picks = ScriptedSelection::new()
            .with_point(Point3::new(1.0, 1.0, 0.0))
            .with_point(Point3::new(1.0, 1.0, 5.0)); // same point in plan
        let outcome =
            create_section_between_points(&mut doc, &mut picks, &SectionConfig::default())
                .unwrap();
        assert!(matches!(outcome, TaskOutcome::Rejected(_)));
    }

    #[test]
    fn test_cancelling_either_pick() {
        let mut doc = doc_with_level(0.0);
        let mut one_point = ScriptedSelection::new().with_point(Point3::new(0.0, 0.0, 0.0));
        let outcome =
            create_section_between_points(&mut doc, &mut one_point, &SectionConfig::default())
                .unwrap();
        assert_eq!(outcome, TaskOutcome::Cancelled);
        assert!(doc.created.is_empty());
    }
}
