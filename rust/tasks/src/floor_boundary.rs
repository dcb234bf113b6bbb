// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor creation from a pool of boundary segments.
//!
//! Candidate segments arrive in arbitrary order, typically traced from
//! model lines. The pool must form a single closed loop; a pool that is
//! closed but discontinuous is reordered before the interior-crossing
//! gate runs.

use plankit_geometry::{loops, Segment};
use plankit_host::{level_at_or_below, HostDocument, Result};
use serde::{Deserialize, Serialize};

use crate::outcome::TaskOutcome;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorOptions {
    /// Floor type by name; the first loaded type when absent.
    pub floor_type: Option<String>,
    pub height_offset: f64,
}

impl Default for FloorOptions {
    fn default() -> Self {
        Self {
            floor_type: None,
            height_offset: 0.0,
        }
    }
}

/// Validates a segment pool and creates a floor from it.
pub fn create_floor_from_segments(
    doc: &mut impl HostDocument,
    segments: &[Segment],
    options: &FloorOptions,
) -> Result<TaskOutcome> {
    if !loops::is_closed_loop(segments) {
        return Ok(TaskOutcome::rejected(
            "the segments do not form a closed loop",
        ));
    }

    let boundary = if loops::are_continuous(segments, true) {
        segments.to_vec()
    } else {
        tracing::debug!(count = segments.len(), "reordering discontinuous boundary");
        match loops::make_continuous(segments) {
            Some(ordered) => ordered,
            None => {
                return Ok(TaskOutcome::rejected(
                    "the segments cannot be chained into a continuous loop",
                ))
            }
        }
    };

    if loops::has_interior_intersection(&boundary) {
        return Ok(TaskOutcome::rejected(
            "the boundary intersects itself away from its endpoints",
        ));
    }

    let floor_type = match resolve_floor_type(doc, options) {
        Some(id) => id,
        None => return Ok(TaskOutcome::rejected("no matching floor type is loaded")),
    };

    let elevation = boundary[0].start.z;
    doc.transaction("Create floor", |doc| {
        let level = match level_at_or_below(&doc.levels(), elevation) {
            Some(level) => level,
            None => doc.create_level("Level 1", 0.0)?,
        };
        let id = doc.create_floor(&boundary, floor_type, level.id, options.height_offset)?;
        Ok(TaskOutcome::Created(vec![id]))
    })
}

fn resolve_floor_type(
    doc: &impl HostDocument,
    options: &FloorOptions,
) -> Option<plankit_host::ElementId> {
    let types = doc.floor_types();
    match &options.floor_type {
        Some(name) => types
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
            .map(|t| t.id),
        None => types.first().map(|t| t.id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;
    use plankit_host::{CreatedElement, ElementId, FloorType, Level, MemoryDocument};

    fn pt(x: f64, y: f64) -> Point3<f64> {
        Point3::new(x, y, 0.0)
    }

    fn seeded_doc() -> MemoryDocument {
        MemoryDocument::new()
            .with_level(Level {
                id: ElementId(1),
                name: "L1".to_owned(),
                elevation: 0.0,
            })
            .with_floor_type(FloorType {
                id: ElementId(2),
                name: "Generic 150mm".to_owned(),
            })
    }

    /// Unit square with its edges shuffled out of walk order.
    fn scrambled_square() -> Vec<Segment> {
        vec![
            Segment::new(pt(0.0, 0.0), pt(4.0, 0.0)),
            Segment::new(pt(4.0, 4.0), pt(0.0, 4.0)),
            Segment::new(pt(4.0, 0.0), pt(4.0, 4.0)),
            Segment::new(pt(0.0, 4.0), pt(0.0, 0.0)),
        ]
    }

    #[test]
    fn test_creates_floor_from_scrambled_boundary() {
        let mut doc = seeded_doc();
        let outcome =
            create_floor_from_segments(&mut doc, &scrambled_square(), &FloorOptions::default())
                .unwrap();
        assert!(outcome.is_created());

        let CreatedElement::Floor { boundary, floor_type, level, .. } = &doc.created[0] else {
            panic!("expected a floor");
        };
        assert_eq!(*floor_type, ElementId(2));
        assert_eq!(*level, ElementId(1));
        assert!(loops::are_continuous(boundary, true));
    }

    #[test]
    fn test_rejects_open_chain() {
        let mut doc = seeded_doc();
        let square = scrambled_square();
        let outcome =
            create_floor_from_segments(&mut doc, &square[..3], &FloorOptions::default()).unwrap();
        assert!(matches!(outcome, TaskOutcome::Rejected(_)));
        assert!(doc.created.is_empty());
    }

    #[test]
    fn test_rejects_self_crossing_loop() {
        // Bowtie: closed and continuous, but crosses itself at (2, 2)
        let bowtie = vec![
            Segment::new(pt(0.0, 0.0), pt(4.0, 4.0)),
            Segment::new(pt(4.0, 4.0), pt(4.0, 0.0)),
            Segment::new(pt(4.0, 0.0), pt(0.0, 4.0)),
            Segment::new(pt(0.0, 4.0), pt(0.0, 0.0)),
        ];
        let mut doc = seeded_doc();
        let outcome =
            create_floor_from_segments(&mut doc, &bowtie, &FloorOptions::default()).unwrap();
        assert!(matches!(outcome, TaskOutcome::Rejected(_)));
    }

    #[test]
    fn test_creates_level_when_none_exists() {
        let mut doc = MemoryDocument::new().with_floor_type(FloorType {
            id: ElementId(2),
            name: "Generic 150mm".to_owned(),
        });
        let outcome =
            create_floor_from_segments(&mut doc, &scrambled_square(), &FloorOptions::default())
                .unwrap();
        assert!(outcome.is_created());
        assert!(matches!(doc.created[0], CreatedElement::Level(_)));
    }

    #[test]
    fn test_named_floor_type_must_exist() {
        let mut doc = seeded_doc();
        let options = FloorOptions {
            floor_type: Some("Timber".to_owned()),
            ..Default::default()
        };
        let outcome =
            create_floor_from_segments(&mut doc, &scrambled_square(), &options).unwrap();
        assert!(matches!(outcome, TaskOutcome::Rejected(_)));
    }
}
