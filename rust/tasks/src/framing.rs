// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stud layout along a picked wall.
//!
//! Stud positions are spaced along the wall's location line, each stud
//! rising from the base line to the wall's top face. Studs that pass
//! through a hosted window are split into a sill piece and a head piece.
//! The layout is sketched as model lines for review.

use nalgebra::{Point3, Vector3};
use plankit_geometry::sampling::{divide_by_distance, DivideOptions};
use plankit_geometry::{tolerance, Line, Segment, TOLERANCE};
use plankit_host::{
    flatten_solid, sketch, Category, Error, HostDocument, Result, SelectionFilter,
    SelectionProvider, WindowElement,
};
use serde::{Deserialize, Serialize};

use crate::outcome::TaskOutcome;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FramingConfig {
    /// Center-to-center stud spacing along the wall.
    pub spacing: f64,
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self { spacing: 3.0 }
    }
}

/// Sketches a stud layout on a picked wall.
pub fn layout_wall_studs(
    doc: &mut impl HostDocument,
    picks: &mut impl SelectionProvider,
    config: &FramingConfig,
) -> Result<TaskOutcome> {
    let filter = SelectionFilter::category(Category::Wall);
    let Some(pick) = picks.pick_element(&filter, "Pick a wall to frame") else {
        return Ok(TaskOutcome::Cancelled);
    };
    let wall = doc.wall(pick.id)?;

    let options = DivideOptions {
        append_start: true,
        append_end: true,
        ..Default::default()
    };
    let positions = divide_by_distance(&wall.location_line, config.spacing, &options)?;

    let solid = flatten_solid(&wall.geometry).ok_or(Error::MissingSolid(wall.id))?;
    let Some(top) = solid.highest_boundary_face() else {
        return Ok(TaskOutcome::rejected("the picked wall has no top face"));
    };

    let windows: Vec<WindowElement> = doc
        .windows()
        .into_iter()
        .filter(|w| w.host_wall == wall.id)
        .collect();

    let mut studs = Vec::new();
    for base in positions {
        let ray = Line::new(base, Vector3::new(0.0, 0.0, 1.0));
        let Some(top_point) = top.intersection_with_line(&ray) else {
            tracing::warn!(x = base.x, y = base.y, "stud position misses the wall top face");
            continue;
        };
        let stud = Segment::new(base, top_point);
        split_around_windows(&stud, &windows, &mut studs);
    }
    if studs.is_empty() {
        return Ok(TaskOutcome::rejected("no stud position reaches the wall top face"));
    }
    tracing::debug!(wall = %wall.id, studs = studs.len(), "laying out studs");

    doc.transaction("Lay out studs", |doc| {
        let ids = sketch::sketch_segments(doc, &studs, false)?;
        Ok(TaskOutcome::Created(ids))
    })
}

/// Pushes the stud, split into sill and head pieces where it passes
/// through a window opening.
fn split_around_windows(stud: &Segment, windows: &[WindowElement], out: &mut Vec<Segment>) {
    let opening = windows.iter().find(|w| {
        let probe = Point3::new(stud.start.x, stud.start.y, w.bounding_box.centroid().z);
        w.bounding_box.contains(&probe, TOLERANCE)
    });
    let Some(window) = opening else {
        out.push(*stud);
        return;
    };

    let (sill, head) = (window.bounding_box.min.z, window.bounding_box.max.z);
    // Tolerant height comparison: a piece exists only when it rises by
    // more than the rounding tolerance
    let rises = |from: f64, to: f64| {
        tolerance::round_to(to - from, tolerance::DECIMAL_PLACES) > 0.0
    };
    if rises(stud.start.z, sill) {
        out.push(Segment::new(
            stud.start,
            Point3::new(stud.start.x, stud.start.y, sill),
        ));
    }
    if rises(head, stud.end.z) {
        out.push(Segment::new(
            Point3::new(stud.end.x, stud.end.y, head),
            stud.end,
        ));
    }
}
