// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall-hosted fixture placement.
//!
//! The user picks a wall of the target room; the fixture lands in the
//! room corner farthest from the door, pulled off both walls by the
//! configured clearance, facing into the room.

use nalgebra::{Point3, Vector3};
use plankit_geometry::{algebra, PlanarFace, Solid};
use plankit_host::{
    flatten_solid, Category, DoorElement, Error, FixturePlacement, HostDocument, Result,
    RoomElement, SelectionFilter, SelectionProvider, WallElement,
};
use serde::{Deserialize, Serialize};

use crate::outcome::TaskOutcome;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureConfig {
    /// Rooms whose name contains this (case-insensitive) are candidates.
    pub room_name: String,
    /// Fixture family to instantiate.
    pub family: String,
    /// Fixture width along the host wall.
    pub width: f64,
    /// Gap kept between the fixture and the adjacent walls.
    pub clearance: f64,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            room_name: "bathroom".to_owned(),
            family: "WC".to_owned(),
            width: 5.0,
            clearance: 1.5,
        }
    }
}

/// Places a fixture against a picked wall of the configured room.
pub fn place_wall_fixture(
    doc: &mut impl HostDocument,
    picks: &mut impl SelectionProvider,
    config: &FixtureConfig,
) -> Result<TaskOutcome> {
    let filter = SelectionFilter::category(Category::Wall);
    let Some(pick) = picks.pick_element(&filter, "Pick a wall of the target room") else {
        return Ok(TaskOutcome::Cancelled);
    };
    let wall = doc.wall(pick.id)?;

    let Some(room) = nearest_named_room(doc, &wall, &config.room_name) else {
        return Ok(TaskOutcome::rejected(format!(
            "no room named like {:?} near the picked wall",
            config.room_name
        )));
    };
    tracing::debug!(wall = %wall.id, room = %room.id, "placing fixture");

    let solid = flatten_solid(&wall.geometry).ok_or(Error::MissingSolid(wall.id))?;
    let Some(face) = room_side_face(&solid, &wall, &room) else {
        return Ok(TaskOutcome::rejected("the picked wall has no face toward the room"));
    };

    let Some(door) = room_door(doc, &room) else {
        return Ok(TaskOutcome::rejected("the room has no door to measure from"));
    };

    let Some(fixture_type) = doc
        .fixture_types()
        .into_iter()
        .find(|t| t.family.eq_ignore_ascii_case(&config.family))
    else {
        return Ok(TaskOutcome::rejected(format!(
            "no fixture family {:?} is loaded",
            config.family
        )));
    };

    // Wall endpoint farthest from the door, in plan
    let door_xy = algebra::project_xy(&door.location);
    let a = algebra::project_xy(&wall.location_line.start);
    let b = algebra::project_xy(&wall.location_line.end);
    let (far, near) = if (a - door_xy).norm() >= (b - door_xy).norm() {
        (a, b)
    } else {
        (b, a)
    };

    // Room corner closest to that endpoint
    let corner = room
        .bounding_box
        .corners_xy()
        .into_iter()
        .min_by(|(p, _), (q, _)| {
            let dp = (p - far).norm();
            let dq = (q - far).norm();
            dp.partial_cmp(&dq).expect("finite distances")
        })
        .map(|(p, _)| p)
        .expect("a bounding box has four corners");

    let into_room = plan_normal(&face);
    let along = (near - far).normalize();
    let location = Point3::new(corner.x, corner.y, room.location.z)
        + into_room * config.clearance
        + along * (config.width / 2.0);

    // Hand axis runs from the corner toward the wall interior; mirror
    // when that disagrees with the wall's own direction
    let flip_hand = along.dot(&wall.location_line.direction()) < 0.0;

    let placement = FixturePlacement {
        fixture_type: fixture_type.id,
        host_wall: wall.id,
        level: room.level,
        location,
        facing: into_room,
        flip_hand,
    };
    doc.transaction("Place fixture", |doc| {
        let id = doc.place_fixture(&placement)?;
        Ok(TaskOutcome::Created(vec![id]))
    })
}

/// The matching room closest to the wall midpoint in plan.
fn nearest_named_room(
    doc: &impl HostDocument,
    wall: &WallElement,
    name: &str,
) -> Option<RoomElement> {
    let needle = name.to_ascii_lowercase();
    let mid = algebra::project_xy(&wall.location_line.midpoint());
    doc.rooms()
        .into_iter()
        .filter(|r| r.name.to_ascii_lowercase().contains(&needle))
        .min_by(|a, b| {
            let da = (algebra::project_xy(&a.location) - mid).norm();
            let db = (algebra::project_xy(&b.location) - mid).norm();
            da.partial_cmp(&db).expect("finite distances")
        })
}

/// Of the wall's side faces, the one whose normal points into the room.
fn room_side_face<'a>(
    solid: &'a Solid,
    wall: &WallElement,
    room: &RoomElement,
) -> Option<&'a PlanarFace> {
    let wall_dir = wall.location_line.direction();
    solid
        .side_planar_faces()
        .into_iter()
        .filter(|f| algebra::is_perpendicular(&f.normal, &wall_dir))
        .find(|f| f.normal.dot(&(room.location - f.origin)) > 0.0)
}

fn room_door(doc: &impl HostDocument, room: &RoomElement) -> Option<DoorElement> {
    doc.doors()
        .into_iter()
        .find(|d| d.to_room == Some(room.id) || d.from_room == Some(room.id))
}

/// Face normal flattened to plan and renormalized.
fn plan_normal(face: &PlanarFace) -> Vector3<f64> {
    Vector3::new(face.normal.x, face.normal.y, 0.0).normalize()
}
