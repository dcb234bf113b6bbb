// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Threshold floors under room doors.
//!
//! For every room, each door sitting on a boundary edge dents that edge
//! outward by half the host wall's width. All dents splice into the
//! room's bottom-face boundary, and one floor is created per room from
//! the composite loop. An existing room floor is replaced, keeping its
//! type and height offset.

use nalgebra::Point3;
use plankit_geometry::loops::{self, BoundaryInsertion};
use plankit_geometry::{algebra, relation, Relation, Segment};
use plankit_host::{
    flatten_curves, flatten_solid, DoorElement, ElementId, FloorElement, HostDocument, Result,
    RoomElement,
};

use crate::outcome::TaskOutcome;

/// Extends room floors with thresholds under every boundary door.
pub fn create_door_thresholds(doc: &mut impl HostDocument) -> Result<TaskOutcome> {
    doc.transaction("Create thresholds", |doc| {
        let mut created = Vec::new();
        for room in doc.rooms() {
            match threshold_floor_for_room(doc, &room)? {
                Some(id) => created.push(id),
                None => tracing::debug!(room = %room.id, "no door on the room boundary"),
            }
        }
        if created.is_empty() {
            Ok(TaskOutcome::rejected("no door sits on a room boundary edge"))
        } else {
            Ok(TaskOutcome::Created(created))
        }
    })
}

fn threshold_floor_for_room(
    doc: &mut impl HostDocument,
    room: &RoomElement,
) -> Result<Option<ElementId>> {
    let Some(boundary) = room_boundary(room) else {
        return Ok(None);
    };

    let doors: Vec<DoorElement> = doc
        .doors()
        .into_iter()
        .filter(|d| d.to_room == Some(room.id) || d.from_room == Some(room.id))
        .collect();

    let mut insertions = Vec::new();
    for door in &doors {
        let wall = doc.wall(door.host_wall)?;
        let depth = wall.width / 2.0;
        if let Some(dent) = door_dent(&boundary, room, door, depth) {
            insertions.push(dent);
        }
    }
    if insertions.is_empty() {
        return Ok(None);
    }

    let points = loops::splice_boundary(&boundary, &insertions)?;
    let dented = loops::loop_from_points(&points)?;

    // Replace the room's existing floor, keeping its type
    let (floor_type, height_offset) = match existing_room_floor(doc, room) {
        Some(floor) => {
            tracing::debug!(floor = %floor.id, room = %room.id, "replacing room floor");
            doc.delete_element(floor.id)?;
            (floor.floor_type, floor.height_offset)
        }
        None => match doc.floor_types().first() {
            Some(t) => (t.id, 0.0),
            None => return Ok(None),
        },
    };

    let id = doc.create_floor(&dented, floor_type, room.level, height_offset)?;
    Ok(Some(id))
}

/// The four-point outward dent a door cuts into the room boundary, or
/// `None` when no door edge lies on a boundary edge.
fn door_dent(
    boundary: &[Segment],
    room: &RoomElement,
    door: &DoorElement,
    depth: f64,
) -> Option<BoundaryInsertion> {
    let (edge_index, door_edge) = door_plan_edges(door).into_iter().find_map(|edge| {
        boundary
            .iter()
            .position(|room_edge| {
                matches!(
                    relation::classify(&edge, &room_edge.project_xy()),
                    Relation::Equal | Relation::Subset
                )
            })
            .map(|i| (i, edge))
    })?;
    let edge = boundary[edge_index];

    // Dent direction: perpendicular to the boundary, away from the room
    let mut outward = algebra::perpendicular_cw(&edge.project_xy().direction());
    let to_door = algebra::project_xy(&door_edge.midpoint()) - algebra::project_xy(&room.location);
    if outward.dot(&to_door) < 0.0 {
        outward = -outward;
    }

    // Door endpoints at boundary elevation, nearer the edge start first
    let z = edge.start.z;
    let at = |p: Point3<f64>| Point3::new(p.x, p.y, z);
    let line = edge.to_line();
    let (mut a, mut b) = (at(door_edge.start), at(door_edge.end));
    if line.parameter_of(&a) > line.parameter_of(&b) {
        std::mem::swap(&mut a, &mut b);
    }

    Some(BoundaryInsertion {
        edge_index,
        points: vec![a, a + outward * depth, b + outward * depth, b],
    })
}

/// Plan-view door edges: non-vertical curves projected to XY, deduplicated
/// within tolerance irrespective of direction.
fn door_plan_edges(door: &DoorElement) -> Vec<Segment> {
    let mut edges: Vec<Segment> = Vec::new();
    for curve in flatten_curves(&door.geometry) {
        if curve.is_degenerate() || curve.is_vertical() {
            continue;
        }
        let flat = curve.project_xy();
        if flat.is_degenerate() {
            continue;
        }
        let duplicate = edges
            .iter()
            .any(|e| e.same_endpoints(&flat) || e.same_endpoints(&flat.reversed()));
        if !duplicate {
            edges.push(flat);
        }
    }
    edges
}

/// Boundary edges of the room at floor level.
fn room_boundary(room: &RoomElement) -> Option<Vec<Segment>> {
    let solid = flatten_solid(&room.geometry)?;
    let bottom = solid.bottom_planar_face()?;
    Some(bottom.external_loop().to_vec())
}

/// The floor currently covering the room, if any.
fn existing_room_floor(doc: &impl HostDocument, room: &RoomElement) -> Option<FloorElement> {
    doc.floors().into_iter().find(|floor| {
        flatten_solid(&floor.geometry)
            .and_then(|solid| solid.bounding_box())
            .is_some_and(|bbx| bbx.contains(&room.location, plankit_geometry::TOLERANCE))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use plankit_geometry::Solid;
    use plankit_host::{
        CreatedElement, FloorType, GeometryNode, MemoryDocument, WallElement,
    };

    const WALL: ElementId = ElementId(1);
    const ROOM: ElementId = ElementId(2);
    const DOOR: ElementId = ElementId(3);
    const LEVEL: ElementId = ElementId(4);
    const GENERIC: ElementId = ElementId(5);

    /// Door spanning x in [2, 5] on the y = 0 edge of a 10 x 8 room.
    fn door_doc() -> MemoryDocument {
        let shell = Solid::rectangular(Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 8.0, 9.0));
        MemoryDocument::new()
            .with_wall(WallElement {
                id: WALL,
                level: LEVEL,
                location_line: Segment::new(
                    Point3::new(0.0, 0.0, 0.0),
                    Point3::new(10.0, 0.0, 0.0),
                ),
                width: 0.5,
                geometry: Vec::new(),
            })
            .with_room(RoomElement {
                id: ROOM,
                name: "Hall".to_owned(),
                level: LEVEL,
                location: Point3::new(5.0, 4.0, 0.0),
                geometry: vec![GeometryNode::Solid(shell)],
                bounding_box: plankit_geometry::BoundingBox::new(
                    Point3::new(0.0, 0.0, 0.0),
                    Point3::new(10.0, 8.0, 9.0),
                ),
            })
            .with_door(DoorElement {
                id: DOOR,
                host_wall: WALL,
                location: Point3::new(3.5, 0.0, 0.0),
                facing: nalgebra::Vector3::new(0.0, 1.0, 0.0),
                from_room: None,
                to_room: Some(ROOM),
                geometry: vec![
                    // Sill edge, a duplicate at head height, and a jamb
                    GeometryNode::Curve(Segment::new(
                        Point3::new(2.0, 0.0, 0.0),
                        Point3::new(5.0, 0.0, 0.0),
                    )),
                    GeometryNode::Curve(Segment::new(
                        Point3::new(5.0, 0.0, 7.0),
                        Point3::new(2.0, 0.0, 7.0),
                    )),
                    GeometryNode::Curve(Segment::new(
                        Point3::new(2.0, 0.0, 0.0),
                        Point3::new(2.0, 0.0, 7.0),
                    )),
                ],
            })
            .with_floor_type(FloorType {
                id: GENERIC,
                name: "Generic 150mm".to_owned(),
            })
    }

    #[test]
    fn test_dedups_door_plan_edges() {
        let doc = door_doc();
        let edges = door_plan_edges(&doc.doors()[0]);
        assert_eq!(edges.len(), 1);
        assert_relative_eq!(edges[0].length(), 3.0);
    }

    #[test]
    fn test_boundary_dents_outward_at_the_door() {
        let mut doc = door_doc();
        let outcome = create_door_thresholds(&mut doc).unwrap();
        assert!(outcome.is_created());

        let CreatedElement::Floor { boundary, floor_type, .. } = &doc.created[0] else {
            panic!("expected a floor");
        };
        assert_eq!(*floor_type, GENERIC);
        // Four base vertices plus the four-point dent
        assert_eq!(boundary.len(), 8);
        assert!(loops::are_continuous(boundary, true));
        assert!(loops::is_closed_loop(boundary));
        assert!(!loops::has_interior_intersection(boundary));

        // The dent reaches y = -0.25, half the wall width outside the room
        let min_y = boundary
            .iter()
            .flat_map(|s| [s.start.y, s.end.y])
            .fold(f64::INFINITY, f64::min);
        assert_relative_eq!(min_y, -0.25, epsilon = 1e-9);
    }

    #[test]
    fn test_replaces_existing_floor_keeping_type() {
        let old_type = ElementId(7);
        let old_floor = ElementId(8);
        let mut doc = door_doc().with_floor(FloorElement {
            id: old_floor,
            floor_type: old_type,
            level: LEVEL,
            height_offset: -0.1,
            geometry: vec![GeometryNode::Solid(Solid::rectangular(
                Point3::new(0.0, 0.0, -0.5),
                Point3::new(10.0, 8.0, 0.0),
            ))],
        });

        let outcome = create_door_thresholds(&mut doc).unwrap();
        assert!(outcome.is_created());
        assert!(doc.is_deleted(old_floor));

        let (floor_type, height_offset) = doc
            .created
            .iter()
            .find_map(|c| match c {
                CreatedElement::Floor { floor_type, height_offset, .. } => {
                    Some((*floor_type, *height_offset))
                }
                _ => None,
            })
            .unwrap();
        assert_eq!(floor_type, old_type);
        assert_relative_eq!(height_offset, -0.1);
    }

    #[test]
    fn test_rejects_when_door_is_off_the_boundary() {
        let base = door_doc();
        let mut room = base.rooms().remove(0);
        // Shell elsewhere: the boundary no longer carries the door edge
        room.geometry = vec![GeometryNode::Solid(Solid::rectangular(
            Point3::new(20.0, 20.0, 0.0),
            Point3::new(30.0, 28.0, 9.0),
        ))];

        let mut doc = MemoryDocument::new()
            .with_wall(base.walls().remove(0))
            .with_door(base.doors().remove(0))
            .with_floor_type(base.floor_types().remove(0))
            .with_room(room);
        let outcome = create_door_thresholds(&mut doc).unwrap();
        assert!(matches!(outcome, TaskOutcome::Rejected(_)));
    }
}
