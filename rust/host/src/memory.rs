// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory host document for tests and headless runs.
//!
//! Seeded with element records through the builder methods, it records
//! every creation in order so tests can assert on exactly what a
//! workflow asked the host to build.

use nalgebra::Point3;
use plankit_geometry::Segment;
use rustc_hash::FxHashSet;

use crate::document::HostDocument;
use crate::element::{
    DoorElement, ElementId, FixturePlacement, FixtureType, FloorElement, FloorType, Level,
    RoomElement, SectionBox, WallElement, WindowElement,
};
use crate::error::{Error, Result};

/// A creation the document performed, in call order.
#[derive(Debug, Clone)]
pub enum CreatedElement {
    Floor {
        id: ElementId,
        boundary: Vec<Segment>,
        floor_type: ElementId,
        level: ElementId,
        height_offset: f64,
    },
    Level(Level),
    Fixture {
        id: ElementId,
        placement: FixturePlacement,
    },
    Section {
        id: ElementId,
        section: SectionBox,
    },
    ModelLine {
        id: ElementId,
        segment: Segment,
    },
    ModelPoint {
        id: ElementId,
        point: Point3<f64>,
    },
}

#[derive(Default)]
pub struct MemoryDocument {
    levels: Vec<Level>,
    rooms: Vec<RoomElement>,
    walls: Vec<WallElement>,
    doors: Vec<DoorElement>,
    windows: Vec<WindowElement>,
    floors: Vec<FloorElement>,
    floor_types: Vec<FloorType>,
    fixture_types: Vec<FixtureType>,
    deleted: FxHashSet<ElementId>,
    next_id: u64,
    /// Everything created through the document, in call order.
    pub created: Vec<CreatedElement>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self {
            // Seeded elements use low ids; created ones start above
            next_id: 1000,
            ..Self::default()
        }
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.levels.push(level);
        self
    }

    pub fn with_room(mut self, room: RoomElement) -> Self {
        self.rooms.push(room);
        self
    }

    pub fn with_wall(mut self, wall: WallElement) -> Self {
        self.walls.push(wall);
        self
    }

    pub fn with_door(mut self, door: DoorElement) -> Self {
        self.doors.push(door);
        self
    }

    pub fn with_window(mut self, window: WindowElement) -> Self {
        self.windows.push(window);
        self
    }

    pub fn with_floor(mut self, floor: FloorElement) -> Self {
        self.floors.push(floor);
        self
    }

    pub fn with_floor_type(mut self, floor_type: FloorType) -> Self {
        self.floor_types.push(floor_type);
        self
    }

    pub fn with_fixture_type(mut self, fixture_type: FixtureType) -> Self {
        self.fixture_types.push(fixture_type);
        self
    }

    pub fn is_deleted(&self, id: ElementId) -> bool {
        self.deleted.contains(&id)
    }

    fn allocate(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        id
    }

    fn alive<T: Clone>(&self, items: &[T], id_of: impl Fn(&T) -> ElementId) -> Vec<T> {
        items
            .iter()
            .filter(|item| !self.deleted.contains(&id_of(item)))
            .cloned()
            .collect()
    }
}

impl HostDocument for MemoryDocument {
    fn levels(&self) -> Vec<Level> {
        self.alive(&self.levels, |l| l.id)
    }

    fn rooms(&self) -> Vec<RoomElement> {
        self.alive(&self.rooms, |r| r.id)
    }

    fn walls(&self) -> Vec<WallElement> {
        self.alive(&self.walls, |w| w.id)
    }

    fn doors(&self) -> Vec<DoorElement> {
        self.alive(&self.doors, |d| d.id)
    }

    fn windows(&self) -> Vec<WindowElement> {
        self.alive(&self.windows, |w| w.id)
    }

    fn floors(&self) -> Vec<FloorElement> {
        self.alive(&self.floors, |f| f.id)
    }

    fn floor_types(&self) -> Vec<FloorType> {
        self.floor_types.clone()
    }

    fn fixture_types(&self) -> Vec<FixtureType> {
        self.fixture_types.clone()
    }

    fn wall(&self, id: ElementId) -> Result<WallElement> {
        self.walls
            .iter()
            .find(|w| w.id == id && !self.deleted.contains(&id))
            .cloned()
            .ok_or(Error::UnknownElement(id))
    }

    fn room(&self, id: ElementId) -> Result<RoomElement> {
        self.rooms
            .iter()
            .find(|r| r.id == id && !self.deleted.contains(&id))
            .cloned()
            .ok_or(Error::UnknownElement(id))
    }

    fn room_at_point(&self, point: &Point3<f64>) -> Option<RoomElement> {
        self.rooms
            .iter()
            .find(|r| {
                !self.deleted.contains(&r.id)
                    && r.bounding_box.contains(point, plankit_geometry::TOLERANCE)
            })
            .cloned()
    }

    fn create_floor(
        &mut self,
        boundary: &[Segment],
        floor_type: ElementId,
        level: ElementId,
        height_offset: f64,
    ) -> Result<ElementId> {
        let id = self.allocate();
        tracing::debug!(%id, edges = boundary.len(), "create floor");
        self.floors.push(FloorElement {
            id,
            floor_type,
            level,
            height_offset,
            geometry: Vec::new(),
        });
        self.created.push(CreatedElement::Floor {
            id,
            boundary: boundary.to_vec(),
            floor_type,
            level,
            height_offset,
        });
        Ok(id)
    }

    fn create_level(&mut self, name: &str, elevation: f64) -> Result<Level> {
        let level = Level {
            id: self.allocate(),
            name: name.to_owned(),
            elevation,
        };
        self.levels.push(level.clone());
        self.created.push(CreatedElement::Level(level.clone()));
        Ok(level)
    }

    fn place_fixture(&mut self, placement: &FixturePlacement) -> Result<ElementId> {
        if !self.fixture_types.iter().any(|t| t.id == placement.fixture_type) {
            return Err(Error::UnknownElement(placement.fixture_type));
        }
        let id = self.allocate();
        self.created.push(CreatedElement::Fixture {
            id,
            placement: placement.clone(),
        });
        Ok(id)
    }

    fn create_section(&mut self, section: &SectionBox) -> Result<ElementId> {
        let id = self.allocate();
        self.created.push(CreatedElement::Section {
            id,
            section: section.clone(),
        });
        Ok(id)
    }

    fn create_model_line(&mut self, segment: &Segment) -> Result<ElementId> {
        let id = self.allocate();
        self.created.push(CreatedElement::ModelLine {
            id,
            segment: *segment,
        });
        Ok(id)
    }

    fn create_model_point(&mut self, point: &Point3<f64>) -> Result<ElementId> {
        let id = self.allocate();
        self.created.push(CreatedElement::ModelPoint { id, point: *point });
        Ok(id)
    }

    fn delete_element(&mut self, id: ElementId) -> Result<()> {
        self.deleted.insert(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_floor_is_queryable() {
        let mut doc = MemoryDocument::new();
        let boundary = vec![Segment::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
        )];
        let id = doc
            .create_floor(&boundary, ElementId(1), ElementId(2), 0.5)
            .unwrap();
        assert_eq!(doc.floors().len(), 1);
        assert_eq!(doc.floors()[0].id, id);
        assert!(matches!(doc.created[0], CreatedElement::Floor { .. }));
    }

    #[test]
    fn test_deleted_elements_drop_out_of_queries() {
        let mut doc = MemoryDocument::new();
        let id = doc.create_floor(&[], ElementId(1), ElementId(2), 0.0).unwrap();
        doc.delete_element(id).unwrap();
        assert!(doc.floors().is_empty());
        assert!(doc.is_deleted(id));
    }

    #[test]
    fn test_room_at_point() {
        use crate::element::RoomElement;
        use plankit_geometry::BoundingBox;

        let doc = MemoryDocument::new().with_room(RoomElement {
            id: ElementId(9),
            name: "Hall".to_owned(),
            level: ElementId(1),
            location: Point3::new(2.0, 2.0, 0.0),
            geometry: Vec::new(),
            bounding_box: BoundingBox::new(
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(4.0, 4.0, 3.0),
            ),
        });
        assert!(doc.room_at_point(&Point3::new(1.0, 1.0, 1.0)).is_some());
        assert!(doc.room_at_point(&Point3::new(9.0, 9.0, 1.0)).is_none());
    }

    #[test]
    fn test_unknown_lookup_errors() {
        let doc = MemoryDocument::new();
        assert!(matches!(
            doc.wall(ElementId(42)),
            Err(Error::UnknownElement(ElementId(42)))
        ));
    }

    #[test]
    fn test_fixture_requires_loaded_type() {
        let mut doc = MemoryDocument::new();
        let placement = FixturePlacement {
            fixture_type: ElementId(5),
            host_wall: ElementId(6),
            level: ElementId(7),
            location: Point3::new(0.0, 0.0, 0.0),
            facing: nalgebra::Vector3::new(0.0, 1.0, 0.0),
            flip_hand: false,
        };
        assert!(doc.place_fixture(&placement).is_err());

        let mut doc = MemoryDocument::new().with_fixture_type(FixtureType {
            id: ElementId(5),
            family: "WC".to_owned(),
            name: "Standard".to_owned(),
        });
        assert!(doc.place_fixture(&placement).is_ok());
    }
}
