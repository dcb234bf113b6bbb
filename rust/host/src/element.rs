// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Element records snapshotted out of the host building model.
//!
//! Records carry everything a workflow reads up front: ids, placement,
//! prefetched geometry trees. Workflows never call back into the host to
//! re-query an element they already hold.

use std::fmt;

use nalgebra::{Point3, Vector3};
use plankit_geometry::{BoundingBox, Segment};

use crate::extract::GeometryNode;

/// Stable host identifier for a model element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Host element category, used by selection filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Wall,
    Room,
    Door,
    Window,
    Floor,
    Fixture,
    Level,
    GenericModel,
}

/// A lightweight handle to a pickable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementRef {
    pub id: ElementId,
    pub category: Category,
}

/// A named horizontal datum.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub id: ElementId,
    pub name: String,
    pub elevation: f64,
}

#[derive(Debug, Clone)]
pub struct RoomElement {
    pub id: ElementId,
    pub name: String,
    pub level: ElementId,
    /// The room's location point, inside the room at level elevation.
    pub location: Point3<f64>,
    /// Closed-shell geometry of the room volume.
    pub geometry: Vec<GeometryNode>,
    pub bounding_box: BoundingBox,
}

#[derive(Debug, Clone)]
pub struct WallElement {
    pub id: ElementId,
    pub level: ElementId,
    /// Centerline of the wall in plan.
    pub location_line: Segment,
    pub width: f64,
    pub geometry: Vec<GeometryNode>,
}

#[derive(Debug, Clone)]
pub struct DoorElement {
    pub id: ElementId,
    pub host_wall: ElementId,
    pub location: Point3<f64>,
    /// Direction the door opens toward.
    pub facing: Vector3<f64>,
    pub from_room: Option<ElementId>,
    pub to_room: Option<ElementId>,
    /// Full geometry tree including non-visible reference curves.
    pub geometry: Vec<GeometryNode>,
}

#[derive(Debug, Clone)]
pub struct WindowElement {
    pub id: ElementId,
    pub host_wall: ElementId,
    pub bounding_box: BoundingBox,
}

#[derive(Debug, Clone)]
pub struct FloorElement {
    pub id: ElementId,
    pub floor_type: ElementId,
    pub level: ElementId,
    pub height_offset: f64,
    pub geometry: Vec<GeometryNode>,
}

/// A loaded floor type.
#[derive(Debug, Clone, PartialEq)]
pub struct FloorType {
    pub id: ElementId,
    pub name: String,
}

/// A loadable fixture family symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureType {
    pub id: ElementId,
    pub family: String,
    pub name: String,
}

/// Everything the host needs to instantiate a wall-hosted fixture.
#[derive(Debug, Clone)]
pub struct FixturePlacement {
    pub fixture_type: ElementId,
    pub host_wall: ElementId,
    pub level: ElementId,
    pub location: Point3<f64>,
    /// Desired facing after placement; the host flips the instance when
    /// its default facing disagrees.
    pub facing: Vector3<f64>,
    /// Mirror the instance across its facing axis after placement.
    pub flip_hand: bool,
}

/// Right-handed frame positioning a section view.
#[derive(Debug, Clone)]
pub struct SectionFrame {
    pub origin: Point3<f64>,
    pub basis_x: Vector3<f64>,
    pub basis_y: Vector3<f64>,
    pub basis_z: Vector3<f64>,
}

/// Oriented crop box for a section view, extents local to the frame.
#[derive(Debug, Clone)]
pub struct SectionBox {
    pub frame: SectionFrame,
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}
