//! Host building-model contract.
//!
//! Everything automation workflows need from a BIM host, behind traits:
//! element snapshots, geometry-tree extraction, interactive selection,
//! and transactional creation. [`MemoryDocument`] implements the full
//! contract in memory for tests and headless runs.

pub mod document;
pub mod element;
pub mod error;
pub mod extract;
pub mod memory;
pub mod selection;
pub mod sketch;

pub use document::{level_at_or_below, HostDocument};
pub use element::{
    Category, DoorElement, ElementId, ElementRef, FixturePlacement, FixtureType, FloorElement,
    FloorType, Level, RoomElement, SectionBox, SectionFrame, WallElement, WindowElement,
};
pub use error::{Error, Result};
pub use extract::{flatten_curves, flatten_solid, GeometryNode};
pub use memory::{CreatedElement, MemoryDocument};
pub use selection::{ScriptedSelection, SelectionFilter, SelectionProvider};
