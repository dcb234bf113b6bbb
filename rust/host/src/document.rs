// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The host document contract.
//!
//! Workflows talk to the building model only through [`HostDocument`]:
//! snapshot queries on one side, creation and mutation on the other.
//! Mutations run inside named transactions so a host adapter can map
//! them onto its own undo scopes.

use nalgebra::Point3;
use plankit_geometry::Segment;

use crate::element::{
    DoorElement, ElementId, FixturePlacement, FixtureType, FloorElement, FloorType, Level,
    RoomElement, SectionBox, WallElement, WindowElement,
};
use crate::error::Result;

pub trait HostDocument {
    fn levels(&self) -> Vec<Level>;
    fn rooms(&self) -> Vec<RoomElement>;
    fn walls(&self) -> Vec<WallElement>;
    fn doors(&self) -> Vec<DoorElement>;
    fn windows(&self) -> Vec<WindowElement>;
    fn floors(&self) -> Vec<FloorElement>;
    fn floor_types(&self) -> Vec<FloorType>;
    fn fixture_types(&self) -> Vec<FixtureType>;

    fn wall(&self, id: ElementId) -> Result<WallElement>;
    fn room(&self, id: ElementId) -> Result<RoomElement>;

    /// The room whose extent contains the point, if any.
    fn room_at_point(&self, point: &Point3<f64>) -> Option<RoomElement>;

    /// Creates a floor from a continuous closed boundary.
    fn create_floor(
        &mut self,
        boundary: &[Segment],
        floor_type: ElementId,
        level: ElementId,
        height_offset: f64,
    ) -> Result<ElementId>;

    /// Creates a level at the given elevation.
    fn create_level(&mut self, name: &str, elevation: f64) -> Result<Level>;

    fn place_fixture(&mut self, placement: &FixturePlacement) -> Result<ElementId>;

    fn create_section(&mut self, section: &SectionBox) -> Result<ElementId>;

    /// Creates a model line for design-time visualization.
    fn create_model_line(&mut self, segment: &Segment) -> Result<ElementId>;

    /// Creates a reference point for design-time visualization.
    fn create_model_point(&mut self, point: &Point3<f64>) -> Result<ElementId>;

    fn delete_element(&mut self, id: ElementId) -> Result<()>;

    /// Runs `work` inside a named undo scope.
    ///
    /// The default implementation only logs scope boundaries; adapters
    /// backed by a real host override it with begin/commit/rollback.
    fn transaction<T>(
        &mut self,
        name: &str,
        work: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T>
    where
        Self: Sized,
    {
        tracing::debug!(transaction = name, "begin");
        let outcome = work(self);
        match &outcome {
            Ok(_) => tracing::debug!(transaction = name, "commit"),
            Err(err) => tracing::warn!(transaction = name, error = %err, "rolled back"),
        }
        outcome
    }
}

/// The level whose elevation is closest at or below `elevation`, falling
/// back to the lowest level of the document.
pub fn level_at_or_below(levels: &[Level], elevation: f64) -> Option<Level> {
    levels
        .iter()
        .filter(|l| l.elevation <= elevation + plankit_geometry::TOLERANCE)
        .max_by(|a, b| a.elevation.partial_cmp(&b.elevation).expect("finite"))
        .or_else(|| {
            levels
                .iter()
                .min_by(|a, b| a.elevation.partial_cmp(&b.elevation).expect("finite"))
        })
        .cloned()
}
