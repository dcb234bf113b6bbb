//! Modeling automation workflows.
//!
//! Each workflow drives a [`plankit_host::HostDocument`] end to end:
//! validate input through the geometry gates, then create elements
//! inside a named transaction. Outcomes distinguish created elements,
//! rejected input, and cancelled picks.

pub mod fixture;
pub mod floor_boundary;
pub mod framing;
pub mod outcome;
pub mod section;
pub mod threshold;

pub use fixture::{place_wall_fixture, FixtureConfig};
pub use floor_boundary::{create_floor_from_segments, FloorOptions};
pub use framing::{layout_wall_studs, FramingConfig};
pub use outcome::TaskOutcome;
pub use section::{create_section_between_points, SectionConfig};
pub use threshold::create_door_thresholds;
