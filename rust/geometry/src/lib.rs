//! Plankit Geometry
//!
//! Tolerance-based 2D/3D line-and-loop geometry for building models:
//! segment relationship classification, closed-loop detection and repair,
//! boundary splicing and segment sampling, all built on nalgebra.

pub mod algebra;
pub mod bounds;
pub mod error;
pub mod face;
pub mod loops;
pub mod relation;
pub mod sampling;
pub mod segment;
pub mod solid;
pub mod tolerance;

// Re-export nalgebra types for convenience
pub use nalgebra::{Isometry3, Point3, Vector3};

pub use bounds::{BoundingBox, Corner};
pub use error::{Error, Result};
pub use face::PlanarFace;
pub use relation::Relation;
pub use sampling::DivideOptions;
pub use segment::{Line, Segment};
pub use solid::Solid;
pub use tolerance::{DECIMAL_PLACES, TOLERANCE};
