use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during geometric reasoning
#[derive(Error, Debug)]
pub enum Error {
    #[error("At least two points are required to build a boundary, got {0}")]
    TooFewPoints(usize),

    #[error("Division distance must be positive, got {0}")]
    InvalidDistance(f64),

    #[error("Segments do not intersect at a single point")]
    NoPointIntersection,

    #[error("Boundary insertion references edge {index} but the loop has {edges} edges")]
    InsertionOutOfRange { index: usize, edges: usize },
}
