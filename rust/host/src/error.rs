use thiserror::Error;

use crate::element::ElementId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("no element with id {0}")]
    UnknownElement(ElementId),

    #[error("element {0} has no usable solid geometry")]
    MissingSolid(ElementId),

    #[error(transparent)]
    Geometry(#[from] plankit_geometry::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
