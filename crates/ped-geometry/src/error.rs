//! Geometry construction errors.

use ped_core::AreaId;
use thiserror::Error;

/// Errors reported while assembling collision geometry or areas.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("segment {index} has zero length")]
    DegenerateSegment { index: usize },

    #[error("duplicate area id {0}")]
    DuplicateAreaId(AreaId),

    #[error("area {id} polygon has {count} points, need at least 3")]
    MalformedPolygon { id: AreaId, count: usize },
}

/// Shorthand result type for `ped-geometry`.
pub type GeometryResult<T> = Result<T, GeometryError>;
