//! Model parameter and constraint errors.

use ped_core::{AgentId, ParametersId};
use thiserror::Error;

/// Errors reported by model builders and constraint checks.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("parameter {name} = {value} outside [{min}, {max}]")]
    ParameterOutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("agent {agent} overlaps agent {other}: distance {distance:.3} < contact {contact:.3}")]
    AgentOverlap {
        agent: AgentId,
        other: AgentId,
        distance: f64,
        contact: f64,
    },

    #[error("agent {agent} is {distance:.3} m from a wall, closer than its radius")]
    CloseToBoundary { agent: AgentId, distance: f64 },

    #[error("unknown parameter profile {0}")]
    UnknownProfile(ParametersId),
}

/// Shorthand result type for `ped-model`.
pub type ModelResult<T> = Result<T, ModelError>;
