//! Simulation-level errors.

use ped_core::{AgentId, ParametersId};
use ped_model::ModelError;
use thiserror::Error;

/// Errors reported by simulation construction and agent management.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("parameter profile {0} is not registered with the model")]
    UnknownProfile(ParametersId),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Shorthand result type for `ped-sim`.
pub type SimResult<T> = Result<T, SimError>;
