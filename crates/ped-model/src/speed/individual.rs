//! Collision-free speed model with per-profile neighbor repulsion.
//!
//! Heterogeneous crowds (e.g. mixed adults and children) tune how strongly
//! each group yields to others; wall behavior stays uniform, so the geometry
//! constants remain on the model instance.

use ped_agent::{Agent, AgentStore};
use ped_core::ParametersId;
use ped_geometry::CollisionGeometry;
use ped_spatial::NeighborhoodSearch;

use crate::error::ModelResult;
use crate::model::{
    AgentUpdate, MAX_AGENT_RADIUS, ModelKind, OperationalModel, check_boundary_clearance,
    check_no_overlap, validate_range,
};
use crate::profile::ProfileTable;
use crate::speed::ops::{self, RepulsionParams};

/// Per-profile parameters with individual neighbor repulsion.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IndividualSpeedProfile {
    pub strength_neighbor_repulsion: f64,
    pub range_neighbor_repulsion: f64,
    pub time_gap: f64,
    pub v0: f64,
}

impl Default for IndividualSpeedProfile {
    fn default() -> Self {
        Self {
            strength_neighbor_repulsion: 8.0,
            range_neighbor_repulsion: 0.1,
            time_gap: 1.0,
            v0: 1.2,
        }
    }
}

/// Collision-free speed model, neighbor constants per profile.
#[derive(Clone, Debug)]
pub struct CollisionFreeSpeedModelIndividual {
    strength_geometry_repulsion: f64,
    range_geometry_repulsion: f64,
    profiles: ProfileTable<IndividualSpeedProfile>,
}

impl OperationalModel for CollisionFreeSpeedModelIndividual {
    fn kind(&self) -> ModelKind {
        ModelKind::CollisionFreeSpeedIndividual
    }

    fn cutoff_radius(&self) -> f64 {
        ops::CUTOFF_RADIUS
    }

    fn compute_new_position(
        &self,
        delta_t: f64,
        agent: &Agent,
        agents: &AgentStore,
        geometry: &CollisionGeometry,
        neighborhood: &NeighborhoodSearch,
    ) -> AgentUpdate {
        let profile = self.profiles.resolve(agent.profile);
        let params = RepulsionParams {
            strength_neighbor: profile.strength_neighbor_repulsion,
            range_neighbor: profile.range_neighbor_repulsion,
            strength_geometry: self.strength_geometry_repulsion,
            range_geometry: self.range_geometry_repulsion,
        };
        ops::compute_update(
            delta_t,
            agent,
            agents,
            geometry,
            neighborhood,
            params,
            profile.time_gap,
            profile.v0,
            false,
        )
    }

    fn check_model_constraint(
        &self,
        agent: &Agent,
        agents: &AgentStore,
        geometry: &CollisionGeometry,
        neighborhood: &NeighborhoodSearch,
    ) -> ModelResult<()> {
        validate_range("radius", agent.radius, 0.01, MAX_AGENT_RADIUS)?;
        check_no_overlap(agent, agents, neighborhood, ops::CUTOFF_RADIUS)?;
        check_boundary_clearance(agent, geometry)
    }

    fn has_profile(&self, id: ParametersId) -> bool {
        self.profiles.contains(id)
    }

    fn clone_model(&self) -> Box<dyn OperationalModel> {
        Box::new(self.clone())
    }
}

/// Single-use builder for [`CollisionFreeSpeedModelIndividual`].
#[derive(Debug)]
pub struct CollisionFreeSpeedModelIndividualBuilder {
    model: CollisionFreeSpeedModelIndividual,
}

impl Default for CollisionFreeSpeedModelIndividualBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionFreeSpeedModelIndividualBuilder {
    pub fn new() -> Self {
        Self {
            model: CollisionFreeSpeedModelIndividual {
                strength_geometry_repulsion: 5.0,
                range_geometry_repulsion: 0.02,
                profiles: ProfileTable::new(),
            },
        }
    }

    pub fn strength_geometry_repulsion(mut self, value: f64) -> Self {
        self.model.strength_geometry_repulsion = value;
        self
    }

    pub fn range_geometry_repulsion(mut self, value: f64) -> Self {
        self.model.range_geometry_repulsion = value;
        self
    }

    /// Register a parameter profile, validating its ranges.
    pub fn add_parameter_profile(
        &mut self,
        profile: IndividualSpeedProfile,
    ) -> ModelResult<ParametersId> {
        validate_range(
            "strength_neighbor_repulsion",
            profile.strength_neighbor_repulsion,
            0.0,
            f64::INFINITY,
        )?;
        validate_range(
            "range_neighbor_repulsion",
            profile.range_neighbor_repulsion,
            f64::EPSILON,
            f64::INFINITY,
        )?;
        validate_range("time_gap", profile.time_gap, 0.1, 10.0)?;
        validate_range("v0", profile.v0, 0.0, 10.0)?;
        Ok(self.model.profiles.push(profile))
    }

    pub fn build(self) -> CollisionFreeSpeedModelIndividual {
        self.model
    }
}
