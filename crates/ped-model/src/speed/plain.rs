//! Collision-free speed model with model-level repulsion constants.

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

/// Per-profile parameters shared by the plain collision-free speed model.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpeedProfile {
    /// Seconds of free travel the agent keeps between itself and the next
    /// obstacle; smaller values walk closer.
    pub time_gap: f64,
    /// Desired walking speed in m/s.
    pub v0: f64,
}

impl Default for SpeedProfile {
    fn default() -> Self {
        Self { time_gap: 1.0, v0: 1.2 }
    }
}

/// Collision-free speed model; every agent shares the model's repulsion
/// constants.
#[derive(Clone, Debug)]
pub struct CollisionFreeSpeedModel {
    params: RepulsionParams,
    profiles: ProfileTable<SpeedProfile>,
}

impl OperationalModel for CollisionFreeSpeedModel {
    fn kind(&self) -> ModelKind {
        ModelKind::CollisionFreeSpeed
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
        ops::compute_update(
            delta_t,
            agent,
            agents,
            geometry,
            neighborhood,
            self.params,
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

/// Single-use builder for [`CollisionFreeSpeedModel`].
#[derive(Debug)]
pub struct CollisionFreeSpeedModelBuilder {
    model: CollisionFreeSpeedModel,
}

impl Default for CollisionFreeSpeedModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionFreeSpeedModelBuilder {
    pub fn new() -> Self {
        Self {
            model: CollisionFreeSpeedModel {
                params: RepulsionParams {
                    strength_neighbor: 8.0,
                    range_neighbor: 0.1,
                    strength_geometry: 5.0,
                    range_geometry: 0.02,
                },
                profiles: ProfileTable::new(),
            },
        }
    }

    pub fn strength_neighbor_repulsion(mut self, value: f64) -> Self {
        self.model.params.strength_neighbor = value;
        self
    }

    pub fn range_neighbor_repulsion(mut self, value: f64) -> Self {
        self.model.params.range_neighbor = value;
        self
    }

    pub fn strength_geometry_repulsion(mut self, value: f64) -> Self {
        self.model.params.strength_geometry = value;
        self
    }

    pub fn range_geometry_repulsion(mut self, value: f64) -> Self {
        self.model.params.range_geometry = value;
        self
    }

    /// Register a parameter profile, validating its ranges.
    pub fn add_parameter_profile(&mut self, profile: SpeedProfile) -> ModelResult<ParametersId> {
        validate_range("time_gap", profile.time_gap, 0.1, 10.0)?;
        validate_range("v0", profile.v0, 0.0, 10.0)?;
        Ok(self.model.profiles.push(profile))
    }

    pub fn build(self) -> CollisionFreeSpeedModel {
        self.model
    }
}
