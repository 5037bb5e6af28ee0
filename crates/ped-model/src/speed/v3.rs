//! Collision-free speed model V3: V2 parameters, and walls ahead also
//! throttle the speed.
//!
//! V2 only steers away from walls; an agent aimed straight at one keeps full
//! speed until repulsion turns it.  V3 feeds the nearest wall in the forward
//! corridor into the spacing minimum, so agents slow down for dead ends the
//! same way they slow down for people.

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
use crate::speed::ops;
use crate::speed::v2::{SpeedProfileV2, repulsion_params, validate_profile};

/// Collision-free speed model V3.
#[derive(Clone, Debug, Default)]
pub struct CollisionFreeSpeedModelV3 {
    profiles: ProfileTable<SpeedProfileV2>,
}

impl OperationalModel for CollisionFreeSpeedModelV3 {
    fn kind(&self) -> ModelKind {
        ModelKind::CollisionFreeSpeedV3
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
            repulsion_params(profile),
            profile.time_gap,
            profile.v0,
            true,
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

/// Single-use builder for [`CollisionFreeSpeedModelV3`].
#[derive(Debug, Default)]
pub struct CollisionFreeSpeedModelV3Builder {
    model: CollisionFreeSpeedModelV3,
}

impl CollisionFreeSpeedModelV3Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a parameter profile, validating its ranges.
    pub fn add_parameter_profile(&mut self, profile: SpeedProfileV2) -> ModelResult<ParametersId> {
        validate_profile(&profile)?;
        Ok(self.model.profiles.push(profile))
    }

    pub fn build(self) -> CollisionFreeSpeedModelV3 {
        self.model
    }
}
