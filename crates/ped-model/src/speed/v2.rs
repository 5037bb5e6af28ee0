//! Collision-free speed model V2: every repulsion constant per profile.

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

/// Fully per-profile parameter set, shared by V2 and V3.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpeedProfileV2 {
    pub strength_neighbor_repulsion: f64,
    pub range_neighbor_repulsion: f64,
    pub strength_geometry_repulsion: f64,
    pub range_geometry_repulsion: f64,
    pub time_gap: f64,
    pub v0: f64,
}

impl Default for SpeedProfileV2 {
    fn default() -> Self {
        Self {
            strength_neighbor_repulsion: 8.0,
            range_neighbor_repulsion: 0.1,
            strength_geometry_repulsion: 5.0,
            range_geometry_repulsion: 0.02,
            time_gap: 1.0,
            v0: 1.2,
        }
    }
}

pub(crate) fn validate_profile(profile: &SpeedProfileV2) -> ModelResult<()> {
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
    validate_range(
        "strength_geometry_repulsion",
        profile.strength_geometry_repulsion,
        0.0,
        f64::INFINITY,
    )?;
    validate_range(
        "range_geometry_repulsion",
        profile.range_geometry_repulsion,
        f64::EPSILON,
        f64::INFINITY,
    )?;
    validate_range("time_gap", profile.time_gap, 0.1, 10.0)?;
    validate_range("v0", profile.v0, 0.0, 10.0)
}

pub(crate) fn repulsion_params(profile: &SpeedProfileV2) -> RepulsionParams {
    RepulsionParams {
        strength_neighbor: profile.strength_neighbor_repulsion,
        range_neighbor: profile.range_neighbor_repulsion,
        strength_geometry: profile.strength_geometry_repulsion,
        range_geometry: profile.range_geometry_repulsion,
    }
}

/// Collision-free speed model V2.
#[derive(Clone, Debug, Default)]
pub struct CollisionFreeSpeedModelV2 {
    profiles: ProfileTable<SpeedProfileV2>,
}

impl OperationalModel for CollisionFreeSpeedModelV2 {
    fn kind(&self) -> ModelKind {
        ModelKind::CollisionFreeSpeedV2
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

/// Single-use builder for [`CollisionFreeSpeedModelV2`].
///
/// The model itself has no constants; everything lives in the profiles.
#[derive(Debug, Default)]
pub struct CollisionFreeSpeedModelV2Builder {
    model: CollisionFreeSpeedModelV2,
}

impl CollisionFreeSpeedModelV2Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a parameter profile, validating its ranges.
    pub fn add_parameter_profile(&mut self, profile: SpeedProfileV2) -> ModelResult<ParametersId> {
        validate_profile(&profile)?;
        Ok(self.model.profiles.push(profile))
    }

    pub fn build(self) -> CollisionFreeSpeedModelV2 {
        self.model
    }
}
