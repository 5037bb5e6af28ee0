//! The operational model abstraction.
//!
//! # Two-phase update contract
//!
//! `compute_new_position` must treat everything behind its `&` parameters as
//! an immutable snapshot: it may not observe any update computed for another
//! agent in the same iteration.  The simulation loop computes updates for all
//! agents first, then applies them, so results are independent of agent order
//! and safe to compute in parallel.

use ped_agent::{Agent, AgentStore};
use ped_core::{AgentId, LineSegment, ParametersId, Point};
use ped_geometry::CollisionGeometry;
use ped_spatial::NeighborhoodSearch;

use crate::error::{ModelError, ModelResult};

/// Agents closer to their destination than this are considered arrived and
/// receive no driving impulse.
pub(crate) const GOAL_EPSILON: f64 = 1e-3;

/// Largest admissible body radius; admission checks and neighborhood query
/// sizing both depend on it.
pub(crate) const MAX_AGENT_RADIUS: f64 = 2.0;

/// The per-iteration result of a model evaluation for one agent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AgentUpdate {
    pub position: Point,
    pub velocity: Point,
    pub orientation: Point,
}

/// Which operational model a trait object implements.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ModelKind {
    GeneralizedCentrifugalForce,
    SocialForce,
    CollisionFreeSpeed,
    CollisionFreeSpeedIndividual,
    CollisionFreeSpeedV2,
    CollisionFreeSpeedV3,
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ModelKind::GeneralizedCentrifugalForce => "generalized centrifugal force",
            ModelKind::SocialForce => "social force",
            ModelKind::CollisionFreeSpeed => "collision-free speed",
            ModelKind::CollisionFreeSpeedIndividual => "collision-free speed (individual)",
            ModelKind::CollisionFreeSpeedV2 => "collision-free speed (v2)",
            ModelKind::CollisionFreeSpeedV3 => "collision-free speed (v3)",
        };
        f.write_str(name)
    }
}

/// An operational movement model.
///
/// `Send + Sync` because updates for different agents are computed on worker
/// threads when the `parallel` feature of `ped-sim` is enabled.
pub trait OperationalModel: Send + Sync {
    fn kind(&self) -> ModelKind;

    /// Interaction range in metres.  Also the neighborhood grid cell size.
    fn cutoff_radius(&self) -> f64;

    /// Compute this agent's state after `delta_t` seconds, reading only the
    /// snapshot behind the shared references.
    fn compute_new_position(
        &self,
        delta_t: f64,
        agent: &Agent,
        agents: &AgentStore,
        geometry: &CollisionGeometry,
        neighborhood: &NeighborhoodSearch,
    ) -> AgentUpdate;

    /// Write a computed update back into the agent.
    fn apply_update(&self, agent: &mut Agent, update: &AgentUpdate) {
        agent.pos = update.position;
        agent.velocity = update.velocity;
        agent.orientation = update.orientation;
    }

    /// Validate that `agent` is admissible under this model: parameters in
    /// range, no body overlap with neighbors, clear of walls.
    fn check_model_constraint(
        &self,
        agent: &Agent,
        agents: &AgentStore,
        geometry: &CollisionGeometry,
        neighborhood: &NeighborhoodSearch,
    ) -> ModelResult<()>;

    /// Whether `id` refers to a profile registered with this model.
    fn has_profile(&self, id: ParametersId) -> bool;

    /// Clone into a fresh trait object.
    fn clone_model(&self) -> Box<dyn OperationalModel>;
}

impl Clone for Box<dyn OperationalModel> {
    fn clone(&self) -> Self {
        self.clone_model()
    }
}

// ── Shared model helpers ──────────────────────────────────────────────────────

/// Unit vector towards the destination, or null within the goal epsilon so
/// arrived agents brake instead of oscillating around the target.
#[inline]
pub(crate) fn desired_direction(pos: Point, destination: Point) -> Point {
    let (dist, direction) = (destination - pos).norm_and_normalized();
    if dist > GOAL_EPSILON { direction } else { Point::ZERO }
}

/// Neighbors of `agent` within `radius` that are in line of sight.
///
/// Agents behind a wall exert no influence.  The query includes the asking
/// agent; it is filtered out here.
pub(crate) fn visible_neighbors(
    agent: &Agent,
    agents: &AgentStore,
    geometry: &CollisionGeometry,
    neighborhood: &NeighborhoodSearch,
    radius: f64,
) -> Vec<AgentId> {
    neighborhood
        .query(agent.pos, radius)
        .into_iter()
        .filter(|&id| id != agent.id)
        .filter(|&id| {
            agents.get(id).is_some_and(|other| {
                !geometry.intersects_any(LineSegment::new(agent.pos, other.pos))
            })
        })
        .collect()
}

/// Range validation for builder-supplied parameters.
pub(crate) fn validate_range(
    name: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> ModelResult<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ModelError::ParameterOutOfRange { name, value, min, max })
    }
}

/// Reject `agent` if its body overlaps any neighbor's.
pub(crate) fn check_no_overlap(
    agent: &Agent,
    agents: &AgentStore,
    neighborhood: &NeighborhoodSearch,
    radius: f64,
) -> ModelResult<()> {
    for id in neighborhood.query(agent.pos, radius) {
        if id == agent.id {
            continue;
        }
        let Some(other) = agents.get(id) else { continue };
        let distance = (other.pos - agent.pos).norm();
        let contact = agent.radius + other.radius;
        if distance < contact {
            return Err(ModelError::AgentOverlap { agent: agent.id, other: id, distance, contact });
        }
    }
    Ok(())
}

/// Reject `agent` if any wall is closer than its body radius.
pub(crate) fn check_boundary_clearance(
    agent: &Agent,
    geometry: &CollisionGeometry,
) -> ModelResult<()> {
    match geometry.segments_within(agent.pos, agent.radius).first() {
        Some(segment) => Err(ModelError::CloseToBoundary {
            agent: agent.id,
            distance: segment.dist_to(agent.pos),
        }),
        None => Ok(()),
    }
}
