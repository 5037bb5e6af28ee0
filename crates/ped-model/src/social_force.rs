//! Social force model (Helbing–Molnár).
//!
//! Accelerations rather than positions are the primitive: a driving term
//! relaxes the velocity towards the desired one, exponential repulsion keeps
//! bodies apart, and on actual body overlap a stiff counter force plus
//! sliding friction take over.  Forces are in Newtons; the pairwise terms are
//! divided by the agent's mass before integration.
//!
//! Unlike the other model families there is no line-of-sight filter; the
//! exponential kernel decays fast enough that occluded neighbors contribute
//! nothing measurable.

use ped_agent::{Agent, AgentStore};
use ped_core::{ParametersId, Point};
use ped_geometry::CollisionGeometry;
use ped_spatial::NeighborhoodSearch;

use crate::error::ModelResult;
use crate::model::{
    AgentUpdate, MAX_AGENT_RADIUS, ModelKind, OperationalModel, check_boundary_clearance,
    check_no_overlap, desired_direction, validate_range,
};
use crate::profile::ProfileTable;

const CUTOFF_RADIUS: f64 = 3.0;

/// Per-profile parameters of the social force model.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SocialForceProfile {
    /// Body mass in kg.
    pub mass: f64,
    /// Desired walking speed in m/s.
    pub desired_speed: f64,
    /// Driving-term relaxation time in seconds.
    pub reaction_time: f64,
    /// Repulsion amplitude against other agents, in N.
    pub agent_scale: f64,
    /// Repulsion amplitude against walls, in N.
    pub obstacle_scale: f64,
    /// Repulsion decay length in metres.
    pub force_distance: f64,
}

impl Default for SocialForceProfile {
    fn default() -> Self {
        Self {
            mass: 80.0,
            desired_speed: 0.8,
            reaction_time: 0.5,
            agent_scale: 2000.0,
            obstacle_scale: 2000.0,
            force_distance: 0.08,
        }
    }
}

/// Social force model with its profile table.
#[derive(Clone, Debug)]
pub struct SocialForceModel {
    body_force: f64,
    friction: f64,
    profiles: ProfileTable<SocialForceProfile>,
}

impl SocialForceModel {
    /// Force between two circular bodies, in Newtons, pointing from `towards`
    /// to `pos` (i.e. pushing `pos` away).
    ///
    /// `contact` is the sum of the two radii (for a wall, the agent radius),
    /// `velocity_delta` the other body's velocity minus the agent's.
    fn force_between(
        &self,
        pos: Point,
        towards: Point,
        contact: f64,
        scale: f64,
        force_distance: f64,
        velocity_delta: Point,
    ) -> Point {
        let (dist, n) = (pos - towards).norm_and_normalized();
        let mut force = n * (scale * ((contact - dist) / force_distance).exp());
        if dist < contact {
            // Bodies overlap: stiff counter force plus sliding friction.
            let penetration = contact - dist;
            force += n * (self.body_force * penetration);
            let tangent = n.rotate90_deg();
            force += tangent * (self.friction * penetration * velocity_delta.dot(tangent));
        }
        force
    }
}

impl OperationalModel for SocialForceModel {
    fn kind(&self) -> ModelKind {
        ModelKind::SocialForce
    }

    fn cutoff_radius(&self) -> f64 {
        CUTOFF_RADIUS
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

        let e0 = desired_direction(agent.pos, agent.destination);
        let driving = (e0 * profile.desired_speed - agent.velocity) / profile.reaction_time;

        let mut force = Point::ZERO;
        for id in neighborhood.query(agent.pos, CUTOFF_RADIUS) {
            if id == agent.id {
                continue;
            }
            let Some(other) = agents.get(id) else { continue };
            force += self.force_between(
                agent.pos,
                other.pos,
                agent.radius + other.radius,
                profile.agent_scale,
                profile.force_distance,
                other.velocity - agent.velocity,
            );
        }
        for segment in geometry.segments_near(agent.pos) {
            force += self.force_between(
                agent.pos,
                segment.shortest_point(agent.pos),
                agent.radius,
                profile.obstacle_scale,
                profile.force_distance,
                -agent.velocity,
            );
        }

        let acceleration = driving + force / profile.mass;
        let velocity = agent.velocity + acceleration * delta_t;
        let position = agent.pos + velocity * delta_t;
        let (speed, direction) = velocity.norm_and_normalized();
        let orientation = if speed > 0.0 { direction } else { agent.orientation };
        AgentUpdate { position, velocity, orientation }
    }

    fn check_model_constraint(
        &self,
        agent: &Agent,
        agents: &AgentStore,
        geometry: &CollisionGeometry,
        neighborhood: &NeighborhoodSearch,
    ) -> ModelResult<()> {
        validate_range("radius", agent.radius, 0.01, MAX_AGENT_RADIUS)?;
        check_no_overlap(agent, agents, neighborhood, CUTOFF_RADIUS)?;
        check_boundary_clearance(agent, geometry)
    }

    fn has_profile(&self, id: ParametersId) -> bool {
        self.profiles.contains(id)
    }

    fn clone_model(&self) -> Box<dyn OperationalModel> {
        Box::new(self.clone())
    }
}

/// Single-use builder for [`SocialForceModel`].
#[derive(Debug)]
pub struct SocialForceModelBuilder {
    model: SocialForceModel,
}

impl Default for SocialForceModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SocialForceModelBuilder {
    pub fn new() -> Self {
        Self {
            model: SocialForceModel {
                body_force: 120_000.0,
                friction: 240_000.0,
                profiles: ProfileTable::new(),
            },
        }
    }

    pub fn body_force(mut self, value: f64) -> Self {
        self.model.body_force = value;
        self
    }

    pub fn friction(mut self, value: f64) -> Self {
        self.model.friction = value;
        self
    }

    /// Register a parameter profile, validating its ranges.
    pub fn add_parameter_profile(
        &mut self,
        profile: SocialForceProfile,
    ) -> ModelResult<ParametersId> {
        validate_range("mass", profile.mass, 1.0, 100.0)?;
        validate_range("desired_speed", profile.desired_speed, 0.0, 10.0)?;
        validate_range("reaction_time", profile.reaction_time, 0.1, 10.0)?;
        validate_range("agent_scale", profile.agent_scale, 0.0, f64::INFINITY)?;
        validate_range("obstacle_scale", profile.obstacle_scale, 0.0, f64::INFINITY)?;
        validate_range("force_distance", profile.force_distance, f64::EPSILON, f64::INFINITY)?;
        Ok(self.model.profiles.push(profile))
    }

    pub fn build(self) -> SocialForceModel {
        self.model
    }
}
