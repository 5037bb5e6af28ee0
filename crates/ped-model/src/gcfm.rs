//! Generalized centrifugal force model.
//!
//! A force-based model: driving force towards the destination plus
//! centrifugal repulsion from neighbors and walls, integrated with
//! semi-implicit Euler.  Repulsion scales with the approach speed and acts
//! only on neighbors inside the forward half-plane of motion, so agents are
//! not pushed by people behind them.
//!
//! The singular `1/distance` repulsion is replaced below an interpolation
//! width by a capped linear ramp, keeping forces finite even for overlapping
//! bodies.

use ped_agent::{Agent, AgentStore};
use ped_core::{ParametersId, Point};
use ped_geometry::CollisionGeometry;
use ped_spatial::NeighborhoodSearch;

use crate::error::ModelResult;
use crate::model::{
    AgentUpdate, MAX_AGENT_RADIUS, ModelKind, OperationalModel, check_boundary_clearance,
    check_no_overlap, desired_direction, validate_range, visible_neighbors,
};
use crate::profile::ProfileTable;

/// Per-profile parameters of the centrifugal force model.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GcfmProfile {
    /// Body mass in kg.
    pub mass: f64,
    /// Driving-force relaxation time in seconds.
    pub tau: f64,
    /// Desired walking speed in m/s.
    pub v0: f64,
}

impl Default for GcfmProfile {
    fn default() -> Self {
        Self { mass: 1.0, tau: 0.5, v0: 1.2 }
    }
}

/// Generalized centrifugal force model with its profile table.
#[derive(Clone, Debug)]
pub struct GcfmModel {
    strength_neighbor_repulsion: f64,
    strength_geometry_repulsion: f64,
    max_neighbor_interaction_distance: f64,
    max_geometry_interaction_distance: f64,
    max_neighbor_interpolation_distance: f64,
    max_geometry_interpolation_distance: f64,
    max_neighbor_repulsion_force: f64,
    max_geometry_repulsion_force: f64,
    profiles: ProfileTable<GcfmProfile>,
}

impl GcfmModel {
    fn driving_force(&self, agent: &Agent, profile: &GcfmProfile) -> Point {
        let e0 = desired_direction(agent.pos, agent.destination);
        (e0 * profile.v0 - agent.velocity) * (profile.mass / profile.tau)
    }

    /// Repulsion exerted on `agent` by `other`, pointing away from `other`.
    ///
    /// Cuts on the effective (body-to-body) distance, so two wide agents
    /// interact at the same gap as two narrow ones.
    fn neighbor_force(&self, agent: &Agent, other: &Agent, profile: &GcfmProfile) -> Point {
        let (dist, e_ij) = (other.pos - agent.pos).norm_and_normalized();
        let dist_eff = dist - agent.radius - other.radius;
        if dist_eff > self.max_neighbor_interaction_distance {
            return Point::ZERO;
        }

        // Forward-cone factor: full weight straight ahead, zero behind.
        let (speed, _) = agent.velocity.norm_and_normalized();
        let k_ij = if speed > 0.0 {
            (agent.velocity.dot(e_ij) / speed).max(0.0)
        } else {
            0.0
        };
        if k_ij == 0.0 {
            return Point::ZERO;
        }

        // Approach speed, positive part only.
        let v_ij = (agent.velocity - other.velocity).dot(e_ij).max(0.0);
        let nom = self.strength_neighbor_repulsion * profile.v0 + v_ij;
        let scale = profile.mass * k_ij * nom * nom;
        let magnitude = interpolated_repulsion(
            scale,
            dist_eff,
            self.max_neighbor_interpolation_distance,
            self.max_neighbor_repulsion_force,
        );
        -e_ij * magnitude
    }

    /// Repulsion exerted on `agent` by a wall, pointing away from the wall.
    fn geometry_force(
        &self,
        agent: &Agent,
        wall_point: Point,
        profile: &GcfmProfile,
    ) -> Point {
        let (dist, e_iw) = (wall_point - agent.pos).norm_and_normalized();
        let dist_eff = dist - agent.radius;
        if dist_eff > self.max_geometry_interaction_distance {
            return Point::ZERO;
        }

        let (speed, _) = agent.velocity.norm_and_normalized();
        let k_iw = if speed > 0.0 {
            (agent.velocity.dot(e_iw) / speed).max(0.0)
        } else {
            0.0
        };
        if k_iw == 0.0 {
            return Point::ZERO;
        }

        let v_iw = agent.velocity.dot(e_iw).max(0.0);
        let nom = self.strength_geometry_repulsion * profile.v0 + v_iw;
        let scale = profile.mass * k_iw * nom * nom;
        let magnitude = interpolated_repulsion(
            scale,
            dist_eff,
            self.max_geometry_interpolation_distance,
            self.max_geometry_repulsion_force,
        );
        -e_iw * magnitude
    }
}

/// `scale / dist` beyond the interpolation width; below it, a linear ramp
/// sharing the boundary value at `dist_eff = width`.  The cap applies to
/// both branches, so the force is continuous across the boundary and finite
/// for any distance, including overlap.
fn interpolated_repulsion(scale: f64, dist_eff: f64, width: f64, max_force: f64) -> f64 {
    let raw = if dist_eff >= width {
        scale / dist_eff
    } else {
        (scale / width) * (2.0 - dist_eff / width)
    };
    raw.min(max_force)
}

impl OperationalModel for GcfmModel {
    fn kind(&self) -> ModelKind {
        ModelKind::GeneralizedCentrifugalForce
    }

    fn cutoff_radius(&self) -> f64 {
        // The force cut is body-to-body; the center-to-center query must
        // reach bodies whose radii push their centers farther out.
        self.max_neighbor_interaction_distance + 2.0 * MAX_AGENT_RADIUS
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

        let mut force = self.driving_force(agent, profile);
        for id in visible_neighbors(agent, agents, geometry, neighborhood, self.cutoff_radius()) {
            if let Some(other) = agents.get(id) {
                force += self.neighbor_force(agent, other, profile);
            }
        }
        let wall_query = self.max_geometry_interaction_distance + agent.radius;
        for segment in geometry.segments_within(agent.pos, wall_query) {
            force += self.geometry_force(agent, segment.shortest_point(agent.pos), profile);
        }

        // Semi-implicit Euler: the new velocity moves the agent.
        let velocity = agent.velocity + force * (delta_t / profile.mass);
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
        check_no_overlap(agent, agents, neighborhood, self.cutoff_radius())?;
        check_boundary_clearance(agent, geometry)
    }

    fn has_profile(&self, id: ParametersId) -> bool {
        self.profiles.contains(id)
    }

    fn clone_model(&self) -> Box<dyn OperationalModel> {
        Box::new(self.clone())
    }
}

/// Single-use builder for [`GcfmModel`].
///
/// Model-level constants have literature defaults; override via the setters.
/// Profiles are validated as they are added.
#[derive(Debug)]
pub struct GcfmModelBuilder {
    model: GcfmModel,
}

impl Default for GcfmModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GcfmModelBuilder {
    pub fn new() -> Self {
        Self {
            model: GcfmModel {
                strength_neighbor_repulsion: 0.3,
                strength_geometry_repulsion: 0.2,
                max_neighbor_interaction_distance: 2.0,
                max_geometry_interaction_distance: 2.0,
                max_neighbor_interpolation_distance: 0.1,
                max_geometry_interpolation_distance: 0.1,
                max_neighbor_repulsion_force: 9.0,
                max_geometry_repulsion_force: 9.0,
                profiles: ProfileTable::new(),
            },
        }
    }

    pub fn strength_neighbor_repulsion(mut self, value: f64) -> Self {
        self.model.strength_neighbor_repulsion = value;
        self
    }

    pub fn strength_geometry_repulsion(mut self, value: f64) -> Self {
        self.model.strength_geometry_repulsion = value;
        self
    }

    pub fn max_neighbor_interaction_distance(mut self, value: f64) -> Self {
        self.model.max_neighbor_interaction_distance = value;
        self
    }

    pub fn max_geometry_interaction_distance(mut self, value: f64) -> Self {
        self.model.max_geometry_interaction_distance = value;
        self
    }

    pub fn max_neighbor_interpolation_distance(mut self, value: f64) -> Self {
        self.model.max_neighbor_interpolation_distance = value;
        self
    }

    pub fn max_geometry_interpolation_distance(mut self, value: f64) -> Self {
        self.model.max_geometry_interpolation_distance = value;
        self
    }

    pub fn max_neighbor_repulsion_force(mut self, value: f64) -> Self {
        self.model.max_neighbor_repulsion_force = value;
        self
    }

    pub fn max_geometry_repulsion_force(mut self, value: f64) -> Self {
        self.model.max_geometry_repulsion_force = value;
        self
    }

    /// Register a parameter profile, validating its ranges.
    pub fn add_parameter_profile(&mut self, profile: GcfmProfile) -> ModelResult<ParametersId> {
        validate_range("mass", profile.mass, 1.0, 100.0)?;
        validate_range("tau", profile.tau, 0.1, 10.0)?;
        validate_range("v0", profile.v0, 0.0, 10.0)?;
        Ok(self.model.profiles.push(profile))
    }

    pub fn build(self) -> GcfmModel {
        self.model
    }
}
