//! Shared kernels of the collision-free speed family.
//!
//! Each variant calls [`compute_update`] with its own way of resolving the
//! repulsion constants; the movement law itself is identical:
//!
//! 1. direction = normalize(e0 + Σ neighbor repulsion + Σ wall repulsion),
//!    falling back to the current orientation when the sum vanishes,
//! 2. spacing = free distance ahead in a body-width corridor along that
//!    direction,
//! 3. speed = clamp(spacing / time_gap, 0, v0).

use ped_agent::{Agent, AgentStore};
use ped_core::{LineSegment, Point};
use ped_geometry::CollisionGeometry;
use ped_spatial::NeighborhoodSearch;

use crate::model::{AgentUpdate, desired_direction, visible_neighbors};

/// Interaction range shared by the whole family.
pub(crate) const CUTOFF_RADIUS: f64 = 3.0;

/// Repulsion constants, resolved per variant (model-level or per-profile).
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct RepulsionParams {
    pub strength_neighbor: f64,
    pub range_neighbor: f64,
    pub strength_geometry: f64,
    pub range_geometry: f64,
}

/// Exponential repulsion exerted by a neighbor, pointing away from it.
fn neighbor_repulsion(agent: &Agent, other: &Agent, strength: f64, range: f64) -> Point {
    let (dist, direction) = (other.pos - agent.pos).norm_and_normalized();
    let contact = agent.radius + other.radius;
    -direction * (strength * ((contact - dist) / range).exp())
}

/// Exponential repulsion exerted by a wall segment, pointing away from it.
fn boundary_repulsion(agent: &Agent, segment: LineSegment, strength: f64, range: f64) -> Point {
    let (dist, direction) = (segment.shortest_point(agent.pos) - agent.pos).norm_and_normalized();
    -direction * (strength * ((agent.radius - dist) / range).exp())
}

/// Free distance to `other` inside the forward corridor, or `+∞` when the
/// neighbor is behind the agent or laterally clear of its body width.
fn neighbor_spacing(agent: &Agent, direction: Point, other: &Agent) -> f64 {
    let to_other = other.pos - agent.pos;
    let contact = agent.radius + other.radius;
    if direction.dot(to_other) <= 0.0 {
        return f64::INFINITY;
    }
    let left = direction.rotate90_deg();
    if left.dot(to_other).abs() > contact {
        return f64::INFINITY;
    }
    to_other.norm() - contact
}

/// Free distance to a wall inside the forward corridor, or `+∞`.
fn boundary_spacing(agent: &Agent, direction: Point, segment: LineSegment) -> f64 {
    let to_wall = segment.shortest_point(agent.pos) - agent.pos;
    if direction.dot(to_wall) <= 0.0 {
        return f64::INFINITY;
    }
    let left = direction.rotate90_deg();
    if left.dot(to_wall).abs() > agent.radius {
        return f64::INFINITY;
    }
    to_wall.norm() - agent.radius
}

/// Linear speed ramp: full stop at zero spacing, desired speed once the gap
/// covers `time_gap` seconds of travel.
#[inline]
fn optimal_speed(spacing: f64, time_gap: f64, v0: f64) -> f64 {
    (spacing / time_gap).clamp(0.0, v0)
}

/// One model evaluation, shared by all variants.
#[allow(clippy::too_many_arguments)]
pub(crate) fn compute_update(
    delta_t: f64,
    agent: &Agent,
    agents: &AgentStore,
    geometry: &CollisionGeometry,
    neighborhood: &NeighborhoodSearch,
    params: RepulsionParams,
    time_gap: f64,
    v0: f64,
    walls_throttle: bool,
) -> AgentUpdate {
    let neighbors: Vec<&Agent> =
        visible_neighbors(agent, agents, geometry, neighborhood, CUTOFF_RADIUS)
            .into_iter()
            .filter_map(|id| agents.get(id))
            .collect();
    let walls = geometry.segments_near(agent.pos);

    let mut influence = desired_direction(agent.pos, agent.destination);
    for other in &neighbors {
        influence += neighbor_repulsion(agent, other, params.strength_neighbor, params.range_neighbor);
    }
    for &segment in &walls {
        influence +=
            boundary_repulsion(agent, segment, params.strength_geometry, params.range_geometry);
    }
    let (magnitude, direction) = influence.norm_and_normalized();
    let direction = if magnitude > 0.0 { direction } else { agent.orientation };

    let mut spacing = f64::INFINITY;
    for other in &neighbors {
        spacing = spacing.min(neighbor_spacing(agent, direction, other));
    }
    if walls_throttle {
        for &segment in &walls {
            spacing = spacing.min(boundary_spacing(agent, direction, segment));
        }
    }

    let speed = optimal_speed(spacing, time_gap, v0);
    let velocity = direction * speed;
    AgentUpdate {
        position: agent.pos + velocity * delta_t,
        velocity,
        orientation: direction,
    }
}
