//! The simulation loop.
//!
//! # Iteration structure
//!
//! Each call to [`Simulation::iterate`] runs four steps:
//!
//! 1. rebuild the neighborhood grid from current positions,
//! 2. compute an update for every agent against that frozen snapshot,
//! 3. apply all updates,
//! 4. advance the clock.
//!
//! Step 2 never observes step 3's writes, so results are independent of
//! agent order; with the `parallel` feature the updates of step 2 are
//! computed on a rayon worker pool.  An iteration is infallible: it runs to
//! completion or is never started.

use ped_agent::{Agent, AgentStore};
use ped_core::{AgentId, ParametersId, Point, SimClock};
use ped_geometry::{Areas, CollisionGeometry};
use ped_model::{AgentUpdate, ModelError, OperationalModel};
use ped_spatial::NeighborhoodSearch;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{SimError, SimResult};
use crate::observer::SimObserver;

/// Everything needed to admit one agent.
#[derive(Clone, Debug)]
pub struct AgentRequest {
    pub pos: Point,
    /// Facing direction; normalized on admission.  A null vector falls back
    /// to facing along +x.
    pub orientation: Point,
    /// Projected body radius in metres.
    pub radius: f64,
    /// Profile handle issued by the model's builder.
    pub profile: ParametersId,
    pub destination: Point,
}

/// A running crowd simulation.
///
/// Construct via [`SimulationBuilder`](crate::SimulationBuilder).
pub struct Simulation {
    pub(crate) clock: SimClock,
    pub(crate) model: Box<dyn OperationalModel>,
    pub(crate) geometry: CollisionGeometry,
    pub(crate) areas: Areas,
    pub(crate) agents: AgentStore,
    pub(crate) neighborhood: NeighborhoodSearch,
}

impl Simulation {
    /// Admit an agent before or between iterations.
    ///
    /// The profile handle must come from the model this simulation was built
    /// with, and the agent must satisfy the model's admission constraints
    /// (no overlap, clear of walls, parameters in range).
    pub fn add_agent(&mut self, request: AgentRequest) -> SimResult<AgentId> {
        if !self.model.has_profile(request.profile) {
            return Err(SimError::UnknownProfile(request.profile));
        }
        let (norm, orientation) = request.orientation.norm_and_normalized();
        let orientation = if norm > 0.0 { orientation } else { Point::new(1.0, 0.0) };

        let agent = Agent::new(
            request.pos,
            orientation,
            request.radius,
            request.profile,
            request.destination,
        );
        self.neighborhood.update(self.agents.positions());
        self.model
            .check_model_constraint(&agent, &self.agents, &self.geometry, &self.neighborhood)?;
        Ok(self.agents.add(agent))
    }

    /// Advance the simulation by one step of `delta_t` seconds.
    pub fn iterate(&mut self) {
        self.neighborhood.update(self.agents.positions());

        let delta_t = self.clock.delta_t();
        let model = &self.model;
        let agents = &self.agents;
        let geometry = &self.geometry;
        let neighborhood = &self.neighborhood;

        #[cfg(feature = "parallel")]
        let updates: Vec<AgentUpdate> = agents
            .as_slice()
            .par_iter()
            .map(|agent| model.compute_new_position(delta_t, agent, agents, geometry, neighborhood))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let updates: Vec<AgentUpdate> = agents
            .iter()
            .map(|agent| model.compute_new_position(delta_t, agent, agents, geometry, neighborhood))
            .collect();

        let model = &self.model;
        for (agent, update) in self.agents.iter_mut().zip(&updates) {
            model.apply_update(agent, update);
        }
        self.clock.advance();
    }

    /// Run `iterations` steps, invoking the observer around each.
    pub fn run(&mut self, iterations: u64, observer: &mut impl SimObserver) {
        for _ in 0..iterations {
            observer.on_iteration_start(self.clock.iteration());
            self.iterate();
            observer.on_iteration_end(self.clock.iteration(), &self.agents);
        }
    }

    /// Re-validate every agent against the model's constraints.
    ///
    /// Useful after bulk admission or external destination changes; returns
    /// all violations rather than stopping at the first.
    pub fn check_model_constraints(&mut self) -> Vec<(AgentId, ModelError)> {
        self.neighborhood.update(self.agents.positions());
        self.agents
            .iter()
            .filter_map(|agent| {
                self.model
                    .check_model_constraint(agent, &self.agents, &self.geometry, &self.neighborhood)
                    .err()
                    .map(|e| (agent.id, e))
            })
            .collect()
    }

    /// Redirect an agent to a new destination.
    pub fn set_destination(&mut self, id: AgentId, destination: Point) -> SimResult<()> {
        let agent = self.agents.get_mut(id).ok_or(SimError::AgentNotFound(id))?;
        agent.destination = destination;
        Ok(())
    }

    pub fn agent(&self, id: AgentId) -> SimResult<&Agent> {
        self.agents.get(id).ok_or(SimError::AgentNotFound(id))
    }

    #[inline]
    pub fn agents(&self) -> &AgentStore {
        &self.agents
    }

    #[inline]
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn iteration(&self) -> u64 {
        self.clock.iteration()
    }

    #[inline]
    pub fn elapsed_time(&self) -> f64 {
        self.clock.elapsed_time()
    }

    #[inline]
    pub fn delta_t(&self) -> f64 {
        self.clock.delta_t()
    }

    #[inline]
    pub fn areas(&self) -> &Areas {
        &self.areas
    }

    #[inline]
    pub fn model(&self) -> &dyn OperationalModel {
        self.model.as_ref()
    }
}
