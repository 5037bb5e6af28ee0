//! Validated simulation construction.

use ped_agent::AgentStore;
use ped_core::SimClock;
use ped_geometry::{Areas, CollisionGeometry};
use ped_model::OperationalModel;
use ped_spatial::NeighborhoodSearch;

use crate::error::{SimError, SimResult};
use crate::sim::Simulation;

/// Assembles a [`Simulation`] from a model, geometry and step size.
///
/// Areas are optional; everything else is mandatory and validated in
/// [`build`](SimulationBuilder::build).
pub struct SimulationBuilder {
    model: Box<dyn OperationalModel>,
    geometry: CollisionGeometry,
    delta_t: f64,
    areas: Areas,
}

impl SimulationBuilder {
    pub fn new(
        model: impl OperationalModel + 'static,
        geometry: CollisionGeometry,
        delta_t: f64,
    ) -> Self {
        Self {
            model: Box::new(model),
            geometry,
            delta_t,
            areas: Areas::empty(),
        }
    }

    pub fn areas(mut self, areas: Areas) -> Self {
        self.areas = areas;
        self
    }

    /// Build the simulation, sizing the neighborhood grid from the model's
    /// cutoff radius.
    pub fn build(self) -> SimResult<Simulation> {
        if !self.delta_t.is_finite() || self.delta_t <= 0.0 {
            return Err(SimError::Config(format!(
                "delta_t must be finite and positive, got {}",
                self.delta_t
            )));
        }
        let cutoff = self.model.cutoff_radius();
        if !cutoff.is_finite() || cutoff <= 0.0 {
            return Err(SimError::Config(format!(
                "model cutoff radius must be finite and positive, got {cutoff}"
            )));
        }
        Ok(Simulation {
            clock: SimClock::new(self.delta_t),
            model: self.model,
            geometry: self.geometry,
            areas: self.areas,
            agents: AgentStore::new(),
            neighborhood: NeighborhoodSearch::new(cutoff),
        })
    }
}
