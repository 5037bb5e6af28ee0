//! Per-iteration observation hooks.
//!
//! The simulation core produces no output of its own; trajectory writers,
//! statistics collectors and live visualisations all attach through this
//! trait.  Hooks default to no-ops so observers implement only what they
//! need.

use ped_agent::AgentStore;

/// Callbacks invoked around every iteration of [`Simulation::run`].
///
/// [`Simulation::run`]: crate::Simulation::run
pub trait SimObserver {
    /// Called before the iteration's updates are computed.
    fn on_iteration_start(&mut self, _iteration: u64) {}

    /// Called after all updates have been applied and the clock advanced.
    fn on_iteration_end(&mut self, _iteration: u64, _agents: &AgentStore) {}
}

/// Observer that does nothing; for callers that only want the end state.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
