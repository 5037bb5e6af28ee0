//! `ped-sim` — the simulation loop of the `rust_ped` crowd simulation
//! framework.
//!
//! Ties the other crates together: agents ([`ped_agent`]), walkable space
//! ([`ped_geometry`]), proximity queries ([`ped_spatial`]) and operational
//! models ([`ped_model`]) advance in lock-step through [`Simulation::iterate`].
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`sim`]      | `Simulation`, `AgentRequest` — the iteration loop     |
//! | [`builder`]  | `SimulationBuilder` — validated construction          |
//! | [`observer`] | `SimObserver` — per-iteration hooks                   |
//! | [`error`]    | `SimError` and the crate `Result` alias               |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | Computes per-agent updates on a rayon worker pool.      |

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use builder::SimulationBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{AgentRequest, Simulation};
