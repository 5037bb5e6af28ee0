//! `ped-agent` — agent state and storage for the `rust_ped` crowd simulation
//! framework.
//!
//! | Module    | Contents                                            |
//! |-----------|-----------------------------------------------------|
//! | [`agent`] | `Agent` — kinematic state plus model parameters id  |
//! | [`store`] | `AgentStore` — dense, id-indexed agent storage      |

pub mod agent;
pub mod store;

#[cfg(test)]
mod tests;

pub use agent::Agent;
pub use store::AgentStore;
