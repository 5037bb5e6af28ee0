//! `ped-model` — operational movement models for the `rust_ped` crowd
//! simulation framework.
//!
//! An operational model decides, once per iteration and per agent, where that
//! agent moves during the next `delta_t` seconds.  All models implement the
//! [`OperationalModel`] trait and are evaluated in two phases: every update is
//! computed against the same read-only snapshot, then all updates are applied.
//! Results are therefore independent of agent evaluation order.
//!
//! | Module         | Contents                                               |
//! |----------------|--------------------------------------------------------|
//! | [`model`]      | `OperationalModel` trait, `AgentUpdate`, `ModelKind`   |
//! | [`profile`]    | `ProfileTable` — parameter profile arena               |
//! | [`gcfm`]       | Generalized centrifugal force model                    |
//! | [`social_force`] | Social force model (Helbing–Molnár)                  |
//! | [`speed`]      | Collision-free speed model family (4 variants)         |
//! | [`error`]      | `ModelError` and the crate `Result` alias              |

pub mod error;
pub mod gcfm;
pub mod model;
pub mod profile;
pub mod social_force;
pub mod speed;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{ModelError, ModelResult};
pub use gcfm::{GcfmModel, GcfmModelBuilder, GcfmProfile};
pub use model::{AgentUpdate, ModelKind, OperationalModel};
pub use profile::ProfileTable;
pub use social_force::{SocialForceModel, SocialForceModelBuilder, SocialForceProfile};
pub use speed::{
    CollisionFreeSpeedModel, CollisionFreeSpeedModelBuilder, CollisionFreeSpeedModelIndividual,
    CollisionFreeSpeedModelIndividualBuilder, CollisionFreeSpeedModelV2,
    CollisionFreeSpeedModelV2Builder, CollisionFreeSpeedModelV3, CollisionFreeSpeedModelV3Builder,
    IndividualSpeedProfile, SpeedProfile, SpeedProfileV2,
};
