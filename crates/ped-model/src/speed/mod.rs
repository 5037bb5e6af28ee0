//! Collision-free speed model family.
//!
//! All four variants share the same movement law (see [`ops`]): the walking
//! direction is the normalized sum of the goal direction and exponential
//! repulsions, and the speed is throttled by the free space ahead in that
//! direction.  Agents never overlap because the speed drops to zero before
//! contact.  The variants differ only in where their repulsion constants
//! live:
//!
//! | Variant                                 | Parameter placement            |
//! |-----------------------------------------|--------------------------------|
//! | [`CollisionFreeSpeedModel`]             | all constants on the model     |
//! | [`CollisionFreeSpeedModelIndividual`]   | neighbor constants per profile |
//! | [`CollisionFreeSpeedModelV2`]           | all constants per profile      |
//! | [`CollisionFreeSpeedModelV3`]           | as V2, walls also throttle     |

mod individual;
mod ops;
mod plain;
mod v2;
mod v3;

pub use individual::{
    CollisionFreeSpeedModelIndividual, CollisionFreeSpeedModelIndividualBuilder,
    IndividualSpeedProfile,
};
pub use plain::{CollisionFreeSpeedModel, CollisionFreeSpeedModelBuilder, SpeedProfile};
pub use v2::{CollisionFreeSpeedModelV2, CollisionFreeSpeedModelV2Builder, SpeedProfileV2};
pub use v3::{CollisionFreeSpeedModelV3, CollisionFreeSpeedModelV3Builder};
