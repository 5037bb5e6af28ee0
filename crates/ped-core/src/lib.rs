//! `ped-core` — foundational types for the `rust_ped` crowd simulation
//! framework.
//!
//! This crate is a dependency of every other `ped-*` crate.  It intentionally
//! has no `ped-*` dependencies and minimal external ones (only `rand`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                |
//! |-------------|---------------------------------------------------------|
//! | [`ids`]     | `AgentId`, `AreaId`, `ParametersId`                     |
//! | [`point`]   | `Point` — 2-D vector arithmetic                         |
//! | [`segment`] | `LineSegment` — walls, distance and intersection tests  |
//! | [`polygon`] | `ConvexPolygon` — O(log n) containment                  |
//! | [`clock`]   | `SimClock` — iteration counter × fixed step size        |
//! | [`rng`]     | `SimRng` — explicitly seeded, deterministic RNG         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                    |
//! |---------|-----------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types. |

pub mod clock;
pub mod ids;
pub mod point;
pub mod polygon;
pub mod rng;
pub mod segment;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use clock::SimClock;
pub use ids::{AgentId, AreaId, ParametersId};
pub use point::Point;
pub use polygon::ConvexPolygon;
pub use rng::SimRng;
pub use segment::LineSegment;
