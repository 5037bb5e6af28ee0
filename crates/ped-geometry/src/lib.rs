//! `ped-geometry` — walkable-area description for the `rust_ped` crowd
//! simulation framework.
//!
//! Two independent spatial structures live here:
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`collision`] | `CollisionGeometry` — R-tree over wall segments           |
//! | [`area`]      | `Areas` — labelled convex polygons for zone queries       |
//! | [`error`]     | `GeometryError` and the crate `Result` alias              |
//!
//! The collision geometry answers proximity and line-of-sight queries for the
//! operational models; areas are purely informational regions (waiting zones,
//! exits) that the embedding application interprets.

pub mod area;
pub mod collision;
pub mod error;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use area::{Area, Areas, AreasBuilder};
pub use collision::{CollisionGeometry, CollisionGeometryBuilder};
pub use error::{GeometryError, GeometryResult};
