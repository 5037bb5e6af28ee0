//! `ped-spatial` — agent proximity queries for the `rust_ped` crowd
//! simulation framework.
//!
//! A single structure lives here: [`NeighborhoodSearch`], a uniform hash grid
//! over agent positions.  It is rebuilt wholesale at the start of every
//! iteration and then queried read-only by all per-agent model evaluations,
//! which is what makes the two-phase update loop safe to parallelise.

pub mod grid;

#[cfg(test)]
mod tests;

pub use grid::NeighborhoodSearch;
