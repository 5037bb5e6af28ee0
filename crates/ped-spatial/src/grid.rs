//! Uniform hash grid over agent positions.
//!
//! Space is partitioned into square cells of `cell_size` metres.  A radius
//! query scans the cell range covering the query circle and filters by exact
//! distance, so results are never approximate.  With `cell_size` equal to the
//! model's cutoff radius the scan touches at most 9 cells.
//!
//! The grid holds a snapshot of positions from the moment [`update`] was
//! called; it does not observe later agent movement.  The simulation loop
//! rebuilds it once per iteration, before any model evaluation.
//!
//! [`update`]: NeighborhoodSearch::update

use ped_core::{AgentId, Point};
use rustc_hash::FxHashMap;

/// Cell coordinates of `p` in a grid of `cell_size` squares.
#[inline]
fn cell_index(cell_size: f64, p: Point) -> (i32, i32) {
    ((p.x / cell_size).floor() as i32, (p.y / cell_size).floor() as i32)
}

/// Rebuild-per-iteration spatial index over agent positions.
pub struct NeighborhoodSearch {
    cell_size: f64,
    grid: FxHashMap<(i32, i32), Vec<(AgentId, Point)>>,
}

impl NeighborhoodSearch {
    /// Create an empty grid.  `cell_size` must be positive; it is normally
    /// the operational model's cutoff radius.
    pub fn new(cell_size: f64) -> Self {
        assert!(cell_size > 0.0, "cell_size must be positive");
        Self { cell_size, grid: FxHashMap::default() }
    }

    /// Replace the snapshot with the given positions.
    ///
    /// Buckets are cleared but their allocations are kept, so steady-state
    /// rebuilds allocate nothing.
    pub fn update(&mut self, positions: impl IntoIterator<Item = (AgentId, Point)>) {
        for bucket in self.grid.values_mut() {
            bucket.clear();
        }
        for (id, pos) in positions {
            self.grid
                .entry(cell_index(self.cell_size, pos))
                .or_default()
                .push((id, pos));
        }
    }

    /// All agents within `radius` of `pos` in the current snapshot.
    ///
    /// The result may include the asking agent itself; callers filter by id.
    pub fn query(&self, pos: Point, radius: f64) -> Vec<AgentId> {
        let (min_x, min_y) = cell_index(self.cell_size, pos - Point::new(radius, radius));
        let (max_x, max_y) = cell_index(self.cell_size, pos + Point::new(radius, radius));
        let radius_square = radius * radius;

        let mut result = Vec::new();
        for cx in min_x..=max_x {
            for cy in min_y..=max_y {
                let Some(bucket) = self.grid.get(&(cx, cy)) else {
                    continue;
                };
                for &(id, p) in bucket {
                    if (p - pos).norm_square() <= radius_square {
                        result.push(id);
                    }
                }
            }
        }
        result
    }

    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }
}
