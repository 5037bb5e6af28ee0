//! Simulation time model.
//!
//! Time is a monotonically increasing iteration counter times a fixed step
//! size:
//!
//!   elapsed_time = delta_t × iteration
//!
//! Using the integer iteration count as the canonical unit keeps time
//! comparisons exact; the floating-point elapsed time is derived on demand.
//! The clock advances by exactly one call per iteration and is never
//! decremented — resetting means recreating the simulation.

use std::fmt;

/// Process-wide iteration counter and fixed step size.
///
/// `SimClock` is cheap to copy and intentionally holds no heap data.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    delta_t: f64,
    iteration: u64,
}

impl SimClock {
    /// Create a clock at iteration 0 with the given step size in seconds.
    ///
    /// `delta_t` is assumed positive; the simulation builder validates it.
    pub fn new(delta_t: f64) -> Self {
        Self { delta_t, iteration: 0 }
    }

    /// Advance the clock by one iteration.
    #[inline]
    pub fn advance(&mut self) {
        self.iteration += 1;
    }

    /// Seconds per iteration.
    #[inline]
    pub fn delta_t(&self) -> f64 {
        self.delta_t
    }

    /// Completed iterations since the clock was created.
    #[inline]
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Elapsed simulated seconds: `delta_t × iteration`.
    #[inline]
    pub fn elapsed_time(&self) -> f64 {
        self.delta_t * self.iteration as f64
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "iteration {} (t = {:.3} s)", self.iteration, self.elapsed_time())
    }
}
