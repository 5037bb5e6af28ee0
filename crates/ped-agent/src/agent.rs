//! Per-agent simulation state.

use ped_core::{AgentId, ParametersId, Point};

/// One simulated pedestrian.
///
/// Kinematic state (`pos`, `velocity`, `orientation`) is written only during
/// the apply phase of the simulation loop; everything else changes only
/// through explicit API calls between iterations.
///
/// Behavioral constants live in the model's parameter profile, referenced by
/// `profile`; `radius` stays on the agent because every model interprets it
/// identically (projected body size) and collision checks need it without a
/// profile lookup.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    /// Assigned by [`AgentStore::add`](crate::AgentStore::add); `INVALID`
    /// until then.
    pub id: AgentId,
    pub pos: Point,
    pub velocity: Point,
    /// Unit facing direction.  Kept when the agent stops, so it never
    /// degenerates to the null vector.
    pub orientation: Point,
    /// Projected body radius in metres.
    pub radius: f64,
    /// Handle into the operational model's parameter profile table.
    pub profile: ParametersId,
    /// Current movement target.
    pub destination: Point,
}

impl Agent {
    /// A new agent at rest.  The id is assigned when the agent is added to a
    /// store.
    pub fn new(
        pos: Point,
        orientation: Point,
        radius: f64,
        profile: ParametersId,
        destination: Point,
    ) -> Self {
        Self {
            id: AgentId::INVALID,
            pos,
            velocity: Point::ZERO,
            orientation,
            radius,
            profile,
            destination,
        }
    }

    /// Current speed in m/s.
    #[inline]
    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }
}
