//! Parameter profile arena.
//!
//! Behavioral constants are not stored per agent.  Each model owns a
//! `ProfileTable` of parameter sets; agents carry a `ParametersId` handle
//! into it.  Thousands of agents typically share a handful of profiles, so
//! the hot loop reads one small, cache-resident table instead of fat agent
//! records.

use ped_core::ParametersId;

/// Append-only arena of parameter profiles, indexed by [`ParametersId`].
#[derive(Clone, Debug, Default)]
pub struct ProfileTable<P> {
    profiles: Vec<P>,
}

impl<P> ProfileTable<P> {
    pub fn new() -> Self {
        Self { profiles: Vec::new() }
    }

    /// Add a profile, returning its handle.
    pub fn push(&mut self, profile: P) -> ParametersId {
        let id = ParametersId(self.profiles.len() as u32);
        self.profiles.push(profile);
        id
    }

    #[inline]
    pub fn get(&self, id: ParametersId) -> Option<&P> {
        self.profiles.get(id.index())
    }

    /// Direct lookup for the hot loop.
    ///
    /// Panics on an unknown id; the simulation rejects agents with unknown
    /// profiles at admission, so ids reaching this point are always valid.
    #[inline]
    pub(crate) fn resolve(&self, id: ParametersId) -> &P {
        &self.profiles[id.index()]
    }

    #[inline]
    pub fn contains(&self, id: ParametersId) -> bool {
        id.index() < self.profiles.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
