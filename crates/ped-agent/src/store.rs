//! Dense agent storage.
//!
//! Agents live in a `Vec` indexed directly by `AgentId`, so id lookup is a
//! bounds-checked array access.  Agents are never removed mid-run (arrived
//! agents are the embedding application's concern), which keeps ids stable
//! and the two-phase update loop a straight zip over indices.

use ped_core::{AgentId, Point};

use crate::Agent;

/// All agents of one simulation, in insertion order.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentStore {
    agents: Vec<Agent>,
}

impl AgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an agent, assigning the next id.
    pub fn add(&mut self, mut agent: Agent) -> AgentId {
        let id = AgentId(self.agents.len() as u32);
        agent.id = id;
        self.agents.push(agent);
        id
    }

    #[inline]
    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Agent> {
        self.agents.iter_mut()
    }

    /// `(id, position)` pairs for rebuilding the neighborhood grid.
    pub fn positions(&self) -> impl Iterator<Item = (AgentId, Point)> + '_ {
        self.agents.iter().map(|a| (a.id, a.pos))
    }

    #[inline]
    pub fn as_slice(&self) -> &[Agent] {
        &self.agents
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
