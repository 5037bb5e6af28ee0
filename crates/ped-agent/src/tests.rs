//! Unit tests for agent state and storage.

#[cfg(test)]
mod store {
    use ped_core::{AgentId, ParametersId, Point};

    use crate::{Agent, AgentStore};

    fn agent_at(x: f64, y: f64) -> Agent {
        Agent::new(
            Point::new(x, y),
            Point::new(1.0, 0.0),
            0.3,
            ParametersId(0),
            Point::new(10.0, 0.0),
        )
    }

    #[test]
    fn add_assigns_sequential_ids() {
        let mut store = AgentStore::new();
        let a = store.add(agent_at(0.0, 0.0));
        let b = store.add(agent_at(1.0, 0.0));
        assert_eq!(a, AgentId(0));
        assert_eq!(b, AgentId(1));
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(a).unwrap().id, a);
        assert_eq!(store.get(b).unwrap().pos, Point::new(1.0, 0.0));
    }

    #[test]
    fn new_agent_starts_at_rest_with_invalid_id() {
        let agent = agent_at(2.0, 3.0);
        assert_eq!(agent.id, AgentId::INVALID);
        assert_eq!(agent.velocity, Point::ZERO);
        assert_eq!(agent.speed(), 0.0);
    }

    #[test]
    fn get_unknown_id_is_none() {
        let store = AgentStore::new();
        assert!(store.get(AgentId(0)).is_none());
        assert!(store.get(AgentId::INVALID).is_none());
    }

    #[test]
    fn get_mut_allows_retargeting() {
        let mut store = AgentStore::new();
        let id = store.add(agent_at(0.0, 0.0));
        store.get_mut(id).unwrap().destination = Point::new(-5.0, 0.0);
        assert_eq!(store.get(id).unwrap().destination, Point::new(-5.0, 0.0));
    }

    #[test]
    fn positions_snapshot() {
        let mut store = AgentStore::new();
        store.add(agent_at(0.0, 0.0));
        store.add(agent_at(1.0, 2.0));
        let positions: Vec<_> = store.positions().collect();
        assert_eq!(
            positions,
            vec![
                (AgentId(0), Point::new(0.0, 0.0)),
                (AgentId(1), Point::new(1.0, 2.0)),
            ]
        );
    }
}
