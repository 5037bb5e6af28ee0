//! Unit tests for the neighborhood grid.

#[cfg(test)]
mod grid {
    use ped_core::{AgentId, Point, SimRng};

    use crate::NeighborhoodSearch;

    #[test]
    fn query_is_exact_distance_filtered() {
        let mut search = NeighborhoodSearch::new(2.0);
        search.update([
            (AgentId(0), Point::new(0.0, 0.0)),
            (AgentId(1), Point::new(1.0, 0.0)),
            (AgentId(2), Point::new(1.9, 0.0)),
            (AgentId(3), Point::new(2.1, 0.0)),
            (AgentId(4), Point::new(1.5, 1.5)), // dist ≈ 2.12
        ]);

        let mut hits = search.query(Point::ZERO, 2.0);
        hits.sort();
        assert_eq!(hits, vec![AgentId(0), AgentId(1), AgentId(2)]);
    }

    #[test]
    fn query_spans_cell_boundaries() {
        // Neighbors on the far side of a cell border must still be found.
        let mut search = NeighborhoodSearch::new(1.0);
        search.update([
            (AgentId(0), Point::new(0.95, 0.5)),
            (AgentId(1), Point::new(1.05, 0.5)),
        ]);
        let hits = search.query(Point::new(0.95, 0.5), 0.5);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn update_replaces_snapshot() {
        let mut search = NeighborhoodSearch::new(1.0);
        search.update([(AgentId(0), Point::ZERO)]);
        assert_eq!(search.query(Point::ZERO, 0.5).len(), 1);

        search.update([(AgentId(0), Point::new(10.0, 10.0))]);
        assert!(search.query(Point::ZERO, 0.5).is_empty());
        assert_eq!(search.query(Point::new(10.0, 10.0), 0.5).len(), 1);
    }

    #[test]
    fn negative_coordinates() {
        let mut search = NeighborhoodSearch::new(2.0);
        search.update([
            (AgentId(0), Point::new(-0.5, -0.5)),
            (AgentId(1), Point::new(-3.0, -3.0)),
        ]);
        let hits = search.query(Point::new(-1.0, -1.0), 1.0);
        assert_eq!(hits, vec![AgentId(0)]);
    }

    #[test]
    fn matches_brute_force() {
        let mut rng = SimRng::new(7);
        let agents: Vec<(AgentId, Point)> = (0..200)
            .map(|i| {
                let p = Point::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0));
                (AgentId(i), p)
            })
            .collect();

        let mut search = NeighborhoodSearch::new(2.5);
        search.update(agents.iter().copied());

        for _ in 0..50 {
            let q = Point::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0));
            let radius = rng.gen_range(0.5..4.0);

            let mut expected: Vec<AgentId> = agents
                .iter()
                .filter(|(_, p)| (*p - q).norm_square() <= radius * radius)
                .map(|(id, _)| *id)
                .collect();
            expected.sort();

            let mut actual = search.query(q, radius);
            actual.sort();
            assert_eq!(actual, expected);
        }
    }
}
