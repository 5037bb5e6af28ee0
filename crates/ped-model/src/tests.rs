//! Unit tests for the operational models.

#![allow(clippy::type_complexity)]

use ped_agent::{Agent, AgentStore};
use ped_core::{AgentId, ParametersId, Point};
use ped_geometry::{CollisionGeometry, CollisionGeometryBuilder};
use ped_spatial::NeighborhoodSearch;

use crate::OperationalModel;

fn agent(x: f64, y: f64, profile: ParametersId, destination: Point) -> Agent {
    Agent::new(Point::new(x, y), Point::new(1.0, 0.0), 0.3, profile, destination)
}

fn environment(
    agents: Vec<Agent>,
    geometry: CollisionGeometry,
    cell_size: f64,
) -> (AgentStore, CollisionGeometry, NeighborhoodSearch) {
    let mut store = AgentStore::new();
    for a in agents {
        store.add(a);
    }
    let mut search = NeighborhoodSearch::new(cell_size);
    search.update(store.positions());
    (store, geometry, search)
}

fn empty_geometry() -> CollisionGeometry {
    CollisionGeometryBuilder::new().build().unwrap()
}

#[cfg(test)]
mod gcfm {
    use super::*;
    use crate::error::ModelError;
    use crate::gcfm::{GcfmModelBuilder, GcfmProfile};

    #[test]
    fn lone_agent_accelerates_towards_destination() {
        let mut builder = GcfmModelBuilder::new();
        let profile = builder.add_parameter_profile(GcfmProfile::default()).unwrap();
        let model = builder.build();

        let target = Point::new(10.0, 0.0);
        let (store, geometry, search) =
            environment(vec![agent(0.0, 0.0, profile, target)], empty_geometry(), model.cutoff_radius());

        // Driving force only: a = (e0·v0 − v)/τ = 1.2 / 0.5 = 2.4 m/s².
        let update = model.compute_new_position(0.01, store.get(AgentId(0)).unwrap(), &store, &geometry, &search);
        assert!((update.velocity.x - 0.024).abs() < 1e-12);
        assert_eq!(update.velocity.y, 0.0);
        assert!((update.position.x - 0.00024).abs() < 1e-12);
        assert_eq!(update.orientation, Point::new(1.0, 0.0));
    }

    #[test]
    fn coincident_agents_yield_finite_update() {
        let mut builder = GcfmModelBuilder::new();
        let profile = builder.add_parameter_profile(GcfmProfile::default()).unwrap();
        let model = builder.build();

        let target = Point::new(10.0, 0.0);
        let (store, geometry, search) = environment(
            vec![agent(0.0, 0.0, profile, target), agent(0.0, 0.0, profile, target)],
            empty_geometry(),
            model.cutoff_radius(),
        );

        let update = model.compute_new_position(0.01, store.get(AgentId(0)).unwrap(), &store, &geometry, &search);
        assert!(update.position.x.is_finite() && update.position.y.is_finite());
        assert!(update.velocity.x.is_finite() && update.velocity.y.is_finite());
    }

    #[test]
    fn neighbor_behind_wall_exerts_no_force() {
        let mut builder = GcfmModelBuilder::new();
        let profile = builder.add_parameter_profile(GcfmProfile::default()).unwrap();
        let model = builder.build();

        // Wall between the two agents.  The wall itself repels the asking
        // agent, but that contribution is identical in both computations
        // below; only the occluded neighbor differs.
        let mut geometry = CollisionGeometryBuilder::new();
        geometry.add_line_segment(1.0, -10.0, 1.0, 10.0);
        let geometry = geometry.build().unwrap();

        let target = Point::new(-10.0, 0.0);
        let mut blocked = agent(0.0, 0.0, profile, target);
        blocked.velocity = Point::new(1.0, 0.0); // forward cone towards the other
        let other = agent(1.8, 0.0, profile, target);

        let mut store = AgentStore::new();
        let id = store.add(blocked);
        store.add(other);
        let mut search = NeighborhoodSearch::new(model.cutoff_radius());
        search.update(store.positions());

        let update = model.compute_new_position(0.01, store.get(id).unwrap(), &store, &geometry, &search);

        // Same situation without the other agent.
        let (lone_store, _, lone_search) = environment(
            vec![{
                let mut a = agent(0.0, 0.0, profile, target);
                a.velocity = Point::new(1.0, 0.0);
                a
            }],
            empty_geometry(),
            model.cutoff_radius(),
        );
        let lone = model.compute_new_position(
            0.01,
            lone_store.get(AgentId(0)).unwrap(),
            &lone_store,
            &geometry,
            &lone_search,
        );
        assert_eq!(update.velocity, lone.velocity);
    }

    #[test]
    fn repulsion_is_continuous_across_interpolation_boundary() {
        // Walks at v0 straight at a stationary neighbor, so the driving
        // force vanishes and the update isolates the repulsion term.
        let update_at = |model: &crate::gcfm::GcfmModel, profile, gap: f64| {
            let target = Point::new(10.0, 0.0);
            let mut walker = agent(0.0, 0.0, profile, target);
            walker.velocity = Point::new(1.2, 0.0);
            let blocker = agent(0.6 + gap, 0.0, profile, Point::new(10.0, 0.0));
            let (store, geometry, search) = environment(
                vec![walker, blocker],
                empty_geometry(),
                model.cutoff_radius(),
            );
            model.compute_new_position(0.01, store.get(AgentId(0)).unwrap(), &store, &geometry, &search)
        };

        // Default cap (9 N): both sides of the 0.1 m interpolation boundary
        // saturate, so the velocities match.
        let mut builder = GcfmModelBuilder::new();
        let profile = builder.add_parameter_profile(GcfmProfile::default()).unwrap();
        let model = builder.build();
        let inside = update_at(&model, profile, 0.1 - 1e-6);
        let outside = update_at(&model, profile, 0.1 + 1e-6);
        assert!((inside.velocity.x - outside.velocity.x).abs() < 1e-3);
        assert!(inside.velocity.x <= outside.velocity.x + 1e-12, "repulsion must not weaken as the gap closes");

        // Cap raised out of reach: the ramp and the 1/distance branch still
        // meet at the boundary.
        let mut builder = GcfmModelBuilder::new().max_neighbor_repulsion_force(100.0);
        let profile = builder.add_parameter_profile(GcfmProfile::default()).unwrap();
        let model = builder.build();
        let inside = update_at(&model, profile, 0.1 - 1e-6);
        let outside = update_at(&model, profile, 0.1 + 1e-6);
        assert!((inside.velocity.x - outside.velocity.x).abs() < 1e-3);
        assert!(inside.velocity.x <= outside.velocity.x + 1e-12);
    }

    #[test]
    fn interaction_cut_uses_body_to_body_distance() {
        let mut builder = GcfmModelBuilder::new();
        let profile = builder.add_parameter_profile(GcfmProfile::default()).unwrap();
        let model = builder.build();

        let update_with_blocker_at = |x: f64| {
            let target = Point::new(10.0, 0.0);
            let mut walker = agent(0.0, 0.0, profile, target);
            walker.velocity = Point::new(1.2, 0.0);
            let blocker = agent(x, 0.0, profile, Point::new(10.0, 0.0));
            let (store, geometry, search) = environment(
                vec![walker, blocker],
                empty_geometry(),
                model.cutoff_radius(),
            );
            model.compute_new_position(0.01, store.get(AgentId(0)).unwrap(), &store, &geometry, &search)
        };

        // Centers 2.3 m apart: body gap 2.3 − 0.6 = 1.7 m, inside the 2 m
        // interaction distance even though the centers are not.
        let near = update_with_blocker_at(2.3);
        assert!(near.velocity.x < 1.2);

        // Body gap 2.2 m: no repulsion, and at v0 the driving force is zero.
        let far = update_with_blocker_at(2.8);
        assert!((far.velocity.x - 1.2).abs() < 1e-12);
    }

    #[test]
    fn profile_out_of_range_rejected() {
        let mut builder = GcfmModelBuilder::new();
        let result = builder.add_parameter_profile(GcfmProfile { mass: 0.0, ..Default::default() });
        match result {
            Err(ModelError::ParameterOutOfRange { name, .. }) => assert_eq!(name, "mass"),
            other => panic!("expected ParameterOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn overlap_constraint_detected() {
        let mut builder = GcfmModelBuilder::new();
        let profile = builder.add_parameter_profile(GcfmProfile::default()).unwrap();
        let model = builder.build();

        let target = Point::new(10.0, 0.0);
        let (store, geometry, search) = environment(
            vec![agent(0.0, 0.0, profile, target), agent(0.4, 0.0, profile, target)],
            empty_geometry(),
            model.cutoff_radius(),
        );

        match model.check_model_constraint(store.get(AgentId(0)).unwrap(), &store, &geometry, &search) {
            Err(ModelError::AgentOverlap { distance, contact, .. }) => {
                assert!((distance - 0.4).abs() < 1e-12);
                assert!((contact - 0.6).abs() < 1e-12);
            }
            other => panic!("expected AgentOverlap, got {other:?}"),
        }
    }

    #[test]
    fn boundary_constraint_detected() {
        let mut builder = GcfmModelBuilder::new();
        let profile = builder.add_parameter_profile(GcfmProfile::default()).unwrap();
        let model = builder.build();

        let mut geometry = CollisionGeometryBuilder::new();
        geometry.add_line_segment(0.0, 0.2, 10.0, 0.2);
        let geometry = geometry.build().unwrap();

        let (store, geometry, search) = environment(
            vec![agent(0.5, 0.0, profile, Point::new(10.0, 0.0))],
            geometry,
            model.cutoff_radius(),
        );

        match model.check_model_constraint(store.get(AgentId(0)).unwrap(), &store, &geometry, &search) {
            Err(ModelError::CloseToBoundary { distance, .. }) => {
                assert!((distance - 0.2).abs() < 1e-12);
            }
            other => panic!("expected CloseToBoundary, got {other:?}"),
        }
    }
}

#[cfg(test)]
mod social_force {
    use super::*;
    use crate::social_force::{SocialForceModelBuilder, SocialForceProfile};

    #[test]
    fn lone_agent_relaxes_towards_desired_speed() {
        let mut builder = SocialForceModelBuilder::new();
        let profile = builder.add_parameter_profile(SocialForceProfile::default()).unwrap();
        let model = builder.build();

        let (store, geometry, search) = environment(
            vec![agent(0.0, 0.0, profile, Point::new(10.0, 0.0))],
            empty_geometry(),
            model.cutoff_radius(),
        );

        // a = (e0·v0 − v)/reaction_time = 0.8 / 0.5 = 1.6 m/s².
        let update = model.compute_new_position(0.01, store.get(AgentId(0)).unwrap(), &store, &geometry, &search);
        assert!((update.velocity.x - 0.016).abs() < 1e-12);
        assert_eq!(update.velocity.y, 0.0);
    }

    #[test]
    fn coincident_agents_yield_finite_update() {
        let mut builder = SocialForceModelBuilder::new();
        let profile = builder.add_parameter_profile(SocialForceProfile::default()).unwrap();
        let model = builder.build();

        let target = Point::new(10.0, 0.0);
        let (store, geometry, search) = environment(
            vec![agent(0.0, 0.0, profile, target), agent(0.0, 0.0, profile, target)],
            empty_geometry(),
            model.cutoff_radius(),
        );

        let update = model.compute_new_position(0.01, store.get(AgentId(0)).unwrap(), &store, &geometry, &search);
        assert!(update.position.x.is_finite() && update.position.y.is_finite());
        assert!(update.velocity.x.is_finite() && update.velocity.y.is_finite());
    }

    #[test]
    fn neighbors_repel_each_other() {
        let mut builder = SocialForceModelBuilder::new();
        let profile = builder.add_parameter_profile(SocialForceProfile::default()).unwrap();
        let model = builder.build();

        // Both stationary, no destinations pulling: pure repulsion.
        let (store, geometry, search) = environment(
            vec![
                agent(0.0, 0.0, profile, Point::new(0.0, 0.0)),
                agent(0.5, 0.0, profile, Point::new(0.5, 0.0)),
            ],
            empty_geometry(),
            model.cutoff_radius(),
        );

        let left = model.compute_new_position(0.01, store.get(AgentId(0)).unwrap(), &store, &geometry, &search);
        let right = model.compute_new_position(0.01, store.get(AgentId(1)).unwrap(), &store, &geometry, &search);
        assert!(left.velocity.x < 0.0);
        assert!(right.velocity.x > 0.0);
        assert!((left.velocity.x + right.velocity.x).abs() < 1e-12, "symmetric push");
    }
}

#[cfg(test)]
mod speed {
    use super::*;
    use crate::speed::{
        CollisionFreeSpeedModelBuilder, CollisionFreeSpeedModelIndividualBuilder,
        CollisionFreeSpeedModelV2Builder, CollisionFreeSpeedModelV3Builder,
        IndividualSpeedProfile, SpeedProfile, SpeedProfileV2,
    };

    #[test]
    fn spacing_throttles_speed() {
        let mut builder = CollisionFreeSpeedModelBuilder::new();
        let profile = builder.add_parameter_profile(SpeedProfile::default()).unwrap();
        let model = builder.build();

        // Neighbor 1 m ahead, radii 0.3 each: spacing = 1 − 0.6 = 0.4 m,
        // time gap 1 s → speed 0.4 m/s.
        let target = Point::new(10.0, 0.0);
        let (store, geometry, search) = environment(
            vec![agent(0.0, 0.0, profile, target), agent(1.0, 0.0, profile, Point::new(1.0, 0.0))],
            empty_geometry(),
            model.cutoff_radius(),
        );

        let update = model.compute_new_position(0.01, store.get(AgentId(0)).unwrap(), &store, &geometry, &search);
        assert!((update.velocity.x - 0.4).abs() < 1e-9);
        assert_eq!(update.velocity.y, 0.0);
    }

    #[test]
    fn neighbor_behind_does_not_throttle() {
        let mut builder = CollisionFreeSpeedModelBuilder::new();
        let profile = builder.add_parameter_profile(SpeedProfile::default()).unwrap();
        let model = builder.build();

        let target = Point::new(10.0, 0.0);
        let (store, geometry, search) = environment(
            vec![agent(0.0, 0.0, profile, target), agent(-1.0, 0.0, profile, target)],
            empty_geometry(),
            model.cutoff_radius(),
        );

        let update = model.compute_new_position(0.01, store.get(AgentId(0)).unwrap(), &store, &geometry, &search);
        assert!((update.velocity.x - 1.2).abs() < 1e-9);
    }

    #[test]
    fn laterally_clear_neighbor_does_not_throttle() {
        let mut builder = CollisionFreeSpeedModelBuilder::new();
        let profile = builder.add_parameter_profile(SpeedProfile::default()).unwrap();
        let model = builder.build();

        // Ahead, but offset 0.7 m sideways > contact distance 0.6 m.
        let target = Point::new(10.0, 0.0);
        let (store, geometry, search) = environment(
            vec![agent(0.0, 0.0, profile, target), agent(1.0, 0.7, profile, target)],
            empty_geometry(),
            model.cutoff_radius(),
        );

        let update = model.compute_new_position(0.01, store.get(AgentId(0)).unwrap(), &store, &geometry, &search);
        assert!((update.velocity.norm() - 1.2).abs() < 1e-9);
    }

    #[test]
    fn v3_walls_throttle_v2_walls_do_not() {
        let mut geometry = CollisionGeometryBuilder::new();
        geometry.add_line_segment(1.0, -5.0, 1.0, 5.0);
        let geometry = geometry.build().unwrap();

        // Head-on at the wall: V2 keeps full speed, V3 slows to
        // spacing / time_gap = (1 − 0.3) / 1 = 0.7 m/s.
        let target = Point::new(10.0, 0.0);

        let mut v2_builder = CollisionFreeSpeedModelV2Builder::new();
        let v2_profile = v2_builder.add_parameter_profile(SpeedProfileV2::default()).unwrap();
        let v2 = v2_builder.build();
        let (store, geometry2, search) = environment(
            vec![agent(0.0, 0.0, v2_profile, target)],
            geometry.clone(),
            v2.cutoff_radius(),
        );
        let update = v2.compute_new_position(0.01, store.get(AgentId(0)).unwrap(), &store, &geometry2, &search);
        assert!((update.velocity.norm() - 1.2).abs() < 1e-6);

        let mut v3_builder = CollisionFreeSpeedModelV3Builder::new();
        let v3_profile = v3_builder.add_parameter_profile(SpeedProfileV2::default()).unwrap();
        let v3 = v3_builder.build();
        let (store, geometry3, search) = environment(
            vec![agent(0.0, 0.0, v3_profile, target)],
            geometry,
            v3.cutoff_radius(),
        );
        let update = v3.compute_new_position(0.01, store.get(AgentId(0)).unwrap(), &store, &geometry3, &search);
        assert!((update.velocity.norm() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn individual_neighbor_strength_is_per_profile() {
        let mut builder = CollisionFreeSpeedModelIndividualBuilder::new();
        let yielding = builder
            .add_parameter_profile(IndividualSpeedProfile::default())
            .unwrap();
        let oblivious = builder
            .add_parameter_profile(IndividualSpeedProfile {
                strength_neighbor_repulsion: 0.0,
                ..Default::default()
            })
            .unwrap();
        let model = builder.build();

        // A neighbor ahead and slightly to the side deflects the yielding
        // profile off its axis; the zero-strength profile walks straight.
        let target = Point::new(10.0, 0.0);
        for (profile, deflected) in [(yielding, true), (oblivious, false)] {
            let (store, geometry, search) = environment(
                vec![agent(0.0, 0.0, profile, target), agent(1.0, 0.5, profile, target)],
                empty_geometry(),
                model.cutoff_radius(),
            );
            let update = model.compute_new_position(0.01, store.get(AgentId(0)).unwrap(), &store, &geometry, &search);
            assert_eq!(update.velocity.y != 0.0, deflected);
        }
    }

    #[test]
    fn profile_indirection_retrieves_distinct_parameters() {
        let mut builder = CollisionFreeSpeedModelBuilder::new();
        let slow = builder
            .add_parameter_profile(SpeedProfile { v0: 0.5, ..Default::default() })
            .unwrap();
        let medium = builder
            .add_parameter_profile(SpeedProfile { v0: 1.0, ..Default::default() })
            .unwrap();
        let fast = builder
            .add_parameter_profile(SpeedProfile { v0: 1.5, ..Default::default() })
            .unwrap();
        let model = builder.build();
        assert!(model.has_profile(slow) && model.has_profile(medium) && model.has_profile(fast));
        assert!(!model.has_profile(ParametersId(3)));

        // Free space everywhere: each agent walks at its profile's v0.
        let target = Point::new(100.0, 0.0);
        let (store, geometry, search) = environment(
            vec![
                agent(0.0, 0.0, slow, target),
                agent(0.0, 20.0, medium, target),
                agent(0.0, 40.0, fast, target),
            ],
            empty_geometry(),
            model.cutoff_radius(),
        );

        let speeds: Vec<f64> = store
            .iter()
            .map(|a| model.compute_new_position(0.01, a, &store, &geometry, &search).velocity.norm())
            .collect();
        assert!((speeds[0] - 0.5).abs() < 1e-9);
        assert!((speeds[1] - 1.0).abs() < 1e-9);
        assert!((speeds[2] - 1.5).abs() < 1e-9);
    }
}

#[cfg(test)]
mod two_phase {
    use super::*;
    use crate::AgentUpdate;
    use crate::gcfm::{GcfmModelBuilder, GcfmProfile};

    #[test]
    fn updates_are_independent_of_evaluation_order() {
        let mut builder = GcfmModelBuilder::new();
        let profile = builder.add_parameter_profile(GcfmProfile::default()).unwrap();
        let model = builder.build();

        let target = Point::new(10.0, 0.0);
        let agents: Vec<Agent> = (0..8)
            .map(|i| {
                let mut a = agent(-(i as f64) * 0.8, (i % 3) as f64 * 0.7, profile, target);
                a.velocity = Point::new(0.5, 0.0);
                a
            })
            .collect();
        let (store, geometry, search) = environment(agents, empty_geometry(), model.cutoff_radius());

        let forward: Vec<AgentUpdate> = store
            .iter()
            .map(|a| model.compute_new_position(0.01, a, &store, &geometry, &search))
            .collect();
        let mut backward: Vec<AgentUpdate> = store
            .as_slice()
            .iter()
            .rev()
            .map(|a| model.compute_new_position(0.01, a, &store, &geometry, &search))
            .collect();
        backward.reverse();

        assert_eq!(forward, backward);
    }
}
