//! corridor — smallest example for the rust_ped crowd simulation framework.
//!
//! Twenty pedestrians walk the length of a 10 m × 4 m corridor towards an
//! exit area at the far end, steered by the collision-free speed model.
//! Swap the model builder and profile types to try the other operational
//! models on the same scene.

use anyhow::Result;

use ped_core::{AreaId, ConvexPolygon, Point, SimRng};
use ped_geometry::{AreasBuilder, CollisionGeometryBuilder};
use ped_model::{CollisionFreeSpeedModelBuilder, SpeedProfile};
use ped_sim::{AgentRequest, SimObserver, SimulationBuilder};

// ── Constants ─────────────────────────────────────────────────────────────────

const AGENT_COUNT: usize = 20;
const SEED: u64 = 42;
const DELTA_T: f64 = 0.01; // 10 ms per iteration
const ITERATIONS: u64 = 2_000; // 20 s of simulated time
const REPORT_EVERY: u64 = 500;

const AGENT_RADIUS: f64 = 0.2;
const CORRIDOR_LENGTH: f64 = 10.0;
const CORRIDOR_WIDTH: f64 = 4.0;

// ── Progress observer ─────────────────────────────────────────────────────────

struct ProgressObserver;

impl SimObserver for ProgressObserver {
    fn on_iteration_end(&mut self, iteration: u64, agents: &ped_agent::AgentStore) {
        if iteration % REPORT_EVERY != 0 {
            return;
        }
        let mean_x =
            agents.iter().map(|a| a.pos.x).sum::<f64>() / agents.len().max(1) as f64;
        let mean_speed =
            agents.iter().map(|a| a.speed()).sum::<f64>() / agents.len().max(1) as f64;
        println!(
            "  iter {iteration:>5}  t = {:>5.1} s  mean x = {mean_x:>5.2} m  mean speed = {mean_speed:.2} m/s",
            iteration as f64 * DELTA_T,
        );
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== corridor — rust_ped crowd simulation ===");
    println!("Agents: {AGENT_COUNT}  |  Iterations: {ITERATIONS}  |  Seed: {SEED}");
    println!();

    // 1. Corridor walls: two horizontal segments, open at both ends.
    let mut geometry = CollisionGeometryBuilder::new();
    geometry
        .add_line_segment(0.0, 0.0, CORRIDOR_LENGTH, 0.0)
        .add_line_segment(0.0, CORRIDOR_WIDTH, CORRIDOR_LENGTH, CORRIDOR_WIDTH);
    let geometry = geometry.build()?;

    // 2. Exit area covering the last metre of the corridor.
    let mut areas = AreasBuilder::new();
    areas.add_area(
        AreaId(0),
        ConvexPolygon::new(vec![
            Point::new(CORRIDOR_LENGTH - 1.0, 0.0),
            Point::new(CORRIDOR_LENGTH, 0.0),
            Point::new(CORRIDOR_LENGTH, CORRIDOR_WIDTH),
            Point::new(CORRIDOR_LENGTH - 1.0, CORRIDOR_WIDTH),
        ]),
        vec!["exit".into()],
    );
    let areas = areas.build()?;

    // 3. Collision-free speed model with two walking-speed profiles.
    let mut model = CollisionFreeSpeedModelBuilder::new();
    let stroller = model.add_parameter_profile(SpeedProfile { v0: 0.9, ..Default::default() })?;
    let walker = model.add_parameter_profile(SpeedProfile::default())?;
    let model = model.build();

    let mut sim = SimulationBuilder::new(model, geometry, DELTA_T)
        .areas(areas)
        .build()?;

    // 4. Seed agents in the first two metres, jittered off a grid so nobody
    //    overlaps at admission.  The placement RNG is a child stream of the
    //    root seed; further randomized stages can derive their own streams
    //    without perturbing each other.
    let mut rng = SimRng::new(SEED);
    let mut placement = rng.child(1);
    let destination = Point::new(CORRIDOR_LENGTH, CORRIDOR_WIDTH / 2.0);
    let mut ids = Vec::with_capacity(AGENT_COUNT);
    for i in 0..AGENT_COUNT {
        let col = (i / 5) as f64;
        let row = (i % 5) as f64;
        let jitter =
            Point::new(placement.gen_range(-0.05..0.05), placement.gen_range(-0.05..0.05));
        let pos = Point::new(0.5 + col * 0.6, 0.6 + row * 0.7) + jitter;
        let profile = if i % 4 == 0 { stroller } else { walker };
        let id = sim.add_agent(AgentRequest {
            pos,
            orientation: Point::new(1.0, 0.0),
            radius: AGENT_RADIUS,
            profile,
            destination,
        })?;
        ids.push(id);
    }
    println!("Admitted {} agents", sim.agent_count());

    // 5. Run.
    let mut observer = ProgressObserver;
    sim.run(ITERATIONS, &mut observer);
    println!();

    // 6. Final report: who made it into the exit area.
    let exit = sim
        .areas()
        .get(AreaId(0))
        .ok_or_else(|| anyhow::anyhow!("exit area missing"))?
        .clone();
    let mut arrived = 0;
    println!("  id         x       y   speed  arrived");
    for &id in &ids {
        let agent = sim.agent(id)?;
        let in_exit = exit.contains(agent.pos);
        arrived += usize::from(in_exit);
        println!(
            "  {:>2}  {:>8.2}  {:>6.2}  {:>6.2}  {}",
            agent.id.index(),
            agent.pos.x,
            agent.pos.y,
            agent.speed(),
            if in_exit { "yes" } else { "no" },
        );
    }
    println!();
    println!(
        "{arrived}/{AGENT_COUNT} agents reached the exit after {:.1} s",
        sim.elapsed_time()
    );
    Ok(())
}
