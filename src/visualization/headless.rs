//! Windowless frame loop.
//!
//! Drives the same update/present cycle as the viewer for a fixed number of
//! frames, counting draw calls instead of rendering them.

use log::{debug, info};

use crate::simulation::scenario::Scenario;
use crate::visualization::sink::{FpsCounter, FrameTally};

pub fn run_headless(scenario: &mut Scenario, frames: u64) -> FrameTally {
    info!(
        "run_headless: {frames} frames, {} particles around {} orbits",
        scenario.population.len(),
        scenario.anchors.len()
    );

    let mut tally = FrameTally::default();
    let mut fps = FpsCounter::default();

    for _ in 0..frames {
        let report = scenario.update();
        scenario.present(&mut tally);
        debug!(
            "frame {}: {} absorbed, {} spawned, {} orbiting",
            scenario.frame, report.absorbed, report.spawned, report.orbiting
        );

        if let Some(rate) = fps.tick() {
            info!("FPS: {rate:.2}");
        }
    }

    for (i, anchor) in scenario.anchors.iter().enumerate() {
        info!("orbit {i} at ({:.1}, {:.1}): {} absorbed", anchor.position.x, anchor.position.y, anchor.absorbed_count());
    }
    info!("{} absorbed in total after {} frames", scenario.absorbed_total(), scenario.frame);

    tally
}
