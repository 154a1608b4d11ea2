use std::time::Instant;

use crate::configuration::config::{ExecutionConfig, SimulationConfig};
use crate::simulation::scenario::Scenario;

/// Helper to build a seeded scenario with `n` particles
fn make_scenario(n: usize, mode: ExecutionConfig) -> anyhow::Result<Scenario> {
    let mut cfg = SimulationConfig::default();
    cfg.particles.population = n;
    cfg.engine.mode = mode;
    cfg.engine.seed = Some(42);
    Ok(Scenario::build_scenario(cfg)?)
}

/// Mean wall time of one `update` in milliseconds
fn time_frames(scenario: &mut Scenario, frames: usize) -> f64 {
    // Warm-up one frame
    scenario.update();

    let t0 = Instant::now();
    for _ in 0..frames {
        scenario.update();
    }
    t0.elapsed().as_secs_f64() * 1000.0 / frames.max(1) as f64
}

/// Sequential vs parallel frame time for a range of population sizes
/// Paste output directly into excel to graph
pub fn bench_update(sizes: &[usize], frames: usize) -> anyhow::Result<()> {
    println!("N,sequential_ms,parallel_ms");

    for &n in sizes {
        let mut sequential = make_scenario(n, ExecutionConfig::Sequential)?;
        let ms_sequential = time_frames(&mut sequential, frames);

        let mut parallel = make_scenario(n, ExecutionConfig::Parallel)?;
        let ms_parallel = time_frames(&mut parallel, frames);

        println!("{},{:.6},{:.6}", n, ms_sequential, ms_parallel);
    }

    Ok(())
}

/// Default sweep, doubling from 1250 up to 80000 particles
pub fn bench_update_curve() -> anyhow::Result<()> {
    let sizes: Vec<usize> = (0..7).map(|k| 1250 << k).collect();
    bench_update(&sizes, 60)
}
