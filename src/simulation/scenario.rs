//! Build a fully-initialized simulation scenario from configuration
//!
//! Takes a `SimulationConfig` (YAML-facing) and produces the runtime bundle
//! (`Scenario`) containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - the anchor registry (`OrbitAnchor`s, fixed for the run)
//! - the particle population (`PopulationManager`), already seeded
//!
//! The scenario is inserted into Bevy as a `Resource` and consumed by the
//! update and draw systems, or driven directly by the headless loop

use bevy::prelude::Resource;
use log::info;

use crate::configuration::config::{ConfigError, SimulationConfig};
use crate::simulation::engine::Engine;
use crate::simulation::params::Parameters;
use crate::simulation::population::{FrameReport, PopulationManager};
use crate::simulation::random::{RandomSource, WorkerRng};
use crate::simulation::states::{NVec2, OrbitAnchor};
use crate::visualization::sink::RenderSink;

/// Bevy resource representing a fully-initialized simulation
///
/// This is the main "runtime bundle" constructed from a [`SimulationConfig`]:
/// it contains the engine settings, parameters, the anchor registry and the
/// particle population
#[derive(Resource)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub anchors: Vec<OrbitAnchor>,
    pub population: PopulationManager,
    pub frame: u64, // frames updated so far
}

impl Scenario {
    /// Validate `cfg` and build the runtime state. Nothing is constructed
    /// when validation fails.
    pub fn build_scenario(cfg: SimulationConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;

        let parameters = Parameters::from_config(&cfg);

        // Engine (runtime) from EngineConfig
        let engine = Engine {
            mode: cfg.engine.mode,
            threads: cfg.engine.threads,
            seed: cfg.engine.seed,
        };

        // Layout draws use their own stream so they never shift particle draws
        let mut layout_rng = match engine.seed {
            Some(seed) => WorkerRng::seeded(seed.wrapping_add(1)),
            None => WorkerRng::from_entropy(),
        };
        let anchors = layout_anchors(&parameters, &mut layout_rng);

        let mut population = PopulationManager::new(parameters.population, &engine)?;
        population.seed_population(&parameters);

        info!(
            "scenario ready: {} anchors, {} particles, {:?} updates",
            anchors.len(),
            population.len(),
            engine.mode
        );

        Ok(Self {
            engine,
            parameters,
            anchors,
            population,
            frame: 0,
        })
    }

    /// Advance every particle by one tick
    pub fn update(&mut self) -> FrameReport {
        let Scenario {
            anchors,
            parameters,
            population,
            ..
        } = &mut *self;

        let report = population.update(anchors, parameters);
        self.frame += 1;
        report
    }

    /// Hand the current read-only state to a sink
    pub fn present<S: RenderSink + ?Sized>(&self, sink: &mut S) {
        sink.begin_frame();
        for anchor in &self.anchors {
            sink.draw_orbit(anchor);
        }
        for particle in self.population.particles() {
            sink.draw_particle(particle);
        }
        sink.end_frame();
    }

    /// Particles absorbed by all anchors so far
    pub fn absorbed_total(&self) -> u64 {
        self.anchors.iter().map(OrbitAnchor::absorbed_count).sum()
    }
}

/// Anchors spread evenly across the width, alternating above and below the
/// horizontal centre line (first one above)
pub fn layout_anchors<R: RandomSource + ?Sized>(params: &Parameters, rng: &mut R) -> Vec<OrbitAnchor> {
    let n = params.orbit_count;
    (0..n)
        .map(|i| {
            let x = params.width * (i + 1) as f64 / (n + 1) as f64;
            let side = if i % 2 == 0 { -1.0 } else { 1.0 };
            let y = params.height / 2.0 + side * params.height / 4.0;
            let ring_radius = rng.uniform_range(params.ring_radius_min, params.ring_radius_max);
            OrbitAnchor::new(NVec2::new(x, y), ring_radius)
        })
        .collect()
}
