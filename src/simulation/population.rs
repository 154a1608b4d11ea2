//! Particle collection and the per-frame update protocol
//!
//! A frame runs in three phases:
//! 1. every particle is stepped and yields an alive/dead verdict
//!    (in parallel chunks, each with its own generator, or sequentially),
//! 2. the collection is compacted on the coordinating thread using those
//!    verdicts,
//! 3. the collection is topped up to the target size with fresh particles.
//!
//! Workers only ever hold `&mut` to their own chunk, so structural changes
//! can never overlap with in-flight steps.

use std::time::Instant;

use log::{debug, info};
use rayon::prelude::*;

use super::engine::Engine;
use super::params::Parameters;
use super::random::WorkerRng;
use super::states::{OrbitAnchor, Particle};
use super::step::step_particle;

/// Particles per parallel work item; each item draws from its own generator
pub const CHUNK_LEN: usize = 512;

/// What happened during one `update`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub absorbed: usize, // removed this frame
    pub spawned: usize, // added by replenishment
    pub orbiting: usize, // orbiting after the frame
}

pub struct PopulationManager {
    particles: Vec<Particle>,
    target: usize,
    rng: WorkerRng, // coordinator generator: replenishment and chunk seeds
    parallel: bool,
    pool: Option<rayon::ThreadPool>,
}

impl PopulationManager {
    /// Empty manager; call [`seed_population`](Self::seed_population) to fill it
    pub fn new(target: usize, engine: &Engine) -> Result<Self, rayon::ThreadPoolBuildError> {
        Self::from_particles(Vec::new(), target, engine)
    }

    /// Manager over an existing collection
    pub fn from_particles(particles: Vec<Particle>, target: usize, engine: &Engine) -> Result<Self, rayon::ThreadPoolBuildError> {
        let rng = match engine.seed {
            Some(seed) => WorkerRng::seeded(seed),
            None => WorkerRng::from_entropy(),
        };
        Ok(Self {
            particles,
            target,
            rng,
            parallel: engine.is_parallel(),
            pool: engine.build_pool()?,
        })
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn target(&self) -> usize {
        self.target
    }

    /// Fill the initial population
    pub fn seed_population(&mut self, params: &Parameters) {
        let t0 = Instant::now();
        let spawned = self.replenish(params);
        let ms = t0.elapsed().as_secs_f64() * 1000.0;
        info!("generated {spawned} particles in {ms:.3} ms");
    }

    /// Run one full frame: step, compact, replenish
    pub fn update(&mut self, anchors: &[OrbitAnchor], params: &Parameters) -> FrameReport {
        let verdicts = if self.parallel {
            self.step_parallel(anchors, params)
        } else {
            self.step_sequential(anchors, params)
        };

        let absorbed = self.compact(&verdicts);
        let spawned = self.replenish(params);
        let orbiting = self.particles.iter().filter(|p| p.is_orbiting()).count();

        FrameReport { absorbed, spawned, orbiting }
    }

    fn step_sequential(&mut self, anchors: &[OrbitAnchor], params: &Parameters) -> Vec<bool> {
        let rng = &mut self.rng;
        self.particles
            .iter_mut()
            .map(|p| step_particle(p, anchors, params, &mut *rng))
            .collect()
    }

    fn step_parallel(&mut self, anchors: &[OrbitAnchor], params: &Parameters) -> Vec<bool> {
        // Seeds are drawn up front on this thread, one per chunk
        let chunks = self.particles.len().div_ceil(CHUNK_LEN);
        let seeds: Vec<u64> = (0..chunks).map(|_| self.rng.next_seed()).collect();
        debug!("stepping {} particles in {chunks} chunks", self.particles.len());

        let particles = &mut self.particles;
        let mut run = || {
            particles
                .par_chunks_mut(CHUNK_LEN)
                .zip(seeds.par_iter())
                .map(|(chunk, &seed)| {
                    let mut rng = WorkerRng::seeded(seed);
                    chunk
                        .iter_mut()
                        .map(|p| step_particle(p, anchors, params, &mut rng))
                        .collect::<Vec<bool>>()
                })
                .collect::<Vec<Vec<bool>>>()
                .concat()
        };

        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }

    /// Drop particles whose verdict is `false`; returns how many were removed
    fn compact(&mut self, verdicts: &[bool]) -> usize {
        let before = self.particles.len();
        let mut alive = verdicts.iter().copied();
        self.particles.retain(|_| alive.next().unwrap_or(true));
        before - self.particles.len()
    }

    /// Top up to the target size. Never trims a surplus.
    fn replenish(&mut self, params: &Parameters) -> usize {
        let missing = self.target.saturating_sub(self.particles.len());
        self.particles.reserve(missing);
        while self.particles.len() < self.target {
            self.particles.push(Particle::spawn(params, &mut self.rng));
        }
        missing
    }
}
