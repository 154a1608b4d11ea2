//! Numerical parameters for the simulation
//!
//! `Parameters` holds the validated runtime settings:
//! - screen bounds and target population,
//! - trail length, roaming and orbital speeds,
//! - capture/absorption radii and the per-tick orbit decay,
//! - escape and capture probabilities,
//! - anchor count and the range their drawn rings are sampled from
//!
//! Built once from a validated `SimulationConfig` and never mutated afterwards.

use crate::configuration::config::SimulationConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub width: f64, // screen width
    pub height: f64, // screen height
    pub population: usize, // target particle count
    pub trail_length: usize, // max trail points per particle
    pub orbit_speed: f64, // radians per tick while orbiting
    pub orbit_decay: f64, // orbit radius lost per tick
    pub roam_speed: f64, // max velocity component while roaming
    pub capture_radius: f64, // anchors capture within this distance
    pub absorption_radius: f64, // orbits below this radius are absorbed
    pub escape_probability: f64, // per orbiting tick
    pub capture_probability: f64, // per in-range anchor per roaming tick
    pub orbit_count: usize, // number of anchors
    pub ring_radius_min: f64, // drawn ring radius range
    pub ring_radius_max: f64,
}

impl Parameters {
    /// Copy numeric fields out of an already validated config
    pub fn from_config(cfg: &SimulationConfig) -> Self {
        Self {
            width: cfg.screen.width,
            height: cfg.screen.height,
            population: cfg.particles.population,
            trail_length: cfg.particles.trail_length,
            orbit_speed: cfg.orbits.orbit_speed,
            orbit_decay: cfg.orbits.orbit_decay,
            roam_speed: cfg.particles.roam_speed,
            capture_radius: cfg.orbits.capture_radius,
            absorption_radius: cfg.orbits.absorption_radius,
            escape_probability: cfg.probabilities.escape,
            capture_probability: cfg.probabilities.capture,
            orbit_count: cfg.orbits.count,
            ring_radius_min: cfg.orbits.ring_radius_min,
            ring_radius_max: cfg.orbits.ring_radius_max,
        }
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}
