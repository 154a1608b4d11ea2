//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation run. A scenario consists of:
//!
//! - [`EngineConfig`]        – execution options (sequential/parallel, threads, seed)
//! - [`ScreenConfig`]        – bounds of the plane particles roam in
//! - [`ParticleConfig`]      – population size, trail length, roaming speed
//! - [`OrbitConfig`]         – anchor count, orbital speed and radii
//! - [`ProbabilityConfig`]   – escape and capture probabilities
//! - [`SimulationConfig`]    – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! Every section and field is optional and falls back to its default:
//!
//! ```yaml
//! engine:
//!   mode: "parallel"        # or "sequential"
//!   threads: 0              # 0 -> rayon's global pool
//!   seed: ~                 # omit for OS entropy
//!
//! screen:
//!   width: 800.0
//!   height: 600.0
//!
//! particles:
//!   population: 5000
//!   trail_length: 20
//!   roam_speed: 1.0
//!
//! orbits:
//!   count: 5
//!   orbit_speed: 0.02       # radians per tick
//!   orbit_decay: 0.01       # radius lost per tick
//!   capture_radius: 100.0
//!   absorption_radius: 5.0
//!   ring_radius_min: 50.0   # drawn ring only
//!   ring_radius_max: 150.0
//!
//! probabilities:
//!   escape: 0.005
//!   capture: 0.05
//! ```
//!
//! [`SimulationConfig::validate`] must pass before any simulation state is
//! built. Invalid values are rejected, never clamped.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while checking a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a finite number")]
    NotFinite { name: &'static str },

    #[error("{name} must be non-negative (got {value})")]
    Negative { name: &'static str, value: f64 },

    #[error("{name} must be greater than zero (got {value})")]
    NotPositive { name: &'static str, value: f64 },

    #[error("{name} must be a probability in [0, 1] (got {value})")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },

    #[error("capture radius ({capture}) must be greater than absorption radius ({absorption})")]
    RadiusOrdering { capture: f64, absorption: f64 },

    #[error("ring_radius_min ({min}) must not exceed ring_radius_max ({max})")]
    RingRadiusOrdering { min: f64, max: f64 },

    #[error("{name}: could not parse {input:?} as a number")]
    Parse { name: &'static str, input: String },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// How the per-particle phase of a frame is executed
/// mode: "sequential"` or `mode: "parallel"
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionConfig {
    #[serde(rename = "sequential")] // single thread, one generator
    Sequential,

    #[default]
    #[serde(rename = "parallel")] // rayon fan-out, one generator per chunk
    Parallel,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub mode: ExecutionConfig, // sequential or parallel frame updates
    pub threads: usize, // worker threads, 0 = rayon default
    pub seed: Option<u64>, // fixed seed, mainly for tests and benchmarks
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self { width: 800.0, height: 600.0 }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ParticleConfig {
    pub population: usize, // target population, topped up every frame
    pub trail_length: usize, // positions kept per particle
    pub roam_speed: f64, // velocity components drawn from [-roam_speed, roam_speed]
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            population: 5000,
            trail_length: 20,
            roam_speed: 1.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct OrbitConfig {
    pub count: usize, // number of anchors
    pub orbit_speed: f64, // angular step per tick
    pub orbit_decay: f64, // radius decrement per tick
    pub capture_radius: f64, // roaming particles closer than this may be captured
    pub absorption_radius: f64, // orbiting particles closer than this are absorbed
    pub ring_radius_min: f64, // display ring radius range
    pub ring_radius_max: f64,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            count: 5,
            orbit_speed: 0.02,
            orbit_decay: 0.01,
            capture_radius: 100.0,
            absorption_radius: 5.0,
            ring_radius_min: 50.0,
            ring_radius_max: 150.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ProbabilityConfig {
    pub escape: f64, // chance per orbiting tick of breaking free
    pub capture: f64, // chance per in-range anchor per roaming tick
}

impl Default for ProbabilityConfig {
    fn default() -> Self {
        Self { escape: 0.005, capture: 0.05 }
    }
}

/// Top-level configuration loaded from YAML
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct SimulationConfig {
    pub engine: EngineConfig,
    pub screen: ScreenConfig,
    pub particles: ParticleConfig,
    pub orbits: OrbitConfig,
    pub probabilities: ProbabilityConfig,
}

impl SimulationConfig {
    /// Check every documented constraint
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("screen.width", self.screen.width)?;
        check_positive("screen.height", self.screen.height)?;
        check_non_negative("particles.roam_speed", self.particles.roam_speed)?;
        check_non_negative("orbits.orbit_speed", self.orbits.orbit_speed)?;
        check_non_negative("orbits.orbit_decay", self.orbits.orbit_decay)?;
        check_positive("orbits.absorption_radius", self.orbits.absorption_radius)?;
        check_capture_radius(self.orbits.capture_radius, self.orbits.absorption_radius)?;
        check_non_negative("orbits.ring_radius_min", self.orbits.ring_radius_min)?;
        check_non_negative("orbits.ring_radius_max", self.orbits.ring_radius_max)?;
        if self.orbits.ring_radius_min > self.orbits.ring_radius_max {
            return Err(ConfigError::RingRadiusOrdering {
                min: self.orbits.ring_radius_min,
                max: self.orbits.ring_radius_max,
            });
        }
        check_probability("probabilities.escape", self.probabilities.escape)?;
        check_probability("probabilities.capture", self.probabilities.capture)?;
        Ok(())
    }
}

fn check_finite(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { name })
    }
}

pub fn check_non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    check_finite(name, value)?;
    if value < 0.0 {
        return Err(ConfigError::Negative { name, value });
    }
    Ok(())
}

pub fn check_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    check_finite(name, value)?;
    if value <= 0.0 {
        return Err(ConfigError::NotPositive { name, value });
    }
    Ok(())
}

pub fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    check_finite(name, value)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::ProbabilityOutOfRange { name, value });
    }
    Ok(())
}

/// capture radius > absorption radius (absorption itself checked separately)
pub fn check_capture_radius(capture: f64, absorption: f64) -> Result<(), ConfigError> {
    check_finite("orbits.capture_radius", capture)?;
    if capture <= absorption {
        return Err(ConfigError::RadiusOrdering { capture, absorption });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let cfg: SimulationConfig = serde_yaml::from_str("particles:\n  population: 10\n").unwrap();
        assert_eq!(cfg.particles.population, 10);
        assert_eq!(cfg.particles.trail_length, 20);
        assert_eq!(cfg.orbits, OrbitConfig::default());
        assert_eq!(cfg.engine.mode, ExecutionConfig::Parallel);
    }

    #[test]
    fn execution_mode_parses_lowercase() {
        let cfg: SimulationConfig = serde_yaml::from_str("engine:\n  mode: sequential\n  threads: 2\n").unwrap();
        assert_eq!(cfg.engine.mode, ExecutionConfig::Sequential);
        assert_eq!(cfg.engine.threads, 2);
    }

    #[test]
    fn rejects_probability_above_one() {
        let mut cfg = SimulationConfig::default();
        cfg.probabilities.capture = 1.5;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::ProbabilityOutOfRange { name: "probabilities.capture", .. })
        ));
    }

    #[test]
    fn rejects_negative_speed() {
        let mut cfg = SimulationConfig::default();
        cfg.particles.roam_speed = -1.0;
        assert!(matches!(cfg.validate(), Err(ConfigError::Negative { .. })));
    }

    #[test]
    fn rejects_capture_not_above_absorption() {
        let mut cfg = SimulationConfig::default();
        cfg.orbits.capture_radius = 5.0;
        assert!(matches!(cfg.validate(), Err(ConfigError::RadiusOrdering { .. })));
    }

    #[test]
    fn rejects_zero_absorption_radius() {
        let mut cfg = SimulationConfig::default();
        cfg.orbits.absorption_radius = 0.0;
        assert!(matches!(cfg.validate(), Err(ConfigError::NotPositive { .. })));
    }

    #[test]
    fn rejects_nan_and_keeps_value() {
        let mut cfg = SimulationConfig::default();
        cfg.screen.width = f64::NAN;
        assert!(matches!(cfg.validate(), Err(ConfigError::NotFinite { name: "screen.width" })));
        assert!(cfg.screen.width.is_nan());
    }

    #[test]
    fn zero_population_is_valid() {
        let mut cfg = SimulationConfig::default();
        cfg.particles.population = 0;
        assert!(cfg.validate().is_ok());
    }
}
