//! Core state types for the particle field.
//!
//! - `OrbitAnchor`  fixed capture centre with an atomic absorbed counter
//! - `Particle`     mobile point with motion state, colour and trail
//! - `Motion`       `Roaming` (free flight) or `Orbiting` (bound to an anchor)
//!
//! Positions and velocities use `NVec2` in screen units, origin top-left.

use std::collections::VecDeque;
use std::f64::consts::TAU;
use std::sync::atomic::{AtomicU64, Ordering};

use nalgebra::Vector2;

use super::params::Parameters;
use super::random::RandomSource;

pub type NVec2 = Vector2<f64>;

/// Wrap an angle into `[0, 2π)`
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to TAU for tiny negative inputs
    if a >= TAU { 0.0 } else { a }
}

/// 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Non-owning reference to an anchor, by creation index.
/// Anchors are never removed during a run, so the index stays valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnchorHandle(pub usize);

impl AnchorHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Fixed capture centre
#[derive(Debug)]
pub struct OrbitAnchor {
    pub position: NVec2, // centre in screen units
    pub ring_radius: f64, // radius of the drawn ring, display only
    absorbed: AtomicU64, // particles absorbed so far
}

impl OrbitAnchor {
    pub fn new(position: NVec2, ring_radius: f64) -> Self {
        Self {
            position,
            ring_radius,
            absorbed: AtomicU64::new(0),
        }
    }

    pub fn absorbed_count(&self) -> u64 {
        self.absorbed.load(Ordering::Relaxed)
    }

    /// Increment the absorbed counter. Safe to call from any worker.
    pub fn record_absorption(&self) {
        self.absorbed.fetch_add(1, Ordering::Relaxed);
    }
}

/// Orbit state of a captured particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub anchor: AnchorHandle, // owning anchor
    pub angle: f64, // radians, kept in [0, 2π)
    pub radius: f64, // current orbit radius, >= 0
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    Roaming { velocity: NVec2 },
    Orbiting(Orbit),
}

/// Bounded history of past positions, most recent first
#[derive(Debug, Clone, Default)]
pub struct Trail {
    points: VecDeque<NVec2>,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend `position` and drop the oldest entries beyond `limit`
    pub fn record(&mut self, position: NVec2, limit: usize) {
        self.points.push_front(position);
        self.points.truncate(limit);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn latest(&self) -> Option<&NVec2> {
        self.points.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NVec2> {
        self.points.iter()
    }
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub position: NVec2, // screen position
    pub motion: Motion, // roaming velocity or orbit state
    pub color: Rgba, // draw colour, re-rolled on capture
    pub trail: Trail, // recent positions
}

impl Particle {
    /// A roaming particle with an empty trail
    pub fn roaming(position: NVec2, velocity: NVec2, color: Rgba) -> Self {
        Self {
            position,
            motion: Motion::Roaming { velocity },
            color,
            trail: Trail::new(),
        }
    }

    /// Fresh particle anywhere on screen with a random roaming velocity
    pub fn spawn<R: RandomSource + ?Sized>(params: &Parameters, rng: &mut R) -> Self {
        let position = NVec2::new(rng.uniform01() * params.width, rng.uniform01() * params.height);
        let velocity = random_velocity(params.roam_speed, rng);
        let color = rng.uniform_color();
        Self::roaming(position, velocity, color)
    }

    pub fn is_orbiting(&self) -> bool {
        matches!(self.motion, Motion::Orbiting(_))
    }

    pub fn velocity(&self) -> Option<NVec2> {
        match self.motion {
            Motion::Roaming { velocity } => Some(velocity),
            Motion::Orbiting(_) => None,
        }
    }

    pub fn orbit(&self) -> Option<&Orbit> {
        match &self.motion {
            Motion::Orbiting(orbit) => Some(orbit),
            Motion::Roaming { .. } => None,
        }
    }
}

/// Velocity uniform in [-speed, speed] on each axis
pub fn random_velocity<R: RandomSource + ?Sized>(speed: f64, rng: &mut R) -> NVec2 {
    let dx = speed * (rng.uniform01() * 2.0 - 1.0);
    let dy = speed * (rng.uniform01() * 2.0 - 1.0);
    NVec2::new(dx, dy)
}
