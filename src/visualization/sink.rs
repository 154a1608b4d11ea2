//! Rendering sink interface and frame bookkeeping shared by the front-ends.
//!
//! `Scenario::present` walks the read-only state and calls into a
//! [`RenderSink`] once per anchor and once per particle. The bevy viewer
//! turns those calls into gizmos; the headless loop only counts them.

use std::time::{Duration, Instant};

use crate::simulation::states::{OrbitAnchor, Particle};

pub const WINDOW_TITLE: &str = "Particle Absorbing Screensaver";

pub trait RenderSink {
    fn begin_frame(&mut self);
    fn draw_orbit(&mut self, anchor: &OrbitAnchor);
    fn draw_particle(&mut self, particle: &Particle);
    fn end_frame(&mut self);
}

/// Alpha of the `i`-th trail point (0 = newest), fading linearly to zero
pub fn trail_alpha(i: usize, trail_length: usize) -> u8 {
    if trail_length == 0 {
        return 255;
    }
    let fade = 1.0 - i as f64 / trail_length as f64;
    (255.0 * fade.clamp(0.0, 1.0)) as u8
}

pub fn fps_title(fps: f64) -> String {
    format!("{WINDOW_TITLE} - FPS: {fps:.2}")
}

/// Frames-per-second over one-second windows
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frames: u32,
    window_start: Instant,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::starting_at(Instant::now())
    }
}

impl FpsCounter {
    pub fn starting_at(start: Instant) -> Self {
        Self { frames: 0, window_start: start }
    }

    pub fn tick(&mut self) -> Option<f64> {
        self.tick_at(Instant::now())
    }

    /// Count a frame finished at `now`; yields the rate once a second has passed
    pub fn tick_at(&mut self, now: Instant) -> Option<f64> {
        self.frames += 1;
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < Duration::from_secs(1) {
            return None;
        }
        let fps = self.frames as f64 / elapsed.as_secs_f64();
        self.frames = 0;
        self.window_start = now;
        Some(fps)
    }
}

/// Sink that only counts what it was handed
#[derive(Debug, Clone, Default)]
pub struct FrameTally {
    pub frames: u64, // frames completed
    pub orbits: usize, // counts for the last frame
    pub roaming: usize,
    pub orbiting: usize,
    pub trail_points: usize,
    open: bool,
}

impl FrameTally {
    pub fn particles(&self) -> usize {
        self.roaming + self.orbiting
    }
}

impl RenderSink for FrameTally {
    fn begin_frame(&mut self) {
        self.orbits = 0;
        self.roaming = 0;
        self.orbiting = 0;
        self.trail_points = 0;
        self.open = true;
    }

    fn draw_orbit(&mut self, _anchor: &OrbitAnchor) {
        self.orbits += 1;
    }

    fn draw_particle(&mut self, particle: &Particle) {
        if particle.is_orbiting() {
            self.orbiting += 1;
        } else {
            self.roaming += 1;
        }
        self.trail_points += particle.trail.len();
    }

    fn end_frame(&mut self) {
        if self.open {
            self.frames += 1;
            self.open = false;
        }
    }
}
