//! Per-particle transition function
//!
//! Advances one particle by exactly one tick. Touches nothing outside the
//! particle except RNG draws and, on absorption, the owning anchor's counter.

use super::params::Parameters;
use super::random::RandomSource;
use super::states::{normalize_angle, random_velocity, AnchorHandle, Motion, NVec2, Orbit, OrbitAnchor, Particle};

/// Advance `p` by one tick.
///
/// Returns `false` exactly when the particle was absorbed this tick; the
/// caller must then drop it. The anchor counter is incremented once on that
/// tick and the particle is left otherwise untouched (no trail update).
pub fn step_particle<R: RandomSource + ?Sized>(p: &mut Particle, anchors: &[OrbitAnchor], params: &Parameters, rng: &mut R) -> bool {
    match p.motion {
        Motion::Orbiting(orbit) => {
            if !step_orbiting(p, orbit, anchors, params, rng) {
                return false;
            }
        }
        Motion::Roaming { velocity } => step_roaming(p, velocity, anchors, params, rng),
    }

    p.trail.record(p.position, params.trail_length);
    true
}

fn step_orbiting<R: RandomSource + ?Sized>(p: &mut Particle, mut orbit: Orbit, anchors: &[OrbitAnchor], params: &Parameters, rng: &mut R) -> bool {
    // Escape: back to free flight, orbital math skipped this tick
    if rng.uniform01() < params.escape_probability {
        p.motion = Motion::Roaming { velocity: random_velocity(params.roam_speed, rng) };
        return true;
    }

    let Some(anchor) = anchors.get(orbit.anchor.index()) else {
        // registry built by Scenario never shrinks, treat as an escape
        p.motion = Motion::Roaming { velocity: random_velocity(params.roam_speed, rng) };
        return true;
    };

    orbit.angle = normalize_angle(orbit.angle + params.orbit_speed);
    p.position = anchor.position + orbit.radius * NVec2::new(orbit.angle.cos(), orbit.angle.sin());

    if orbit.radius < params.absorption_radius {
        anchor.record_absorption();
        return false;
    }

    // Spiral inward
    orbit.radius = (orbit.radius - params.orbit_decay).max(0.0);
    p.motion = Motion::Orbiting(orbit);
    true
}

fn step_roaming<R: RandomSource + ?Sized>(p: &mut Particle, mut velocity: NVec2, anchors: &[OrbitAnchor], params: &Parameters, rng: &mut R) {
    p.position += velocity;

    // Reflect on the post-move position; the particle may sit one tick outside
    if p.position.x < 0.0 || p.position.x >= params.width {
        velocity.x = -velocity.x;
    }
    if p.position.y < 0.0 || p.position.y >= params.height {
        velocity.y = -velocity.y;
    }
    p.motion = Motion::Roaming { velocity };

    // First eligible anchor in creation order wins
    for (i, anchor) in anchors.iter().enumerate() {
        let d = p.position - anchor.position;
        let distance = d.norm();
        if distance < params.capture_radius && rng.uniform01() < params.capture_probability {
            p.motion = Motion::Orbiting(Orbit {
                anchor: AnchorHandle(i),
                angle: normalize_angle(d.y.atan2(d.x)),
                radius: distance,
            });
            p.color = rng.uniform_color();
            break;
        }
    }
}
