//! Field effects: explosions, wind and point attraction.
//!
//! Each effect has a pure `*_force` function that computes the force on one
//! body and an `apply_*` function that accumulates it onto every non-fixed
//! body of a slice. Forces only land in the accumulators; nothing moves
//! until the next integration step.

use crate::math::vec2::Vec2;
use crate::objects::body::Body;

/// Push direction for a body sitting exactly at an explosion centre (screen up).
pub const EXPLOSION_FALLBACK_DIRECTION: Vec2 = Vec2::new(0.0, -1.0);

/// Minimum attraction distance used when the host does not supply one.
pub const DEFAULT_ATTRACTION_MIN_DISTANCE: f64 = 10.0;

/// Force from an explosion at `center` on a body at `position`.
///
/// Falls off linearly from `magnitude` at the centre to zero at `radius`;
/// bodies at or beyond the radius are unaffected.
pub fn explosion_force(position: Vec2, center: Vec2, magnitude: f64, radius: f64) -> Option<Vec2> {
    let offset = position - center;
    let distance = offset.magnitude();
    if distance >= radius {
        return None;
    }

    let direction = offset.try_normalize().unwrap_or(EXPLOSION_FALLBACK_DIRECTION);
    let falloff = 1.0 - distance / radius;
    Some(direction * (magnitude * falloff))
}

/// Wind force scaled by the body's cross-section.
pub fn wind_force(body: &Body, direction: Vec2, strength: f64) -> Vec2 {
    direction * (strength * body.shape.cross_section())
}

/// Inverse-square pull of `body` toward `point`.
///
/// Bodies closer than `min_distance` (or exactly on the point) are skipped
/// to avoid the singularity.
pub fn attraction_force(body: &Body, point: Vec2, strength: f64, min_distance: f64) -> Option<Vec2> {
    let offset = point - body.position;
    let distance = offset.magnitude();
    if distance < min_distance || distance == 0.0 {
        return None;
    }

    let magnitude = strength * body.mass / (distance * distance);
    Some(offset / distance * magnitude)
}

/// Returns how many bodies received a force.
pub fn apply_explosion(bodies: &mut [Body], center: Vec2, magnitude: f64, radius: f64) -> usize {
    let mut affected = 0;
    for body in bodies.iter_mut().filter(|b| !b.fixed) {
        if let Some(force) = explosion_force(body.position, center, magnitude, radius) {
            body.apply_force(force);
            affected += 1;
        }
    }
    affected
}

pub fn apply_wind(bodies: &mut [Body], direction: Vec2, strength: f64) {
    for body in bodies.iter_mut().filter(|b| !b.fixed) {
        let force = wind_force(body, direction, strength);
        body.apply_force(force);
    }
}

/// Returns how many bodies received a force.
pub fn apply_attraction(bodies: &mut [Body], point: Vec2, strength: f64, min_distance: f64) -> usize {
    let mut affected = 0;
    for body in bodies.iter_mut().filter(|b| !b.fixed) {
        if let Some(force) = attraction_force(body, point, strength, min_distance) {
            body.apply_force(force);
            affected += 1;
        }
    }
    affected
}
