use crate::objects::body::Body;

/// Gravity constant used to scale friction, independent of world gravity.
pub const FRICTION_GRAVITY: f64 = 9.8;

/// Below this speed an axis is snapped to rest instead of decelerated.
pub const REST_SPEED: f64 = 0.01;

/// Integrates the body's state forward in time using Semi-Implicit Euler.
///
/// Velocity is updated from the accumulated force first, then decayed by
/// friction on each axis, and only then used to advance the position.
pub fn integrate(body: &mut Body, dt: f64) {
    if body.fixed {
        return;
    }

    // a = F/m
    let acceleration = body.forces / body.mass;
    body.velocity += acceleration * dt;

    // Friction force is friction * m * g, so the velocity change is
    // friction * g * dt regardless of mass.
    let friction_force = body.material.friction * body.mass * FRICTION_GRAVITY;
    let friction_dv = friction_force / body.mass * dt;
    body.velocity.x = apply_friction(body.velocity.x, friction_dv);
    body.velocity.y = apply_friction(body.velocity.y, friction_dv);

    body.position += body.velocity * dt;

    body.forces.x = 0.0;
    body.forces.y = 0.0;
}

/// Decelerates a single velocity component, or stops it when it is slow.
fn apply_friction(speed: f64, friction_dv: f64) -> f64 {
    if speed.abs() > REST_SPEED {
        speed - friction_dv.copysign(speed)
    } else {
        0.0
    }
}
