use tracing::trace;

use crate::math::vec2::Vec2;
use crate::objects::body::Body;

/// Normal used when both centres coincide and no direction can be derived.
pub const DEFAULT_NORMAL: Vec2 = Vec2::new(0.0, 1.0);

/// Distance each movable body is pushed apart after an impulse. A body
/// colliding with a fixed one takes the whole correction (twice this).
pub const SEPARATION: f64 = 0.01;

/// Applies an impulse pair along the normal from `body_a` to `body_b`,
/// then nudges the bodies apart.
///
/// Nothing happens when both bodies are fixed or when they are already
/// separating. Fixed bodies have zero inverse mass, so they absorb the
/// impulse without moving.
pub fn resolve_collision(body_a: &mut Body, body_b: &mut Body) {
    if body_a.fixed && body_b.fixed {
        return;
    }

    let normal = (body_b.center() - body_a.center())
        .try_normalize()
        .unwrap_or(DEFAULT_NORMAL);

    let relative_velocity = body_b.velocity - body_a.velocity;
    let velocity_along_normal = relative_velocity.dot(normal);

    // Already moving apart
    if velocity_along_normal > 0.0 {
        return;
    }

    let e = body_a.material.restitution.min(body_b.material.restitution);
    let inv_mass_a = body_a.inv_mass();
    let inv_mass_b = body_b.inv_mass();

    let j = -(1.0 + e) * velocity_along_normal / (inv_mass_a + inv_mass_b);
    let impulse = normal * j;

    body_a.velocity -= impulse * inv_mass_a;
    body_b.velocity += impulse * inv_mass_b;

    let separation = if body_a.fixed || body_b.fixed {
        SEPARATION * 2.0
    } else {
        SEPARATION
    };
    if !body_a.fixed {
        body_a.position -= normal * separation;
    }
    if !body_b.fixed {
        body_b.position += normal * separation;
    }

    trace!(
        a = %body_a.id,
        b = %body_b.id,
        j,
        restitution = e,
        "resolved collision"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Material;
    use crate::shapes::{Circle, Rectangle, Shape};
    const EPSILON: f64 = 1e-9;

    fn ball(id: &str, x: f64, vx: f64, restitution: f64) -> Body {
        Body::new(id, 1.0, Shape::Circle(Circle::new(1.0)), Vec2::new(x, 0.0))
            .with_velocity(Vec2::new(vx, 0.0))
            .with_material(Material::new(restitution, 0.0))
    }

    #[test]
    fn test_resolve_head_on_elastic() {
        let mut a = ball("a", -0.9, 10.0, 1.0);
        let mut b = ball("b", 0.9, -10.0, 1.0);
        let before = (b.velocity - a.velocity).magnitude();

        resolve_collision(&mut a, &mut b);

        // j = -(1 + 1) * (-20) / 2 = 20
        assert!((a.velocity.x - -10.0).abs() < EPSILON);
        assert!((b.velocity.x - 10.0).abs() < EPSILON);
        let after = (b.velocity - a.velocity).magnitude();
        assert!((before - after).abs() < EPSILON);
    }

    #[test]
    fn test_resolve_uses_min_restitution() {
        let mut a = ball("a", -0.9, 10.0, 0.9);
        let mut b = ball("b", 0.9, -10.0, 0.2);

        resolve_collision(&mut a, &mut b);

        // j = -(1.2) * (-20) / 2 = 12
        assert!((a.velocity.x - -2.0).abs() < EPSILON);
        assert!((b.velocity.x - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_resolve_separates_positions() {
        let mut a = ball("a", -0.5, 1.0, 0.5);
        let mut b = ball("b", 0.5, -1.0, 0.5);

        resolve_collision(&mut a, &mut b);

        assert!((a.position.x - -0.51).abs() < EPSILON);
        assert!((b.position.x - 0.51).abs() < EPSILON);
    }

    #[test]
    fn test_resolve_skips_separating_bodies() {
        let mut a = ball("a", -0.5, -3.0, 1.0);
        let mut b = ball("b", 0.5, 3.0, 1.0);
        let (a0, b0) = (a.clone(), b.clone());

        resolve_collision(&mut a, &mut b);

        assert_eq!(a, a0);
        assert_eq!(b, b0);
    }

    #[test]
    fn test_resolve_against_fixed_body() {
        let mut moving = ball("m", -0.5, 5.0, 1.0);
        let mut wall = ball("w", 0.5, 0.0, 1.0);
        wall.set_fixed(true);
        let wall_before = wall.clone();

        resolve_collision(&mut moving, &mut wall);

        // j = -(2) * (-5) / (1 + 0) = 10, all applied to the movable body
        assert!((moving.velocity.x - -5.0).abs() < EPSILON);
        assert!((moving.position.x - -0.52).abs() < EPSILON);
        assert_eq!(wall, wall_before);
    }

    #[test]
    fn test_resolve_fixed_first_argument() {
        let mut wall = ball("w", -0.5, 0.0, 1.0);
        wall.set_fixed(true);
        let mut moving = ball("m", 0.5, -5.0, 1.0);

        resolve_collision(&mut wall, &mut moving);

        assert!((moving.velocity.x - 5.0).abs() < EPSILON);
        assert!((moving.position.x - 0.52).abs() < EPSILON);
        assert_eq!(wall.velocity, Vec2::ZERO);
        assert_eq!(wall.position, Vec2::new(-0.5, 0.0));
    }

    #[test]
    fn test_resolve_both_fixed_is_noop() {
        let mut a = ball("a", -0.5, 1.0, 1.0);
        let mut b = ball("b", 0.5, -1.0, 1.0);
        a.set_fixed(true);
        b.set_fixed(true);
        let (a0, b0) = (a.clone(), b.clone());

        resolve_collision(&mut a, &mut b);

        assert_eq!(a, a0);
        assert_eq!(b, b0);
    }

    #[test]
    fn test_resolve_coincident_centres_use_default_normal() {
        let mut a = ball("a", 0.0, 0.0, 1.0);
        let mut b = ball("b", 0.0, 0.0, 1.0);
        a.velocity = Vec2::new(0.0, 2.0);

        resolve_collision(&mut a, &mut b);

        // Normal (0, 1): relative normal velocity -2, j = 2
        assert!((a.velocity.y - 0.0).abs() < EPSILON);
        assert!((b.velocity.y - 2.0).abs() < EPSILON);
        assert!((a.position.y - -0.01).abs() < EPSILON);
        assert!((b.position.y - 0.01).abs() < EPSILON);
    }

    #[test]
    fn test_resolve_rectangle_normal_uses_centre() {
        // Ball resting on top of a wide floor: the normal must point down
        // even though the floor's top-left corner is far to the left.
        let mut ball = Body::new("ball", 1.0, Shape::Circle(Circle::new(20.0)), Vec2::new(400.0, 535.0))
            .with_velocity(Vec2::new(0.0, 10.0))
            .with_material(Material::new(0.5, 0.0));
        let mut floor = Body::new(
            "floor",
            100.0,
            Shape::Rectangle(Rectangle::new(800.0, 50.0)),
            Vec2::new(0.0, 550.0),
        );
        floor.set_fixed(true);

        resolve_collision(&mut ball, &mut floor);

        assert!(ball.velocity.x.abs() < EPSILON);
        assert!((ball.velocity.y - -5.0).abs() < EPSILON);
    }
}
