use crate::math::vec2::Vec2;
use crate::objects::body::Body;
use crate::shapes::{Circle, Shape};

use super::aabb::AABB;

/// Tests two bodies for overlap, dispatching on the pair of shapes.
pub fn check_collision(body_a: &Body, body_b: &Body) -> bool {
    match (&body_a.shape, &body_b.shape) {
        (Shape::Circle(a), Shape::Circle(b)) => {
            check_circle_circle(body_a.position, a, body_b.position, b)
        }
        (Shape::Rectangle(_), Shape::Rectangle(_)) => check_rect_rect(&body_a.aabb(), &body_b.aabb()),
        (Shape::Circle(circle), Shape::Rectangle(_)) => {
            check_circle_rect(body_a.position, circle, &body_b.aabb())
        }
        (Shape::Rectangle(_), Shape::Circle(circle)) => {
            check_circle_rect(body_b.position, circle, &body_a.aabb())
        }
    }
}

/// Two circles collide when their centres are closer than the sum of radii.
/// Exactly tangent circles do not collide.
pub fn check_circle_circle(center_a: Vec2, circle_a: &Circle, center_b: Vec2, circle_b: &Circle) -> bool {
    center_a.distance(center_b) < circle_a.radius + circle_b.radius
}

/// Inclusive AABB test for two rectangles, so shared edges collide.
pub fn check_rect_rect(box_a: &AABB, box_b: &AABB) -> bool {
    box_a.intersects(box_b)
}

/// Projects the circle centre onto the rectangle and compares the squared
/// distance to that closest point against the squared radius.
pub fn check_circle_rect(center: Vec2, circle: &Circle, bounds: &AABB) -> bool {
    let closest = bounds.closest_point(center);
    center.distance_squared(closest) < circle.radius * circle.radius
}
