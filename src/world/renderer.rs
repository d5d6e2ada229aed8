//! Outbound side of the engine: where body state goes after each step.

use crate::math::vec2::Vec2;

/// Receives the simulated state of every body once per update.
///
/// The engine never draws anything itself; hosts implement this to move
/// their visual elements. Closures of the shape `FnMut(&str, Vec2, bool)`
/// implement it directly.
pub trait Renderer {
    /// Called once per body after the step, with the body position (centre
    /// for circles, top-left corner for rectangles).
    fn apply_body_state(&mut self, id: &str, position: Vec2, in_collision: bool);

    /// Called once per registered constraint with the positions of its two
    /// bodies. Ignored by default.
    fn apply_constraint_state(&mut self, _body_a: &str, _body_b: &str, _position_a: Vec2, _position_b: Vec2) {}
}

/// Renderer that discards everything. Used for headless simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn apply_body_state(&mut self, _id: &str, _position: Vec2, _in_collision: bool) {}
}

impl<F> Renderer for F
where
    F: FnMut(&str, Vec2, bool),
{
    fn apply_body_state(&mut self, id: &str, position: Vec2, in_collision: bool) {
        self(id, position, in_collision)
    }
}
