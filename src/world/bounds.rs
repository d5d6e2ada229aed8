use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::math::vec2::Vec2;
use crate::objects::body::Body;
use crate::shapes::Shape;

/// Axis-aligned world rectangle that keeps bodies on screen. `y` grows
/// downward, so `max_y` is the floor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn validate(&self) -> Result<()> {
        let finite = [self.min_x, self.min_y, self.max_x, self.max_y]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(EngineError::InvalidConfiguration(format!(
                "bounds must be finite, got {:?}",
                self
            )));
        }
        if self.min_x >= self.max_x || self.min_y >= self.max_y {
            return Err(EngineError::InvalidConfiguration(format!(
                "bounds must satisfy min < max on both axes, got {:?}",
                self
            )));
        }
        Ok(())
    }

    /// Pushes a body that crossed any of the four planes back inside and
    /// reflects the matching velocity component, scaled by the body's
    /// restitution. Each plane is handled independently.
    ///
    /// Returns `true` if any plane was hit. Fixed bodies are left alone.
    pub fn clamp_body(&self, body: &mut Body) -> bool {
        if body.fixed {
            return false;
        }

        // Offsets from the body position to its left/top and right/bottom edges.
        let (near, far) = match &body.shape {
            Shape::Circle(circle) => {
                let r = Vec2::new(circle.radius, circle.radius);
                (-r, r)
            }
            Shape::Rectangle(rect) => (Vec2::ZERO, rect.size()),
        };
        let restitution = body.material.restitution;
        let mut hit = false;

        // Floor
        if body.position.y + far.y > self.max_y {
            body.position.y = self.max_y - far.y;
            body.velocity.y = -body.velocity.y * restitution;
            hit = true;
        }
        // Ceiling
        if body.position.y + near.y < self.min_y {
            body.position.y = self.min_y - near.y;
            body.velocity.y = -body.velocity.y * restitution;
            hit = true;
        }
        // Right wall
        if body.position.x + far.x > self.max_x {
            body.position.x = self.max_x - far.x;
            body.velocity.x = -body.velocity.x * restitution;
            hit = true;
        }
        // Left wall
        if body.position.x + near.x < self.min_x {
            body.position.x = self.min_x - near.x;
            body.velocity.x = -body.velocity.x * restitution;
            hit = true;
        }

        hit
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(0.0, 0.0, 800.0, 600.0)
    }
}
