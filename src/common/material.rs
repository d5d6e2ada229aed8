//! Defines physical material properties.

use serde::{Deserialize, Serialize};

/// Surface properties of a body that affect collisions and sliding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Coefficient of restitution (bounciness). Range [0, 1].
    /// 0 = perfectly inelastic (no bounce), 1 = perfectly elastic.
    pub restitution: f64,
    /// Velocity decay coefficient applied during integration. Range [0, 1].
    pub friction: f64,
}

impl Material {
    pub const DEFAULT_RESTITUTION: f64 = 0.8;
    pub const DEFAULT_FRICTION: f64 = 0.1;

    /// Creates a new material; both coefficients are clamped into [0, 1].
    pub fn new(restitution: f64, friction: f64) -> Self {
        Material {
            restitution: restitution.clamp(0.0, 1.0),
            friction: friction.clamp(0.0, 1.0),
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Material {
            restitution: Self::DEFAULT_RESTITUTION,
            friction: Self::DEFAULT_FRICTION,
        }
    }
}
