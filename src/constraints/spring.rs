use serde::{Deserialize, Serialize};
use tracing::trace;

use super::Constraint;
use crate::objects::body::Body;

/// A damped Hookean spring between two bodies, attached at their positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    /// Id of the first body.
    pub body_a: String,
    /// Id of the second body.
    pub body_b: String,
    pub stiffness: f64,
    /// Distance at which the spring exerts no elastic force.
    pub rest_length: f64,
    pub damping: f64,
}

impl Spring {
    pub const DEFAULT_STIFFNESS: f64 = 0.5;
    pub const DEFAULT_REST_LENGTH: f64 = 100.0;
    pub const DEFAULT_DAMPING: f64 = 0.1;

    pub fn new(
        body_a: impl Into<String>,
        body_b: impl Into<String>,
        stiffness: f64,
        rest_length: f64,
        damping: f64,
    ) -> Self {
        Self {
            body_a: body_a.into(),
            body_b: body_b.into(),
            stiffness,
            rest_length,
            damping,
        }
    }

    /// Spring with the default stiffness, rest length and damping.
    pub fn with_defaults(body_a: impl Into<String>, body_b: impl Into<String>) -> Self {
        Self::new(
            body_a,
            body_b,
            Self::DEFAULT_STIFFNESS,
            Self::DEFAULT_REST_LENGTH,
            Self::DEFAULT_DAMPING,
        )
    }
}

impl Constraint for Spring {
    /// Pulls the bodies together when stretched and apart when compressed.
    /// Positive force means tension; body A is pushed along the A→B
    /// direction by `force` and body B the opposite way.
    fn apply(&self, bodies: &mut [Body]) {
        let Some((body_a, body_b)) = super::body_pair_mut(bodies, &self.body_a, &self.body_b) else {
            return;
        };

        let delta = body_b.position - body_a.position;
        let distance = delta.magnitude();
        if distance == 0.0 {
            return;
        }
        let direction = delta / distance;

        let stretch = distance - self.rest_length;
        let closing_speed = (body_b.velocity - body_a.velocity).dot(direction);
        let force = self.stiffness * stretch - self.damping * closing_speed;

        body_a.apply_force(direction * force);
        body_b.apply_force(direction * -force);

        trace!(a = %self.body_a, b = %self.body_b, distance, force, "applied spring");
    }

    fn bodies(&self) -> (&str, &str) {
        (&self.body_a, &self.body_b)
    }
}
