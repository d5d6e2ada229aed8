use crate::collision::{self, AABB};
use crate::common::Material;
use crate::error::{EngineError, Result};
use crate::integration::integrator;
use crate::math::vec2::Vec2;
use crate::shapes::Shape;

/// A simulated body mirroring one visual element of the host.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Opaque id of the visual element this body drives.
    pub id: String,

    // Geometry
    pub shape: Shape,
    pub material: Material,

    // Primary state
    /// Centre for circles, top-left corner for rectangles.
    pub position: Vec2,
    pub velocity: Vec2,

    /// Force accumulator, cleared at the end of every integration step.
    pub forces: Vec2,

    pub mass: f64,
    /// Fixed bodies never move but still act as collision targets.
    pub fixed: bool,

    /// Set when the body touched any other body during the last step.
    pub in_collision: bool,
}

impl Body {
    /// Creates a resting, non-fixed body with the default material.
    pub fn new(id: impl Into<String>, mass: f64, shape: Shape, position: Vec2) -> Self {
        Self {
            id: id.into(),
            shape,
            material: Material::default(),
            position,
            velocity: Vec2::ZERO,
            forces: Vec2::ZERO,
            mass,
            fixed: false,
            in_collision: false,
        }
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn set_fixed(&mut self, fixed: bool) {
        self.fixed = fixed;
    }

    /// Inverse mass as seen by the collision resolver: 0 for fixed bodies.
    pub fn inv_mass(&self) -> f64 {
        if self.fixed {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    /// Adds `force` to the accumulator. Ignored for fixed bodies.
    pub fn apply_force(&mut self, force: Vec2) {
        if !self.fixed {
            self.forces += force;
        }
    }

    /// Advances this body by `dt` seconds.
    pub fn integrate(&mut self, dt: f64) {
        integrator::integrate(self, dt);
    }

    /// Distance between the two body positions (not the geometric centres).
    pub fn distance_to(&self, other: &Body) -> f64 {
        self.position.distance(other.position)
    }

    /// Geometric centre in world coordinates.
    pub fn center(&self) -> Vec2 {
        self.position + self.shape.center_offset()
    }

    /// World-space bounding box of the body.
    pub fn aabb(&self) -> AABB {
        match &self.shape {
            Shape::Circle(circle) => {
                let r = Vec2::new(circle.radius, circle.radius);
                AABB::new(self.position - r, self.position + r)
            }
            Shape::Rectangle(rect) => AABB::new(self.position, self.position + rect.size()),
        }
    }

    pub fn check_collision(&self, other: &Body) -> bool {
        collision::check_collision(self, other)
    }

    pub fn resolve_collision(&mut self, other: &mut Body) {
        collision::resolve_collision(self, other);
    }

    /// Rejects values that would turn the simulation into NaN soup.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| EngineError::InvalidBodyConfiguration {
            id: self.id.clone(),
            reason,
        };

        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(invalid(format!("mass must be finite and positive, got {}", self.mass)));
        }
        self.shape.validate().map_err(invalid)?;
        if !self.position.is_finite() {
            return Err(invalid(format!("position must be finite, got {:?}", self.position)));
        }
        if !self.velocity.is_finite() {
            return Err(invalid(format!("velocity must be finite, got {:?}", self.velocity)));
        }
        // Material::new clamps, but NaN survives clamping
        if !(self.material.restitution.is_finite() && self.material.friction.is_finite()) {
            return Err(invalid(format!("material must be finite, got {:?}", self.material)));
        }
        Ok(())
    }
}
