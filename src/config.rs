//! Serde-deserialisable configuration for engines and whole scenes.
//!
//! Every field has a default, so partial JSON documents are accepted:
//!
//! ```json
//! {
//!   "engine": { "gravity": { "x": 0.0, "y": 98.0 } },
//!   "bodies": [
//!     { "id": "floor", "kind": "rect", "position": { "x": 0.0, "y": 550.0 },
//!       "width": 800.0, "height": 50.0, "fixed": true },
//!     { "id": "ball", "kind": "circle", "position": { "x": 400.0, "y": 100.0 },
//!       "radius": 20.0, "restitution": 0.6 }
//!   ],
//!   "springs": [ { "body_a": "ball", "body_b": "floor", "rest_length": 150.0 } ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::common::Material;
use crate::constraints::Spring;
use crate::error::{EngineError, Result};
use crate::math::vec2::Vec2;
use crate::shapes::{Circle, Rectangle, Shape, ShapeKind};
use crate::world::bounds::Bounds;

/// Step used when `update` runs without an explicit dt and no previous
/// frame time is known.
pub const DEFAULT_DT: f64 = 1.0 / 60.0;

/// Upper bound on a wall-clock derived dt.
pub const MAX_DT: f64 = 1.0 / 30.0;

pub const DEFAULT_GRAVITY: Vec2 = Vec2::new(0.0, 9.8);

/// Global engine options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Acceleration applied to every non-fixed body (force per unit mass).
    pub gravity: Vec2,
    pub bounds: Bounds,
    pub default_dt: f64,
    pub max_dt: f64,
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.gravity.is_finite() {
            return Err(EngineError::InvalidConfiguration(format!(
                "gravity must be finite, got {:?}",
                self.gravity
            )));
        }
        self.bounds.validate()?;
        for (name, dt) in [("default_dt", self.default_dt), ("max_dt", self.max_dt)] {
            if !(dt.is_finite() && dt > 0.0) {
                return Err(EngineError::InvalidConfiguration(format!(
                    "{name} must be finite and positive, got {dt}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            bounds: Bounds::default(),
            default_dt: DEFAULT_DT,
            max_dt: MAX_DT,
        }
    }
}

/// Optional per-body parameters. Only the dimension matching the shape kind
/// is used (`radius` for circles, `width`/`height` for rectangles).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyOptions {
    pub mass: f64,
    pub velocity: Vec2,
    pub restitution: f64,
    pub friction: f64,
    pub radius: f64,
    pub width: f64,
    pub height: f64,
    pub fixed: bool,
}

impl BodyOptions {
    pub fn shape_for(&self, kind: ShapeKind) -> Shape {
        match kind {
            ShapeKind::Circle => Shape::Circle(Circle::new(self.radius)),
            ShapeKind::Rectangle => Shape::Rectangle(Rectangle::new(self.width, self.height)),
        }
    }

    pub fn material(&self) -> Material {
        Material::new(self.restitution, self.friction)
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_material(mut self, restitution: f64, friction: f64) -> Self {
        self.restitution = restitution;
        self.friction = friction;
        self
    }

    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }
}

impl Default for BodyOptions {
    fn default() -> Self {
        let material = Material::default();
        Self {
            mass: 1.0,
            velocity: Vec2::ZERO,
            restitution: material.restitution,
            friction: material.friction,
            radius: Circle::default().radius,
            width: Rectangle::default().width,
            height: Rectangle::default().height,
            fixed: false,
        }
    }
}

/// One body of a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    pub id: String,
    pub kind: ShapeKind,
    #[serde(default)]
    pub position: Vec2,
    #[serde(flatten)]
    pub options: BodyOptions,
}

/// A spring between two scene bodies. Missing coefficients take the
/// `Spring` defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpringSpec {
    pub body_a: String,
    pub body_b: String,
    #[serde(default = "default_stiffness")]
    pub stiffness: f64,
    #[serde(default = "default_rest_length")]
    pub rest_length: f64,
    #[serde(default = "default_damping")]
    pub damping: f64,
}

fn default_stiffness() -> f64 {
    Spring::DEFAULT_STIFFNESS
}

fn default_rest_length() -> f64 {
    Spring::DEFAULT_REST_LENGTH
}

fn default_damping() -> f64 {
    Spring::DEFAULT_DAMPING
}

impl SpringSpec {
    pub fn to_spring(&self) -> Spring {
        Spring::new(
            self.body_a.clone(),
            self.body_b.clone(),
            self.stiffness,
            self.rest_length,
            self.damping,
        )
    }
}

/// Top-level scene document: engine options, bodies and springs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub engine: EngineConfig,
    pub bodies: Vec<BodySpec>,
    pub springs: Vec<SpringSpec>,
}

impl SceneConfig {
    /// Parses a scene. Body values are validated later, when the scene is
    /// turned into an engine.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let scene: Self = serde_json::from_str(json)?;
        scene.engine.validate()?;
        Ok(scene)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
