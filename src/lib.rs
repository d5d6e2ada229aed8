//! A small real-time 2D rigid-body engine for driving visual elements.
//!
//! Bodies are circles or axis-aligned rectangles keyed by an opaque id. The
//! host calls [`Engine::update`] once per frame and receives the new
//! position of every body through a [`Renderer`].

pub mod collision;
pub mod common;
pub mod config;
pub mod constraints;
pub mod error;
pub mod forces;
pub mod integration;
pub mod math;
pub mod objects;
pub mod shapes;
pub mod world;

// Re-export key types for easier use
pub use common::Material;
pub use config::{BodyOptions, BodySpec, EngineConfig, SceneConfig, SpringSpec};
pub use constraints::{Constraint, Spring};
pub use error::{EngineError, Result};
pub use math::vec2::Vec2;
pub use objects::body::Body;
pub use shapes::{Circle, Rectangle, Shape, ShapeKind};
pub use world::{Bounds, Engine, NullRenderer, Renderer};
