pub mod circle;
pub mod rectangle;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::math::vec2::Vec2;

pub use circle::Circle;
pub use rectangle::Rectangle;

/// Geometric shape of a body.
///
/// A circle's body position is its centre; a rectangle's body position is
/// its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    Circle(Circle),
    Rectangle(Rectangle),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Rectangle(_) => ShapeKind::Rectangle,
        }
    }

    /// Offset from the body position to the geometric centre.
    pub fn center_offset(&self) -> Vec2 {
        match self {
            Shape::Circle(_) => Vec2::ZERO,
            Shape::Rectangle(rect) => rect.size() * 0.5,
        }
    }

    /// Area presented to wind. For circles this is the diameter, a heuristic
    /// rather than a physical cross-section.
    pub fn cross_section(&self) -> f64 {
        match self {
            Shape::Circle(circle) => circle.radius * 2.0,
            Shape::Rectangle(rect) => rect.area(),
        }
    }

    /// Checks that every dimension is finite and strictly positive.
    pub(crate) fn validate(&self) -> Result<(), String> {
        match self {
            Shape::Circle(circle) => {
                if !(circle.radius.is_finite() && circle.radius > 0.0) {
                    return Err(format!("radius must be finite and positive, got {}", circle.radius));
                }
            }
            Shape::Rectangle(rect) => {
                if !(rect.width.is_finite() && rect.width > 0.0) {
                    return Err(format!("width must be finite and positive, got {}", rect.width));
                }
                if !(rect.height.is_finite() && rect.height > 0.0) {
                    return Err(format!("height must be finite and positive, got {}", rect.height));
                }
            }
        }
        Ok(())
    }
}

/// Shape tag as supplied by the host that created the visual element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Circle,
    #[serde(alias = "rect")]
    Rectangle,
}

impl FromStr for ShapeKind {
    type Err = EngineError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "circle" => Ok(ShapeKind::Circle),
            "rect" | "rectangle" => Ok(ShapeKind::Rectangle),
            _ => Err(EngineError::UnknownShapeKind(tag.to_string())),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKind::Circle => f.write_str("circle"),
            ShapeKind::Rectangle => f.write_str("rectangle"),
        }
    }
}
