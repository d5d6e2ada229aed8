use serde::{Deserialize, Serialize};

use crate::math::vec2::Vec2;

/// An axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub const DEFAULT_SIZE: f64 = 40.0;

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Offset from the top-left corner to the far (bottom-right) corner.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

impl Default for Rectangle {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SIZE, Self::DEFAULT_SIZE)
    }
}
