use serde::{Deserialize, Serialize};

/// A circle anchored at its centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub radius: f64,
}

impl Circle {
    pub const DEFAULT_RADIUS: f64 = 20.0;

    pub fn new(radius: f64) -> Self {
        Self { radius }
    }
}

impl Default for Circle {
    fn default() -> Self {
        Self::new(Self::DEFAULT_RADIUS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_new() {
        let c = Circle::new(5.0);
        assert_eq!(c.radius, 5.0);
    }

    #[test]
    fn test_circle_default_radius() {
        assert_eq!(Circle::default().radius, 20.0);
    }
}
