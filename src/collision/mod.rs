pub mod aabb;
pub mod detection;
pub mod resolution;

// Re-export key types
pub use aabb::AABB;
pub use detection::check_collision;
pub use resolution::resolve_collision;
