pub mod bounds;
pub mod engine;
pub mod renderer;

pub use bounds::Bounds;
pub use engine::Engine;
pub use renderer::{NullRenderer, Renderer};
