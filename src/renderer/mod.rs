//! WebGPU rendering module
//!
//! The scene is assembled on the CPU as a flat triangle list in canvas pixels;
//! score text is handed to the page HUD.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{Label, Scene, build};
pub use vertex::Vertex;
