//! WebGPU rendering module
//!
//! Immediate-mode triangle renderer: each frame the scene is rebuilt as a
//! vertex list from the current game state and drawn with a single pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
