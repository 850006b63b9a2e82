//! WebGPU rendering module
//!
//! The range is tessellated on the CPU into one triangle list per frame
//! (`scene`) and drawn with a single flat-color pipeline (`pipeline`).

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;
