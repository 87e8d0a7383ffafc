//! Commit chain graphs and their rendering.

pub mod chain;
pub mod dot;
pub mod render;

pub use chain::{build_chain, Edge, GraphDescription, Node};
pub use dot::{to_dot, DotStyle};
pub use render::{image_path, Cleanup, RenderOutput, Renderer};
