//! Frame-to-terminal rendering.

pub mod renderer;

pub use renderer::DiffRenderer;
