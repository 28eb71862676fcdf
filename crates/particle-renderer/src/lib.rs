//! # Particle Renderer
//!
//! Draws the simulation's positions and colors as glowing points.

pub mod error;
pub mod renderer;
pub mod view;

pub use error::*;
pub use renderer::*;
pub use view::*;
