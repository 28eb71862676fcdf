//! # Particle Physics
//!
//! Inverse-square gravity between unit-mass particles on a bounded 2D domain,
//! plus the edge and color rules the integrator applies every frame.

pub mod constants;
pub mod domain;
pub mod forces;
pub mod shading;

pub use constants::*;
pub use domain::*;
pub use forces::*;
pub use shading::*;
