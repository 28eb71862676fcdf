//! # Particle Simulation
//!
//! CPU N-body gravity: particle state, the spatial grid used by the coarse
//! force model, and the per-frame integrator.

pub mod clock;
pub mod energy;
pub mod grid;
pub mod integrator;
pub mod params;
pub mod simulation;
pub mod state;

pub use clock::*;
pub use energy::*;
pub use grid::*;
pub use integrator::*;
pub use params::*;
pub use simulation::*;
pub use state::*;
