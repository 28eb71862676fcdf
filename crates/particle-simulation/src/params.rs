//! Simulation parameters
//!
//! Everything here is fixed at compile time; the two presets reproduce the two
//! flavors of the simulation (a coarse-grid galaxy and a direct-sum lattice).

use crate::grid::GridShape;
use particle_physics::{
    Coloring, EdgePolicy, GALAXY_G, GALAXY_INITIAL_SPEED, GALAXY_MIN_DISTANCE_SQUARED, HEAT_SCALE,
    LATTICE_G, LATTICE_MIN_DISTANCE_SQUARED, LATTICE_VELOCITY_JITTER, SPAWN_EXTENT,
    SPAWN_INNER_RADIUS, TIME_SPEED,
};

/// How accelerations are computed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Every particle against every other particle, O(n²)
    Direct,
    /// Particles binned into a grid, cells against cells, O(n + cells²)
    Grid,
}

/// Order of the two semi-implicit Euler updates within a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationOrder {
    /// `v += a·dt`, then `x += v·dt`
    VelocityFirst,
    /// `x += v·dt` with the previous velocity, then `v += a·dt`
    PositionFirst,
}

/// Initial arrangement of the particles
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeedPattern {
    /// Random angle and radius inside a disk, moving tangentially
    Radial {
        inner_radius: f32,
        initial_speed: f32,
    },
    /// Regular square lattice, each particle with a small random velocity
    Lattice { velocity_jitter: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParams {
    pub particle_count: usize,
    pub strategy: Strategy,
    /// Only used by [`Strategy::Grid`]
    pub grid: GridShape,
    pub gravitational_constant: f32,
    /// Floor applied to every distance-squared denominator
    pub min_distance_squared: f32,
    /// Simulated seconds per wall-clock second
    pub time_speed: f32,
    /// Half-width of the spawn area
    pub spawn_extent: f32,
    pub seed_pattern: SeedPattern,
    pub edge_policy: EdgePolicy,
    pub integration_order: IntegrationOrder,
    pub coloring: Coloring,
    /// Rendered particle radius in normalized device units
    pub point_size: f32,
    /// Frames between energy log lines, 0 disables the report
    pub energy_report_interval: u64,
}

impl SimulationParams {
    /// 100k particles on a 30×30 grid, wrapping at the edges
    pub fn galaxy() -> Self {
        Self {
            particle_count: 100_000,
            strategy: Strategy::Grid,
            grid: GridShape::new(30, 30),
            gravitational_constant: GALAXY_G,
            min_distance_squared: GALAXY_MIN_DISTANCE_SQUARED,
            time_speed: TIME_SPEED,
            spawn_extent: SPAWN_EXTENT,
            seed_pattern: SeedPattern::Radial {
                inner_radius: SPAWN_INNER_RADIUS,
                initial_speed: GALAXY_INITIAL_SPEED,
            },
            edge_policy: EdgePolicy::Wrap,
            integration_order: IntegrationOrder::VelocityFirst,
            coloring: Coloring::White,
            point_size: 0.01,
            energy_report_interval: 300,
        }
    }

    /// A few thousand particles summed pairwise, clamped at the edges
    pub fn lattice() -> Self {
        Self {
            particle_count: 2048,
            strategy: Strategy::Direct,
            grid: GridShape::new(30, 30),
            gravitational_constant: LATTICE_G,
            min_distance_squared: LATTICE_MIN_DISTANCE_SQUARED,
            time_speed: TIME_SPEED,
            spawn_extent: SPAWN_EXTENT,
            seed_pattern: SeedPattern::Lattice {
                velocity_jitter: LATTICE_VELOCITY_JITTER,
            },
            edge_policy: EdgePolicy::Clamp,
            integration_order: IntegrationOrder::PositionFirst,
            coloring: Coloring::Heat { scale: HEAT_SCALE },
            point_size: 0.008,
            energy_report_interval: 120,
        }
    }
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self::galaxy()
    }
}
