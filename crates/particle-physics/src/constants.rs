//! Physical constants for the gravity simulation
//!
//! Units are arbitrary: the simulation domain is the square `[-1, 1]²` in
//! normalized device coordinates and every particle carries unit mass.

/// Lower edge of the simulation domain on both axes
pub const DOMAIN_MIN: f32 = -1.0;

/// Upper edge of the simulation domain on both axes
pub const DOMAIN_MAX: f32 = 1.0;

/// Gravitational constant for the grid-coarsened galaxy.
/// Cell masses are particle counts, so this is tiny.
pub const GALAXY_G: f32 = 5e-11;

/// Distance-squared floor for cell/cell and particle/cell interactions
pub const GALAXY_MIN_DISTANCE_SQUARED: f32 = 1e-6;

/// Orbital speed given to every particle of the radial seed
pub const GALAXY_INITIAL_SPEED: f32 = 3e-2;

/// Gravitational constant for the direct pairwise lattice
pub const LATTICE_G: f32 = 1e-5;

/// Distance-squared floor for direct particle/particle interactions.
/// Bounds a single pair's acceleration at `LATTICE_G / LATTICE_MIN_DISTANCE_SQUARED`.
pub const LATTICE_MIN_DISTANCE_SQUARED: f32 = 1e-7;

/// Maximum magnitude of the random velocity given per lattice cell
pub const LATTICE_VELOCITY_JITTER: f32 = 1e-2;

/// Speed-to-brightness factor for heat coloring.
/// Particles at speed `1 / HEAT_SCALE` or faster render fully white.
pub const HEAT_SCALE: f32 = 5.0;

/// Half-width of the square (or radius of the disk) particles spawn in
pub const SPAWN_EXTENT: f32 = 0.9;

/// Inner radius of the radial seed, keeps the center from being crowded
pub const SPAWN_INNER_RADIUS: f32 = 0.1;

/// Multiplier from wall-clock seconds to simulated seconds
pub const TIME_SPEED: f32 = 1.0;
