//! Inverse-square gravity terms
//!
//! Every particle has unit mass, so a force on a particle is also its
//! acceleration. Denominators are floored, never rejected: coincident points
//! produce a bounded force along a zero direction instead of NaN.

use glam::Vec2;

/// Clamp a squared distance to at least `min_distance_squared`
#[inline]
pub fn floor_distance_squared(distance_squared: f32, min_distance_squared: f32) -> f32 {
    distance_squared.max(min_distance_squared)
}

/// Unit-strength inverse-square pull along `offset`
/// `normalize(offset) / max(|offset|², min_distance_squared)`
///
/// The gravitational constant is left out so that callers summing many terms
/// can apply it once.
#[inline]
pub fn inverse_square(offset: Vec2, min_distance_squared: f32) -> Vec2 {
    let distance_squared = floor_distance_squared(offset.length_squared(), min_distance_squared);
    offset.normalize_or_zero() / distance_squared
}

/// Acceleration of a unit mass at `position` due to a unit mass at `other`
pub fn pairwise_acceleration(
    position: Vec2,
    other: Vec2,
    gravitational_constant: f32,
    min_distance_squared: f32,
) -> Vec2 {
    inverse_square(other - position, min_distance_squared) * gravitational_constant
}

/// Force between two aggregated cells, without the gravitational constant
/// `m1 * m2 * normalize(c2 - c1) / max(|c2 - c1|², eps)`
#[inline]
pub fn cell_force(
    center: Vec2,
    mass: f32,
    other_center: Vec2,
    other_mass: f32,
    min_distance_squared: f32,
) -> Vec2 {
    inverse_square(other_center - center, min_distance_squared) * (mass * other_mass)
}

/// Pull of a cell's own mass on a particle inside it, toward the cell center
pub fn center_pull(
    position: Vec2,
    center: Vec2,
    cell_mass: f32,
    gravitational_constant: f32,
    min_distance_squared: f32,
) -> Vec2 {
    inverse_square(center - position, min_distance_squared) * (gravitational_constant * cell_mass)
}

/// Potential energy of a unit-mass pair separated by `distance_squared`
/// `-G / sqrt(max(d², eps))`
#[inline]
pub fn pair_potential(
    distance_squared: f32,
    gravitational_constant: f32,
    min_distance_squared: f32,
) -> f32 {
    -gravitational_constant / floor_distance_squared(distance_squared, min_distance_squared).sqrt()
}
