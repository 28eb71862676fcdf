//! Particle state store
//!
//! Structure-of-arrays so positions and colors can be handed to the renderer
//! as contiguous slices. All three vectors always have the same length, fixed
//! at construction.

use crate::grid::Bounds;
use crate::params::SeedPattern;
use glam::{Vec2, Vec3};
use rand::Rng;
use std::f32::consts::TAU;

pub struct ParticleState {
    pub positions: Vec<Vec2>,
    pub velocities: Vec<Vec2>,
    pub colors: Vec<Vec3>,
}

impl ParticleState {
    /// Build a state from explicit positions and velocities, all white
    pub fn from_parts(positions: Vec<Vec2>, velocities: Vec<Vec2>) -> Self {
        assert_eq!(
            positions.len(),
            velocities.len(),
            "positions and velocities must have the same length"
        );
        let colors = vec![Vec3::ONE; positions.len()];
        Self {
            positions,
            velocities,
            colors,
        }
    }

    /// Spawn `count` particles within `extent` of the origin
    pub fn seed<R: Rng + ?Sized>(
        count: usize,
        extent: f32,
        pattern: SeedPattern,
        rng: &mut R,
    ) -> Self {
        let mut positions = Vec::with_capacity(count);
        let mut velocities = Vec::with_capacity(count);

        match pattern {
            SeedPattern::Radial {
                inner_radius,
                initial_speed,
            } => {
                for _ in 0..count {
                    let distance = rng.random_range(inner_radius..extent);
                    let angle = rng.random_range(0.0..TAU);
                    let position = Vec2::from_angle(angle) * distance;
                    // Counter-clockwise orbit
                    let velocity = position.perp().normalize_or_zero() * initial_speed;
                    positions.push(position);
                    velocities.push(velocity);
                }
            }
            SeedPattern::Lattice { velocity_jitter } => {
                let side = ((count as f32).sqrt().ceil() as usize).max(1);
                let spacing = 2.0 * extent / side as f32;
                for index in 0..count {
                    let row = index / side;
                    let col = index % side;
                    positions.push(Vec2::new(
                        -extent + spacing * (col as f32 + 0.5),
                        -extent + spacing * (row as f32 + 0.5),
                    ));
                    velocities.push(Vec2::new(
                        rng.random_range(-velocity_jitter..=velocity_jitter),
                        rng.random_range(-velocity_jitter..=velocity_jitter),
                    ));
                }
            }
        }

        log::debug!("Seeded {} particles ({:?})", count, pattern);
        Self::from_parts(positions, velocities)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Bounding box over every current position
    pub fn bounds(&self) -> Bounds {
        Bounds::enclosing(&self.positions)
    }

    /// Kinetic energy of unit masses, `½ Σ |v|²`
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self
            .velocities
            .iter()
            .map(|velocity| velocity.length_squared())
            .sum::<f32>()
    }
}
