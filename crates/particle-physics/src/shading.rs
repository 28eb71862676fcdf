//! Per-particle color derivation

use glam::{Vec2, Vec3};

/// How particle colors are derived each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coloring {
    /// Every particle stays opaque white
    White,
    /// Grayscale brightness proportional to speed, saturating at `1 / scale`
    Heat { scale: f32 },
}

impl Coloring {
    pub fn color(self, velocity: Vec2) -> Vec3 {
        match self {
            Coloring::White => Vec3::ONE,
            Coloring::Heat { scale } => heat(velocity, scale),
        }
    }
}

/// `clamp(scale * |velocity|, 0, 1)` on all three channels
pub fn heat(velocity: Vec2, scale: f32) -> Vec3 {
    Vec3::splat((scale * velocity.length()).clamp(0.0, 1.0))
}
