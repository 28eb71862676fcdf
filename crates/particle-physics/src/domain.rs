//! Domain edge handling

use glam::Vec2;

use crate::constants::{DOMAIN_MAX, DOMAIN_MIN};

/// Wrap `x` into `[bottom, top)` as if the interval were a circle
pub fn repeat(x: f32, bottom: f32, top: f32) -> f32 {
    if x >= bottom && x < top {
        return x;
    }
    let span = top - bottom;
    let mut fraction = ((x - bottom) / span).fract();
    if fraction < 0.0 {
        fraction += 1.0;
    }
    let wrapped = bottom + fraction * span;
    // `-tiny + 1.0` rounds to exactly 1.0
    if wrapped >= top {
        bottom
    } else {
        wrapped
    }
}

/// What happens to particles that leave the domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgePolicy {
    /// Toroidal: leaving one side re-enters from the opposite side
    Wrap,
    /// Particles stick to the boundary
    Clamp,
}

impl EdgePolicy {
    pub fn apply(self, position: Vec2) -> Vec2 {
        match self {
            EdgePolicy::Wrap => Vec2::new(
                repeat(position.x, DOMAIN_MIN, DOMAIN_MAX),
                repeat(position.y, DOMAIN_MIN, DOMAIN_MAX),
            ),
            EdgePolicy::Clamp => position.clamp(Vec2::splat(DOMAIN_MIN), Vec2::splat(DOMAIN_MAX)),
        }
    }
}
