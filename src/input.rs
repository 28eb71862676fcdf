//! Pointer input
//!
//! While the left button is held, particle 0 follows the cursor.

use glam::Vec2;

/// Map a window pixel to simulation space.
/// The window spans `[-1, 1]²` with y pointing up.
pub fn to_simulation_space(x: f64, y: f64, width: u32, height: u32) -> Vec2 {
    let width = width.max(1) as f32;
    let height = height.max(1) as f32;
    Vec2::new(
        2.0 * (x as f32 / width - 0.5),
        2.0 * (1.0 - y as f32 / height - 0.5),
    )
}

#[derive(Debug, Default)]
pub struct PointerInput {
    held: bool,
    cursor: Option<(f64, f64)>,
}

impl PointerInput {
    pub fn press(&mut self) {
        self.held = true;
    }

    pub fn release(&mut self) {
        self.held = false;
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.cursor = Some((x, y));
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Where particle 0 should be pinned this frame, if anywhere
    pub fn override_position(&self, width: u32, height: u32) -> Option<Vec2> {
        if !self.held {
            return None;
        }
        let (x, y) = self.cursor?;
        Some(to_simulation_space(x, y, width, height))
    }
}
