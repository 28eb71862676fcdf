//! View uniform for the point shader
//!
//! The simulation domain `[-1, 1]²` maps onto the whole surface, like clip
//! space does. Only the point quads are corrected for aspect ratio so they
//! stay round on non-square windows.

use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ViewUniform {
    /// Half-extent of a point quad in clip space, per axis
    pub point_scale: [f32; 2],
    pub _padding: [f32; 2],
}

impl ViewUniform {
    pub fn new(point_size: f32, width: u32, height: u32) -> Self {
        let width = width.max(1) as f32;
        let height = height.max(1) as f32;
        let point_scale = if width > height {
            [point_size * height / width, point_size]
        } else {
            [point_size, point_size * width / height]
        };
        Self {
            point_scale,
            _padding: [0.0; 2],
        }
    }
}
