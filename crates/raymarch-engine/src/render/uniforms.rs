use bytemuck::{Pod, Zeroable};

use crate::coords::Viewport;

/// Per-frame shader inputs, bound at `@group(0) @binding(0)`.
///
/// std140 layout, matching this GLSL block:
///
/// ```glsl
/// layout(set = 0, binding = 0) uniform Scene {
///     vec2 resolution;    // offset 0
///     vec3 cameraPos;     // offset 16
///     vec3 cameraLookAt;  // offset 32
/// };
/// ```
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SceneUniform {
    pub resolution: [f32; 2],
    pub _pad0: [f32; 2],
    pub camera_pos: [f32; 3],
    pub _pad1: f32,
    pub camera_look_at: [f32; 3],
    pub _pad2: f32,
}

impl SceneUniform {
    pub const BINDING: (u32, u32) = (0, 0);

    pub const SIZE: u64 = std::mem::size_of::<SceneUniform>() as u64;

    pub fn new(viewport: Viewport, camera_pos: [f32; 3], camera_look_at: [f32; 3]) -> Self {
        Self {
            resolution: viewport.to_array(),
            camera_pos,
            camera_look_at,
            ..Self::zeroed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::offset_of;

    #[test]
    fn std140_layout() {
        assert_eq!(SceneUniform::SIZE, 48);
        assert_eq!(offset_of!(SceneUniform, resolution), 0);
        assert_eq!(offset_of!(SceneUniform, camera_pos), 16);
        assert_eq!(offset_of!(SceneUniform, camera_look_at), 32);
    }

    #[test]
    fn new_fills_fields_and_zeroes_padding() {
        let u = SceneUniform::new(Viewport::new(640.0, 480.0), [1.0, 2.0, 3.0], [0.0; 3]);
        assert_eq!(u.resolution, [640.0, 480.0]);
        assert_eq!(u.camera_pos, [1.0, 2.0, 3.0]);
        assert_eq!(u._pad0, [0.0; 2]);
        assert_eq!(u._pad1, 0.0);
    }
}
