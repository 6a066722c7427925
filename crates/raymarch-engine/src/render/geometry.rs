use bytemuck::{Pod, Zeroable};

/// Vertex of the cover geometry, in clip space.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CoverVertex {
    pub pos: [f32; 2],
}

impl CoverVertex {
    /// Shader location of `pos` (`vertPosition` in GLSL).
    pub const POSITION_LOCATION: u32 = 0;

    /// `pos` as a two-float attribute.
    pub const ATTRS: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x2,
        offset: 0,
        shader_location: Self::POSITION_LOCATION,
    }];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CoverVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const fn v(x: f32, y: f32) -> CoverVertex {
    CoverVertex { pos: [x, y] }
}

const QUAD: [CoverVertex; 6] = [
    v(1.0, 1.0),
    v(1.0, -1.0),
    v(-1.0, -1.0),
    v(-1.0, -1.0),
    v(-1.0, 1.0),
    v(1.0, 1.0),
];

// Clipping trims it to the viewport; no diagonal seam.
const TRIANGLE: [CoverVertex; 3] = [v(-1.0, -1.0), v(3.0, -1.0), v(-1.0, 3.0)];

/// Static geometry that covers the whole viewport.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum CoverGeometry {
    /// Two triangles exactly covering clip space.
    #[default]
    Quad,
    /// One oversized triangle.
    Triangle,
}

impl CoverGeometry {
    pub fn vertices(self) -> &'static [CoverVertex] {
        match self {
            CoverGeometry::Quad => &QUAD,
            CoverGeometry::Triangle => &TRIANGLE,
        }
    }

    pub fn vertex_count(self) -> u32 {
        self.vertices().len() as u32
    }
}
