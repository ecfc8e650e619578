//! GPU data structures for instanced quad rendering.
//!
//! Every quad is one instance of a shared unit quad; the per-instance data
//! carries placement, color, texture reference and clip rectangle.

use wgpu::{VertexAttribute, VertexBufferLayout, VertexFormat, VertexStepMode};

use super::constants::{ATLAS_LAYER_SIZE, MAX_ATLASES};

/// Uniform buffer data passed to the shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShaderUniforms {
    /// Viewport size in pixels (width, height)
    pub screen_size: [f32; 2],
    /// Padding for 16-byte alignment
    pub _pad: [f32; 2],
    /// Per atlas layer: (atlas width, atlas height) / layer size, zw unused.
    /// Converts atlas-normalised texture coordinates to layer coordinates.
    pub atlas_scale: [[f32; 4]; MAX_ATLASES],
}

impl ShaderUniforms {
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        Self {
            screen_size: [screen_width, screen_height],
            _pad: [0.0; 2],
            atlas_scale: [[0.0; 4]; MAX_ATLASES],
        }
    }

    /// Record the pixel size of the atlas stored in `layer`.
    pub fn set_atlas_size(&mut self, layer: usize, width: u32, height: u32) {
        let size = ATLAS_LAYER_SIZE as f32;
        self.atlas_scale[layer] = [width as f32 / size, height as f32 / size, 0.0, 0.0];
    }
}

/// A single vertex of the unit quad (shared across all instances).
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    /// Position in 0..1 range
    pub position: [f32; 2],
}

impl QuadVertex {
    /// Vertex buffer layout for the unit quad.
    pub fn desc() -> VertexBufferLayout<'static> {
        VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: VertexStepMode::Vertex,
            attributes: &[VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: VertexFormat::Float32x2,
            }],
        }
    }
}

/// The shared unit quad vertices.
pub const QUAD_VERTICES: &[QuadVertex] = &[
    QuadVertex {
        position: [0.0, 0.0],
    }, // top-left
    QuadVertex {
        position: [1.0, 0.0],
    }, // top-right
    QuadVertex {
        position: [0.0, 1.0],
    }, // bottom-left
    QuadVertex {
        position: [1.0, 1.0],
    }, // bottom-right
];

/// Index buffer for the unit quad (two triangles).
pub const QUAD_INDICES: &[u16] = &[
    0, 1, 2, // first triangle: top-left, top-right, bottom-left
    1, 3, 2, // second triangle: top-right, bottom-right, bottom-left
];

/// Per-instance data for one quad.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadInstance {
    /// Screen rectangle: [x, y, width, height]
    pub rect: [f32; 4],
    /// Fill color, or tint for textured quads
    pub color: [f32; 4],
    /// Texture rectangle normalised against its atlas: [u, v, width, height]
    pub uv_rect: [f32; 4],
    /// Absolute clip rectangle: [x, y, width, height]
    pub clip: [f32; 4],
    /// [textured (0/1), atlas layer, biased z, unused]
    pub params: [u32; 4],
}

impl QuadInstance {
    const TEXTURED: usize = 0;
    const LAYER: usize = 1;
    const DEPTH: usize = 2;

    pub fn colored(rect: [f32; 4], color: [f32; 4], clip: [f32; 4], z: i8) -> Self {
        Self {
            rect,
            color,
            uv_rect: [0.0; 4],
            clip,
            params: [0, 0, Self::bias(z), 0],
        }
    }

    pub fn textured(
        rect: [f32; 4],
        tint: [f32; 4],
        uv_rect: [f32; 4],
        layer: u32,
        clip: [f32; 4],
        z: i8,
    ) -> Self {
        Self {
            rect,
            color: tint,
            uv_rect,
            clip,
            params: [1, layer, Self::bias(z), 0],
        }
    }

    /// Maps `-128..=127` onto `0..=255` so ordering survives the unsigned field.
    fn bias(z: i8) -> u32 {
        (z as i32 + 128) as u32
    }

    pub fn z(&self) -> i8 {
        (self.params[Self::DEPTH] as i32 - 128) as i8
    }

    pub fn is_textured(&self) -> bool {
        self.params[Self::TEXTURED] != 0
    }

    pub fn layer(&self) -> u32 {
        self.params[Self::LAYER]
    }

    pub(crate) fn depth_key(&self) -> u32 {
        self.params[Self::DEPTH]
    }

    /// Vertex buffer layout for instance data.
    pub fn desc() -> VertexBufferLayout<'static> {
        VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadInstance>() as u64,
            step_mode: VertexStepMode::Instance,
            attributes: &[
                // rect
                VertexAttribute {
                    offset: 0,
                    shader_location: 1,
                    format: VertexFormat::Float32x4,
                },
                // color
                VertexAttribute {
                    offset: 16,
                    shader_location: 2,
                    format: VertexFormat::Float32x4,
                },
                // uv_rect
                VertexAttribute {
                    offset: 32,
                    shader_location: 3,
                    format: VertexFormat::Float32x4,
                },
                // clip
                VertexAttribute {
                    offset: 48,
                    shader_location: 4,
                    format: VertexFormat::Float32x4,
                },
                // params
                VertexAttribute {
                    offset: 64,
                    shader_location: 5,
                    format: VertexFormat::Uint32x4,
                },
            ],
        }
    }
}
