//! # Vertex — The Interleaved Record Behind Every Mesh
//!
//! Every generated shape packs its per-vertex data into one interleaved
//! record. The layout is fixed for the whole crate; the GPU upload adapter,
//! the byte-size helpers on [`GeometryBuffer`](super::GeometryBuffer) and the
//! attribute description handed to the pipeline all derive from it.
//!
//! ## Memory Layout
//!
//! ```text
//! MeshVertex (32 bytes)
//! ┌──────────────┬──────────────┬──────────────┐
//! │ position     │ normal       │ uv           │
//! │ [f32; 3]     │ [f32; 3]     │ [f32; 2]     │
//! │ 12 bytes     │ 12 bytes     │ 8 bytes      │
//! │ offset 0     │ offset 12    │ offset 24    │
//! │ location(0)  │ location(1)  │ location(2)  │
//! └──────────────┴──────────────┴──────────────┘
//! ```
//!
//! There is exactly one stride. A buffer written with one stride and read
//! with another shears every attribute after the first vertex, so nothing
//! in the crate declares a second one.

use bytemuck::{Pod, Zeroable};

/// Number of `f32` components in one vertex record.
pub const FLOATS_PER_VERTEX: usize = 8;

/// Bytes between the start of consecutive vertex records.
pub const VERTEX_STRIDE: usize = FLOATS_PER_VERTEX * std::mem::size_of::<f32>();

/// Bytes per index (16-bit unsigned).
pub const INDEX_SIZE: usize = std::mem::size_of::<u16>();

/// Byte offset of the position attribute.
pub const POSITION_OFFSET: usize = 0;
/// Byte offset of the normal attribute.
pub const NORMAL_OFFSET: usize = 12;
/// Byte offset of the texture coordinate attribute.
pub const UV_OFFSET: usize = 24;

/// Per-vertex data for meshes: position, surface normal, and texture UV.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self { position, normal, uv }
    }

    #[cfg(feature = "gpu")]
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: VERTEX_STRIDE as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position: vec3<f32>
            wgpu::VertexAttribute {
                offset: POSITION_OFFSET as wgpu::BufferAddress,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            // normal: vec3<f32>
            wgpu::VertexAttribute {
                offset: NORMAL_OFFSET as wgpu::BufferAddress,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x3,
            },
            // uv: vec2<f32>
            wgpu::VertexAttribute {
                offset: UV_OFFSET as wgpu::BufferAddress,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x2,
            },
        ],
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_matches_struct_size() {
        assert_eq!(std::mem::size_of::<MeshVertex>(), VERTEX_STRIDE);
        assert_eq!(VERTEX_STRIDE, 32);
        assert_eq!(INDEX_SIZE, 2);
    }

    #[test]
    fn attribute_offsets_match_field_offsets() {
        assert_eq!(std::mem::offset_of!(MeshVertex, position), POSITION_OFFSET);
        assert_eq!(std::mem::offset_of!(MeshVertex, normal), NORMAL_OFFSET);
        assert_eq!(std::mem::offset_of!(MeshVertex, uv), UV_OFFSET);
    }

    #[test]
    fn vertex_casts_to_eight_floats() {
        let v = MeshVertex::new([1.0, 2.0, 3.0], [0.0, 1.0, 0.0], [0.25, 0.75]);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&v));
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.0, 1.0, 0.0, 0.25, 0.75]);
    }

    #[cfg(feature = "gpu")]
    #[test]
    fn layout_describes_three_attributes() {
        let layout = MeshVertex::LAYOUT;
        assert_eq!(layout.array_stride, 32);
        let offsets: Vec<u64> = layout.attributes.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 24]);
    }
}
