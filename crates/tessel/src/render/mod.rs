//! Render-driver boundary — GPU upload of generated geometry.
//!
//! The renderer proper (window, surface, pipelines, shaders) lives outside
//! this crate. What it needs from here is the buffers and a description of
//! how to read them; [`MeshStore`] provides both.

pub mod mesh;

pub use mesh::{GpuMesh, MeshHandle, MeshStore, SceneHandles};
pub use crate::geometry::MeshVertex;

/// Index format of every uploaded index buffer.
pub const INDEX_FORMAT: wgpu::IndexFormat = wgpu::IndexFormat::Uint16;
