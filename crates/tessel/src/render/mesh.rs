//! # Mesh — GPU Mesh Storage
//!
//! This module uploads [`GeometryBuffer`]s to the GPU and hands back a
//! [`MeshHandle`] — a lightweight, copyable reference to the uploaded mesh.
//!
//! ## The Handle Pattern
//!
//! Callers hold a cheap index into the [`MeshStore`], never a raw GPU buffer.
//! Handles are store positions, not [`MeshId`]s: a store may already hold
//! meshes when a [`RenderList`] is uploaded. [`MeshStore::upload_all`]
//! returns [`SceneHandles`], which maps each of the list's mesh ids to the
//! handle its mesh received.
//!
//! ```text
//!   store before:  [cube]            handle 0
//!   upload_all:    MeshId(0) plane → handle 1
//!                  MeshId(1) cube  → handle 2
//! ```
//!
//! ## GpuMesh
//!
//! Each uploaded mesh becomes a [`GpuMesh`]: a vertex buffer, an index
//! buffer when the geometry is indexed, and the counts to draw with. During
//! rendering, [`GpuMesh::draw`] binds those buffers and issues either
//! `draw_indexed(0..index_count)` with 16-bit indices or `draw(0..vertex_count)`.

use wgpu::util::DeviceExt;

use super::INDEX_FORMAT;
use crate::geometry::GeometryBuffer;
use crate::scene::{MeshId, RenderList};

/// Handle to a mesh in the [`MeshStore`]. Lightweight and `Copy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub(crate) usize);

/// Store handles of one uploaded [`RenderList`], looked up by [`MeshId`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneHandles {
    handles: Vec<MeshHandle>,
}

impl SceneHandles {
    /// Handle of the mesh the render list calls `id`.
    pub fn get(&self, id: MeshId) -> Option<MeshHandle> {
        self.handles.get(id.0).copied()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl FromIterator<MeshHandle> for SceneHandles {
    fn from_iter<I: IntoIterator<Item = MeshHandle>>(iter: I) -> Self {
        Self {
            handles: iter.into_iter().collect(),
        }
    }
}

/// A mesh that has been uploaded to GPU buffers.
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: Option<wgpu::Buffer>,
    pub vertex_count: u32,
    pub index_count: u32,
}

impl GpuMesh {
    /// Bind this mesh's buffers on slot 0 and draw one instance.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        match &self.index_buffer {
            Some(index_buffer) => {
                pass.set_index_buffer(index_buffer.slice(..), INDEX_FORMAT);
                pass.draw_indexed(0..self.index_count, 0, 0..1);
            }
            None => pass.draw(0..self.vertex_count, 0..1),
        }
    }
}

/// Stores all uploaded meshes.
#[derive(Default)]
pub struct MeshStore {
    meshes: Vec<GpuMesh>,
}

impl MeshStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upload mesh data to the GPU and return a handle.
    pub fn upload(&mut self, device: &wgpu::Device, geometry: &GeometryBuffer) -> MeshHandle {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh vertex buffer"),
            contents: geometry.vertex_bytes(),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = geometry.is_indexed().then(|| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("mesh index buffer"),
                contents: geometry.index_bytes(),
                usage: wgpu::BufferUsages::INDEX,
            })
        });

        let handle = MeshHandle(self.meshes.len());
        log::debug!(
            "uploaded mesh {}: {} bytes vertex data, {} bytes index data",
            handle.0,
            geometry.vertex_buffer_size_bytes(),
            geometry.index_buffer_size_bytes()
        );
        self.meshes.push(GpuMesh {
            vertex_buffer,
            index_buffer,
            vertex_count: geometry.vertex_count() as u32,
            index_count: geometry.index_count() as u32,
        });
        handle
    }

    /// Upload every mesh of a render list in `MeshId` order. Draw an item
    /// with `handles.get(item.mesh)`, not with its raw mesh id.
    pub fn upload_all(&mut self, device: &wgpu::Device, list: &RenderList) -> SceneHandles {
        if !self.is_empty() {
            log::debug!("uploading render list after {} existing meshes", self.len());
        }
        list.meshes()
            .iter()
            .map(|mesh| self.upload(device, &mesh.geometry))
            .collect()
    }

    /// Get the GPU mesh for a handle.
    pub fn get(&self, handle: MeshHandle) -> Option<&GpuMesh> {
        self.meshes.get(handle.0)
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}
