//! # Geometry — CPU-Side Mesh Buffers
//!
//! A [`GeometryBuffer`] is what the shape generators return and what the GPU
//! upload adapter consumes: an interleaved vertex list plus an optional
//! 16-bit index list. It is built once at startup and never mutated, so the
//! fields are private and there are no `&mut` accessors.
//!
//! ## Indexed vs. Non-Indexed
//!
//! There is one buffer type for both. An empty index list means "draw the
//! vertices in order, three at a time"; a non-empty one means an indexed draw.
//! [`triangles`](GeometryBuffer::triangles) hides the difference from callers
//! that only want to walk faces.
//!
//! ## Index Width
//!
//! Indices are `u16`, so a single buffer addresses at most 65 536 vertices.
//! The generators reject resolutions that would overflow that before
//! allocating anything.

pub mod shapes;
pub mod vertex;

pub use shapes::Shape;
pub use vertex::{FLOATS_PER_VERTEX, INDEX_SIZE, MeshVertex, VERTEX_STRIDE};

use crate::error::GeometryError;

/// Largest vertex count a 16-bit index can address.
pub const MAX_VERTICES: usize = u16::MAX as usize + 1;

/// Generated mesh data ready for GPU upload.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeometryBuffer {
    vertices: Vec<MeshVertex>,
    indices: Vec<u16>,
}

impl GeometryBuffer {
    /// Build an indexed buffer, checking every index against the vertex list.
    pub fn indexed(vertices: Vec<MeshVertex>, indices: Vec<u16>) -> Result<Self, GeometryError> {
        let buffer = Self { vertices, indices };
        buffer.validate()?;
        Ok(buffer)
    }

    /// Build a non-indexed buffer: every consecutive vertex triple is a triangle.
    pub fn non_indexed(vertices: Vec<MeshVertex>) -> Result<Self, GeometryError> {
        Self::indexed(vertices, Vec::new())
    }

    /// Assemble a buffer from a generator's output without re-validating.
    /// Generators are tested to uphold the invariants themselves.
    pub(crate) fn from_generated(vertices: Vec<MeshVertex>, indices: Vec<u16>) -> Self {
        debug_assert!(vertices.len() <= MAX_VERTICES);
        debug_assert!(indices.len() % 3 == 0);
        Self { vertices, indices }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Number of triangles, whether the buffer is indexed or not.
    pub fn triangle_count(&self) -> usize {
        if self.is_indexed() {
            self.indices.len() / 3
        } else {
            self.vertices.len() / 3
        }
    }

    /// `true` when the buffer carries an index list.
    pub fn is_indexed(&self) -> bool {
        !self.indices.is_empty()
    }

    /// Size of the vertex data in bytes (`vertex_count × 32`).
    pub fn vertex_buffer_size_bytes(&self) -> usize {
        self.vertices.len() * VERTEX_STRIDE
    }

    /// Size of the index data in bytes (`index_count × 2`).
    pub fn index_buffer_size_bytes(&self) -> usize {
        self.indices.len() * INDEX_SIZE
    }

    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Raw vertex bytes, suitable for a direct buffer copy.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index bytes (native-endian `u16`).
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Iterate over triangles as vertex-index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        let indexed = self
            .indices
            .chunks_exact(3)
            .map(|t| [t[0] as usize, t[1] as usize, t[2] as usize]);
        let sequential = (0..self.vertices.len() / 3).map(|t| [t * 3, t * 3 + 1, t * 3 + 2]);

        // Exactly one of the two is non-empty.
        let (indexed, sequential) = if self.is_indexed() {
            (Some(indexed), None)
        } else {
            (None, Some(sequential))
        };
        indexed.into_iter().flatten().chain(sequential.into_iter().flatten())
    }

    /// Check the buffer invariants: index count divisible by 3 (vertex count,
    /// for non-indexed buffers), every index below the vertex count, and a
    /// vertex count that 16-bit indices can reach.
    pub fn validate(&self) -> Result<(), GeometryError> {
        let vertex_count = self.vertices.len();
        if vertex_count > MAX_VERTICES {
            return Err(GeometryError::TooManyVertices { vertex_count });
        }

        let primitive_count = if self.is_indexed() { self.indices.len() } else { vertex_count };
        if primitive_count % 3 != 0 {
            return Err(GeometryError::IncompleteTriangle { index_count: primitive_count });
        }

        if let Some((position, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|(_, index)| **index as usize >= vertex_count)
        {
            return Err(GeometryError::IndexOutOfRange { position, index, vertex_count });
        }

        Ok(())
    }

    /// Take the vertex and index lists out of the buffer.
    pub fn into_parts(self) -> (Vec<MeshVertex>, Vec<u16>) {
        (self.vertices, self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(x: f32, z: f32) -> MeshVertex {
        MeshVertex::new([x, 0.0, z], [0.0, 1.0, 0.0], [0.0, 0.0])
    }

    fn quad() -> Vec<MeshVertex> {
        vec![vertex(0.0, 0.0), vertex(0.0, 1.0), vertex(1.0, 1.0), vertex(1.0, 0.0)]
    }

    #[test]
    fn byte_sizes_follow_counts() {
        let buffer = GeometryBuffer::indexed(quad(), vec![0, 1, 2, 0, 2, 3]).unwrap();
        assert_eq!(buffer.vertex_count(), 4);
        assert_eq!(buffer.index_count(), 6);
        assert_eq!(buffer.vertex_buffer_size_bytes(), 4 * 32);
        assert_eq!(buffer.index_buffer_size_bytes(), 6 * 2);
        assert_eq!(buffer.vertex_bytes().len(), buffer.vertex_buffer_size_bytes());
        assert_eq!(buffer.index_bytes().len(), buffer.index_buffer_size_bytes());
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let err = GeometryBuffer::indexed(quad(), vec![0, 1, 4]).unwrap_err();
        assert_eq!(err, GeometryError::IndexOutOfRange { position: 2, index: 4, vertex_count: 4 });
    }

    #[test]
    fn partial_triangle_is_rejected() {
        let err = GeometryBuffer::indexed(quad(), vec![0, 1, 2, 3]).unwrap_err();
        assert_eq!(err, GeometryError::IncompleteTriangle { index_count: 4 });
    }

    #[test]
    fn non_indexed_needs_whole_triangles() {
        let err = GeometryBuffer::non_indexed(quad()).unwrap_err();
        assert_eq!(err, GeometryError::IncompleteTriangle { index_count: 4 });

        let mut six = quad();
        six.extend(quad().into_iter().take(2));
        let buffer = GeometryBuffer::non_indexed(six).unwrap();
        assert!(!buffer.is_indexed());
        assert_eq!(buffer.triangle_count(), 2);
        assert_eq!(buffer.index_buffer_size_bytes(), 0);
    }

    #[test]
    fn triangles_walks_indexed_and_sequential_buffers() {
        let indexed = GeometryBuffer::indexed(quad(), vec![0, 1, 2, 0, 2, 3]).unwrap();
        let tris: Vec<[usize; 3]> = indexed.triangles().collect();
        assert_eq!(tris, vec![[0, 1, 2], [0, 2, 3]]);

        let sequential = GeometryBuffer::non_indexed(quad()[..3].to_vec()).unwrap();
        let tris: Vec<[usize; 3]> = sequential.triangles().collect();
        assert_eq!(tris, vec![[0, 1, 2]]);
    }

    #[test]
    fn too_many_vertices_is_rejected() {
        let vertices = vec![vertex(0.0, 0.0); MAX_VERTICES + 2];
        let err = GeometryBuffer::non_indexed(vertices).unwrap_err();
        assert_eq!(err, GeometryError::TooManyVertices { vertex_count: MAX_VERTICES + 2 });
    }

    #[test]
    fn into_parts_returns_the_lists() {
        let buffer = GeometryBuffer::indexed(quad(), vec![0, 1, 2]).unwrap();
        let (vertices, indices) = buffer.into_parts();
        assert_eq!(vertices.len(), 4);
        assert_eq!(indices, vec![0, 1, 2]);
    }
}
