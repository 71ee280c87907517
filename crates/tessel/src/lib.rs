//! # Tessel — Procedural Geometry for a Static Desk Scene
//!
//! Tessel synthesizes the meshes a small forward renderer needs (subdivided
//! planes, UV spheres, cubes, cylinders), packs them into interleaved
//! 32-byte vertex buffers with 16-bit indices, and arranges them into an
//! immutable render list described by a JSON scene file.
//!
//! ```text
//!  Shape ──generate──▶ GeometryBuffer ──┐
//!                                       ├──▶ RenderList ──▶ MeshStore (gpu)
//!  SceneDescription ─────────────────────┘
//! ```
//!
//! Start with [`geometry::shapes`] for the generators or
//! [`scene::RenderList::build`] for a whole scene.

pub mod error;
pub mod geometry;
pub mod math;
pub mod scene;

#[cfg(feature = "gpu")]
pub mod render;

pub use error::{GeometryError, SceneError};
pub use geometry::{GeometryBuffer, MeshVertex, Shape};
pub use scene::{RenderList, SceneDescription};
