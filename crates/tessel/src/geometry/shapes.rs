//! # Shapes — Procedural Mesh Generators
//!
//! Every object in the desk scene is drawn from a handful of parametric
//! shapes: a subdivided plane, a UV sphere, a cube and a cylinder. This module
//! synthesizes their vertex and index data once at startup. All generators
//! are pure: the same parameters always produce bit-identical buffers.
//!
//! ## Winding Order and Normals
//!
//! All triangles are counter-clockwise when viewed from the side their normal
//! points to. That matches wgpu's default `FrontFace::Ccw`, so backface
//! culling keeps the outside of closed shapes and the top of the plane.
//!
//! ## Resolution Domains
//!
//! Each resolution parameter has a valid range, checked before anything is
//! allocated. Zero is never valid, and the upper bounds keep the vertex count
//! addressable with 16-bit indices.
//!
//! | Generator  | Parameter      | Range       | Vertices          | Indices               |
//! |------------|----------------|-------------|-------------------|-----------------------|
//! | `plane`    | `dimension`    | 1..=255     | (d+1)²            | 6·d²                  |
//! | `sphere`   | `tessellation` | 3..=255     | (t+1)²            | 6·t·(t−1)             |
//! | `uv_sphere`| stacks, slices | 3..=255     | (st+1)·(sl+1)     | 6·sl·(st−1)           |
//! | `cube`     | —              | —           | 24                | 36                    |
//! | `cylinder` | `segments`     | 3..=4096    | 4·(s+1)           | 12·s                  |
//!
//! ## Sphere Poles
//!
//! The top and bottom rings of a UV sphere collapse to a single point, but
//! they stay as one vertex per longitude step so each keeps its own `u`
//! coordinate. In the two pole bands half of every quad has zero area; only
//! the other half is emitted, which is why the sphere has `6·t·(t−1)` indices
//! rather than `6·t²`.

use std::f32::consts::PI;
use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::vertex::MeshVertex;
use super::{GeometryBuffer, MAX_VERTICES};
use crate::error::GeometryError;

/// Plane subdivisions used when a scene does not say otherwise.
pub const DEFAULT_PLANE_DIMENSION: u32 = 10;
/// Sphere stacks/slices used when a scene does not say otherwise.
pub const DEFAULT_SPHERE_TESSELLATION: u32 = 20;
/// Cylinder segments used when a scene does not say otherwise.
pub const DEFAULT_CYLINDER_SEGMENTS: u32 = 32;

const MAX_GRID_RESOLUTION: u32 = 255;
const MAX_CYLINDER_SEGMENTS: u32 = 4096;

const UP: [f32; 3] = [0.0, 1.0, 0.0];

// ── Shape selector ──────────────────────────────────────────────────────

/// A shape kind plus its resolution. This is the whole input a generator
/// needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Plane { dimension: u32 },
    Sphere { tessellation: u32 },
    Cube,
    Cylinder { segments: u32 },
}

impl Shape {
    /// Generate the geometry for this shape.
    pub fn generate(&self) -> Result<GeometryBuffer, GeometryError> {
        match *self {
            Shape::Plane { dimension } => plane(dimension),
            Shape::Sphere { tessellation } => sphere(tessellation),
            Shape::Cube => Ok(cube()),
            Shape::Cylinder { segments } => cylinder(segments),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Plane { dimension } => write!(f, "plane({dimension})"),
            Shape::Sphere { tessellation } => write!(f, "sphere({tessellation})"),
            Shape::Cube => write!(f, "cube"),
            Shape::Cylinder { segments } => write!(f, "cylinder({segments})"),
        }
    }
}

// ── Plane ───────────────────────────────────────────────────────────────

/// Generate a unit plane on XZ (normal +Y) centered at the origin, split into
/// `dimension × dimension` cells.
///
/// Grid point `(row, col)` is vertex `row·(dimension+1) + col`, sitting at
/// `x = -0.5 + col/dimension`, `z = -0.5 + row/dimension` with
/// `uv = (col/dimension, row/dimension)`.
pub fn plane(dimension: u32) -> Result<GeometryBuffer, GeometryError> {
    GeometryError::check_range("dimension", dimension, 1, MAX_GRID_RESOLUTION)?;

    let side = dimension as usize + 1;
    let mut vertices = Vec::with_capacity(side * side);
    let mut indices = Vec::with_capacity(dimension as usize * dimension as usize * 6);

    let d = dimension as f32;
    for row in 0..=dimension {
        let v = row as f32 / d;
        for col in 0..=dimension {
            let u = col as f32 / d;
            vertices.push(MeshVertex::new([u - 0.5, 0.0, v - 0.5], UP, [u, v]));
        }
    }

    let stride = dimension + 1;
    for row in 0..dimension {
        for col in 0..dimension {
            let top_left = (row * stride + col) as u16;
            let top_right = top_left + 1;
            let bottom_left = top_left + stride as u16;
            let bottom_right = bottom_left + 1;

            // CCW seen from +Y: +Z runs "down" the grid, +X across it.
            indices.extend_from_slice(&[top_left, bottom_left, bottom_right]);
            indices.extend_from_slice(&[top_left, bottom_right, top_right]);
        }
    }

    log::debug!(
        "generated plane({dimension}): {} vertices, {} indices",
        vertices.len(),
        indices.len()
    );
    Ok(GeometryBuffer::from_generated(vertices, indices))
}

// ── Sphere ──────────────────────────────────────────────────────────────

/// Generate a unit UV sphere with `tessellation` stacks and slices.
pub fn sphere(tessellation: u32) -> Result<GeometryBuffer, GeometryError> {
    GeometryError::check_range("tessellation", tessellation, 3, MAX_GRID_RESOLUTION)?;
    uv_sphere(tessellation, tessellation)
}

/// Generate a unit UV sphere centered at the origin.
///
/// `stacks` divides latitude φ from 0 (north pole, +Y) to π, `slices` divides
/// longitude θ from 0 to 2π. Each vertex is
/// `(sin φ·cos θ, cos φ, sin φ·sin θ)` with the same vector as its normal and
/// `uv = (θ/2π, φ/π)`. The θ = 2π column duplicates θ = 0 so the texture seam
/// gets its own `u = 1` vertices.
pub fn uv_sphere(stacks: u32, slices: u32) -> Result<GeometryBuffer, GeometryError> {
    GeometryError::check_range("stacks", stacks, 3, MAX_GRID_RESOLUTION)?;
    GeometryError::check_range("slices", slices, 3, MAX_GRID_RESOLUTION)?;

    let ring_len = slices as usize + 1;
    let mut vertices = Vec::with_capacity((stacks as usize + 1) * ring_len);
    let mut indices = Vec::with_capacity(slices as usize * (stacks as usize - 1) * 6);

    for stack in 0..=stacks {
        let v = stack as f32 / stacks as f32;
        let phi = v * PI;
        let (sin_phi, cos_phi) = phi.sin_cos();

        for slice in 0..=slices {
            let u = slice as f32 / slices as f32;
            let theta = u * 2.0 * PI;
            let (sin_theta, cos_theta) = theta.sin_cos();

            let position = [sin_phi * cos_theta, cos_phi, sin_phi * sin_theta];
            let normal = Vec3::from(position).normalize().to_array();
            vertices.push(MeshVertex::new(position, normal, [u, v]));
        }
    }

    let last_band = stacks - 1;
    for stack in 0..stacks {
        for slice in 0..slices {
            let current = (stack * (slices + 1) + slice) as u16;
            let below = current + ring_len as u16;

            // The upper edge of the north band and the lower edge of the
            // south band have zero length; skip the triangle built on it.
            if stack != 0 {
                indices.extend_from_slice(&[current, current + 1, below]);
            }
            if stack != last_band {
                indices.extend_from_slice(&[current + 1, below + 1, below]);
            }
        }
    }

    log::debug!(
        "generated sphere({stacks}x{slices}): {} vertices, {} indices",
        vertices.len(),
        indices.len()
    );
    Ok(GeometryBuffer::from_generated(vertices, indices))
}

// ── Cube ────────────────────────────────────────────────────────────────

/// Generate a unit cube centered at the origin (side length 1.0).
///
/// Each face has its own four vertices so corners carry the flat normal of
/// the face they belong to: 24 vertices, 36 indices.
pub fn cube() -> GeometryBuffer {
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    // (normal, u axis, v axis), with u × v = normal for CCW corners.
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ];
    let corners = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];
    let uvs = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];
    let h = 0.5_f32;

    for (normal, u_dir, v_dir) in &faces {
        let base = vertices.len() as u16;
        for (corner, uv) in corners.iter().zip(uvs) {
            let position = std::array::from_fn(|axis| {
                normal[axis] * h + u_dir[axis] * corner[0] * h + v_dir[axis] * corner[1] * h
            });
            vertices.push(MeshVertex::new(position, *normal, uv));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    log::debug!("generated cube: {} vertices, {} indices", vertices.len(), indices.len());
    GeometryBuffer::from_generated(vertices, indices)
}

// ── Cylinder ────────────────────────────────────────────────────────────

/// Generate a Y-aligned cylinder of radius 0.5 and height 1.0 centered at the
/// origin.
///
/// The side is a strip of `segments + 1` top/bottom vertex pairs (the last
/// pair repeats the first for the UV seam) with radial normals. Each cap is a
/// fan around its own center vertex with a flat ±Y normal.
pub fn cylinder(segments: u32) -> Result<GeometryBuffer, GeometryError> {
    GeometryError::check_range("segments", segments, 3, MAX_CYLINDER_SEGMENTS)?;

    let seg = segments as usize;
    let radius = 0.5_f32;
    let half_height = 0.5_f32;
    let mut vertices = Vec::with_capacity(4 * (seg + 1));
    let mut indices = Vec::with_capacity(12 * seg);
    debug_assert!(4 * (seg + 1) <= MAX_VERTICES);

    for i in 0..=segments {
        let u = i as f32 / segments as f32;
        let (sin, cos) = (u * 2.0 * PI).sin_cos();
        vertices.push(MeshVertex::new(
            [cos * radius, half_height, sin * radius],
            [cos, 0.0, sin],
            [u, 0.0],
        ));
        vertices.push(MeshVertex::new(
            [cos * radius, -half_height, sin * radius],
            [cos, 0.0, sin],
            [u, 1.0],
        ));
    }

    for i in 0..segments as u16 {
        let top0 = i * 2;
        let bot0 = top0 + 1;
        let top1 = top0 + 2;
        let bot1 = top0 + 3;
        // CCW seen from outside: θ runs from +X toward +Z.
        indices.extend_from_slice(&[top0, bot1, bot0, top0, top1, bot1]);
    }

    for (y, normal) in [(half_height, 1.0_f32), (-half_height, -1.0)] {
        let center = vertices.len() as u16;
        vertices.push(MeshVertex::new([0.0, y, 0.0], [0.0, normal, 0.0], [0.5, 0.5]));
        for i in 0..segments {
            let (sin, cos) = (i as f32 / segments as f32 * 2.0 * PI).sin_cos();
            vertices.push(MeshVertex::new(
                [cos * radius, y, sin * radius],
                [0.0, normal, 0.0],
                [0.5 + cos * 0.5, 0.5 + sin * 0.5],
            ));
        }
        for i in 0..segments as u16 {
            let curr = center + 1 + i;
            let next = center + 1 + (i + 1) % segments as u16;
            if normal > 0.0 {
                indices.extend_from_slice(&[center, next, curr]);
            } else {
                indices.extend_from_slice(&[center, curr, next]);
            }
        }
    }

    log::debug!(
        "generated cylinder({segments}): {} vertices, {} indices",
        vertices.len(),
        indices.len()
    );
    Ok(GeometryBuffer::from_generated(vertices, indices))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Unnormalized face normal (b − a) × (c − a) of every triangle.
    fn face_normals(buffer: &GeometryBuffer) -> Vec<(Vec3, Vec3)> {
        let verts = buffer.vertices();
        buffer
            .triangles()
            .map(|[a, b, c]| {
                let a = Vec3::from(verts[a].position);
                let b = Vec3::from(verts[b].position);
                let c = Vec3::from(verts[c].position);
                ((b - a).cross(c - a), (a + b + c) / 3.0)
            })
            .collect()
    }

    fn assert_indices_in_range(buffer: &GeometryBuffer) {
        for &idx in buffer.indices() {
            assert!((idx as usize) < buffer.vertex_count(), "index {idx} out of range");
        }
        assert_eq!(buffer.index_count() % 3, 0);
    }

    // ── plane ──

    #[test]
    fn plane_has_correct_counts() {
        for dimension in [1, 2, 7, 10, 20, 255] {
            let plane = plane(dimension).unwrap();
            let d = dimension as usize;
            assert_eq!(plane.vertex_count(), (d + 1) * (d + 1), "dimension {dimension}");
            assert_eq!(plane.index_count(), d * d * 6, "dimension {dimension}");
            assert_indices_in_range(&plane);
        }
    }

    #[test]
    fn plane_normals_point_up() {
        let plane = plane(10).unwrap();
        for v in plane.vertices() {
            assert_eq!(v.normal, [0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn plane_spans_unit_square_with_full_uv_range() {
        let plane = plane(4).unwrap();
        for v in plane.vertices() {
            assert_eq!(v.position[1], 0.0);
            assert!(v.position[0] >= -0.5 && v.position[0] <= 0.5);
            assert!(v.position[2] >= -0.5 && v.position[2] <= 0.5);
            assert!((v.uv[0] - (v.position[0] + 0.5)).abs() < 1e-6);
            assert!((v.uv[1] - (v.position[2] + 0.5)).abs() < 1e-6);
        }
        let last = plane.vertices().last().unwrap();
        assert_eq!(last.position, [0.5, 0.0, 0.5]);
        assert_eq!(last.uv, [1.0, 1.0]);
    }

    #[test]
    fn plane_of_dimension_one_is_a_single_quad() {
        let plane = plane(1).unwrap();
        let positions: Vec<[f32; 3]> = plane.vertices().iter().map(|v| v.position).collect();
        assert_eq!(
            positions,
            vec![[-0.5, 0.0, -0.5], [0.5, 0.0, -0.5], [-0.5, 0.0, 0.5], [0.5, 0.0, 0.5]]
        );
        assert_eq!(plane.indices(), &[0, 2, 3, 0, 3, 1]);
        assert_eq!(plane.triangle_count(), 2);
    }

    #[test]
    fn plane_triangles_all_face_up() {
        let plane = plane(6).unwrap();
        for (normal, _) in face_normals(&plane) {
            assert!(normal.y > 0.0, "triangle normal {normal} should point to +Y");
        }
    }

    #[test]
    fn plane_is_deterministic() {
        let a = plane(10).unwrap();
        let b = plane(10).unwrap();
        assert_eq!(a.vertex_bytes(), b.vertex_bytes());
        assert_eq!(a.index_bytes(), b.index_bytes());
    }

    #[test]
    fn sphere_is_deterministic() {
        let a = sphere(20).unwrap();
        let b = sphere(20).unwrap();
        assert_eq!(a.vertex_bytes(), b.vertex_bytes());
        assert_eq!(a.index_bytes(), b.index_bytes());
    }

    #[test]
    fn plane_rejects_out_of_domain_dimension() {
        assert_eq!(
            plane(0).unwrap_err(),
            GeometryError::InvalidParameter { name: "dimension", value: 0, min: 1, max: 255 }
        );
        assert!(plane(256).is_err());
    }

    // ── sphere ──

    #[test]
    fn sphere_has_correct_counts() {
        let t = 20usize;
        let sphere = sphere(20).unwrap();
        assert_eq!(sphere.vertex_count(), (t + 1) * (t + 1));
        assert_eq!(sphere.index_count(), 6 * t * (t - 1));
        assert_indices_in_range(&sphere);
    }

    #[test]
    fn sphere_vertices_lie_on_unit_sphere() {
        for tessellation in [3, 8, 20, 64] {
            let sphere = sphere(tessellation).unwrap();
            for v in sphere.vertices() {
                let len = Vec3::from(v.position).length();
                assert!((len - 1.0).abs() < 1e-5, "vertex at distance {len}");
            }
        }
    }

    #[test]
    fn sphere_normals_match_positions() {
        let sphere = sphere(12).unwrap();
        for v in sphere.vertices() {
            let n = Vec3::from(v.normal);
            let p = Vec3::from(v.position).normalize();
            assert!((n.length() - 1.0).abs() < 1e-5);
            assert!((n.dot(p) - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn sphere_triangles_all_face_outward() {
        for tessellation in [3, 4, 20, 48] {
            let sphere = sphere(tessellation).unwrap();
            for (normal, centroid) in face_normals(&sphere) {
                assert!(
                    normal.dot(centroid) > 0.0,
                    "tessellation {tessellation}: inward or degenerate triangle at {centroid}"
                );
            }
        }
    }

    #[test]
    fn sphere_keeps_one_pole_vertex_per_slice() {
        let t = 8u32;
        let sphere = sphere(t).unwrap();
        let ring = t as usize + 1;
        let north = &sphere.vertices()[..ring];
        let south = &sphere.vertices()[sphere.vertex_count() - ring..];
        for (slice, v) in north.iter().enumerate() {
            assert_eq!(v.position, [0.0, 1.0, 0.0]);
            assert!((v.uv[0] - slice as f32 / t as f32).abs() < 1e-6);
            assert_eq!(v.uv[1], 0.0);
        }
        for v in south {
            assert!((v.position[1] + 1.0).abs() < 1e-6);
            assert_eq!(v.uv[1], 1.0);
        }
    }

    #[test]
    fn sphere_uv_is_equirectangular() {
        let sphere = sphere(10).unwrap();
        for v in sphere.vertices() {
            let phi = v.uv[1] * PI;
            assert!((v.position[1] - phi.cos()).abs() < 1e-5);
        }
    }

    #[test]
    fn uv_sphere_splits_stacks_and_slices() {
        let sphere = uv_sphere(6, 16).unwrap();
        assert_eq!(sphere.vertex_count(), 7 * 17);
        assert_eq!(sphere.index_count(), 6 * 16 * 5);
        assert_indices_in_range(&sphere);
    }

    #[test]
    fn sphere_rejects_out_of_domain_tessellation() {
        assert_eq!(
            sphere(0).unwrap_err(),
            GeometryError::InvalidParameter { name: "tessellation", value: 0, min: 3, max: 255 }
        );
        assert!(sphere(2).is_err());
        assert!(sphere(256).is_err());
        assert!(uv_sphere(3, 2).is_err());
    }

    #[test]
    fn largest_sphere_still_fits_u16_indices() {
        let sphere = sphere(255).unwrap();
        assert_eq!(sphere.vertex_count(), MAX_VERTICES);
        assert!(sphere.validate().is_ok());
    }

    // ── cube ──

    #[test]
    fn cube_has_correct_counts() {
        let cube = cube();
        assert_eq!(cube.vertex_count(), 24, "cube should have 24 vertices (4 per face)");
        assert_eq!(cube.index_count(), 36, "cube should have 36 indices (6 per face)");
        assert_indices_in_range(&cube);
    }

    #[test]
    fn cube_triangles_face_along_vertex_normals() {
        let cube = cube();
        let verts = cube.vertices();
        for (tri, (normal, _)) in cube.triangles().zip(face_normals(&cube)) {
            let expected = Vec3::from(verts[tri[0]].normal);
            assert!(normal.normalize().dot(expected) > 0.999);
        }
    }

    // ── cylinder ──

    #[test]
    fn cylinder_has_correct_counts() {
        let seg = 32usize;
        let cylinder = cylinder(32).unwrap();
        assert_eq!(cylinder.vertex_count(), 4 * (seg + 1));
        // side: seg*6, top cap: seg*3, bottom cap: seg*3
        assert_eq!(cylinder.index_count(), seg * 12);
        assert_indices_in_range(&cylinder);
    }

    #[test]
    fn cylinder_triangles_face_outward() {
        let cylinder = cylinder(16).unwrap();
        for (normal, centroid) in face_normals(&cylinder) {
            assert!(normal.dot(centroid) > 0.0, "triangle at {centroid} faces inward");
        }
    }

    #[test]
    fn cylinder_normals_are_unit_length() {
        let cylinder = cylinder(16).unwrap();
        for v in cylinder.vertices() {
            let len = Vec3::from(v.normal).length();
            assert!((len - 1.0).abs() < 1e-5, "normal should be unit length, got {len}");
        }
    }

    #[test]
    fn cylinder_rejects_too_few_segments() {
        assert!(cylinder(0).is_err());
        assert!(cylinder(2).is_err());
    }

    // ── selector ──

    #[test]
    fn shape_generate_dispatches() {
        let plane = Shape::Plane { dimension: 3 }.generate().unwrap();
        assert_eq!(plane.vertex_count(), 16);
        let cube = Shape::Cube.generate().unwrap();
        assert_eq!(cube.vertex_count(), 24);
        assert!(Shape::Sphere { tessellation: 0 }.generate().is_err());
    }

    #[test]
    fn shape_serializes_with_kind_tag() {
        let json = serde_json::to_string(&Shape::Sphere { tessellation: 20 }).unwrap();
        assert_eq!(json, r#"{"kind":"sphere","tessellation":20}"#);
        let back: Shape = serde_json::from_str(r#"{"kind":"cube"}"#).unwrap();
        assert_eq!(back, Shape::Cube);
    }
}
