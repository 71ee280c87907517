//! Error types for geometry generation and scene loading.
//!
//! Generation itself is pure arithmetic, so the only way it can fail is a
//! resolution parameter outside its domain. The remaining variants come from
//! [`GeometryBuffer::validate`](crate::geometry::GeometryBuffer::validate) and
//! from reading scene descriptions off disk.

use std::fmt;

// ── GeometryError ───────────────────────────────────────────────────────

/// Errors produced while building or validating a [`GeometryBuffer`](crate::geometry::GeometryBuffer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// A resolution parameter is outside `min..=max`. Raised before any
    /// vertex is allocated.
    InvalidParameter {
        name: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
    /// An index references a vertex past the end of the vertex list.
    IndexOutOfRange {
        position: usize,
        index: u16,
        vertex_count: usize,
    },
    /// The index list does not divide into whole triangles.
    IncompleteTriangle { index_count: usize },
    /// More vertices than a 16-bit index can address.
    TooManyVertices { vertex_count: usize },
}

impl GeometryError {
    /// Check `value` against `min..=max`, naming the parameter in the error.
    pub(crate) fn check_range(name: &'static str, value: u32, min: u32, max: u32) -> Result<(), Self> {
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(GeometryError::InvalidParameter { name, value, min, max })
        }
    }
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::InvalidParameter { name, value, min, max } => {
                write!(f, "invalid parameter `{name}` = {value}: expected {min}..={max}")
            }
            GeometryError::IndexOutOfRange { position, index, vertex_count } => write!(
                f,
                "index {index} at position {position} is out of range for {vertex_count} vertices"
            ),
            GeometryError::IncompleteTriangle { index_count } => {
                write!(f, "index count {index_count} is not a multiple of 3")
            }
            GeometryError::TooManyVertices { vertex_count } => {
                write!(f, "{vertex_count} vertices cannot be addressed by 16-bit indices")
            }
        }
    }
}

impl std::error::Error for GeometryError {}

// ── SceneError ──────────────────────────────────────────────────────────

/// Errors that can occur while loading a scene description or building its
/// render list.
#[derive(Debug)]
pub enum SceneError {
    /// Failed to read the scene file.
    Io(std::io::Error),
    /// The scene file is not valid scene JSON.
    Parse(serde_json::Error),
    /// A mesh in the scene could not be generated.
    Geometry(GeometryError),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Io(e) => write!(f, "scene read failed: {e}"),
            SceneError::Parse(e) => write!(f, "scene parse failed: {e}"),
            SceneError::Geometry(e) => write!(f, "scene geometry failed: {e}"),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Io(e) => Some(e),
            SceneError::Parse(e) => Some(e),
            SceneError::Geometry(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SceneError {
    fn from(e: std::io::Error) -> Self {
        SceneError::Io(e)
    }
}

impl From<serde_json::Error> for SceneError {
    fn from(e: serde_json::Error) -> Self {
        SceneError::Parse(e)
    }
}

impl From<GeometryError> for SceneError {
    fn from(e: GeometryError) -> Self {
        SceneError::Geometry(e)
    }
}
