//! Error types for mesh construction.

use thiserror::Error;

/// Result type alias for mesh construction.
pub type MeshResult<T> = Result<T, InvalidMeshError>;

/// Structural failures that make a mesh unusable for any analysis.
///
/// These are raised once, at construction time. Everything detected after
/// construction is a soft finding reported through the issue list instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidMeshError {
    /// The vertex buffer is empty.
    #[error("mesh has no vertices")]
    NoVertices,

    /// The triangle buffer is empty.
    #[error("mesh has no triangles")]
    NoTriangles,

    /// A triangle references a vertex that does not exist.
    #[error("triangle {triangle} references vertex {index} but mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        /// Index of the offending triangle.
        triangle: usize,
        /// The out-of-range vertex index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// Vertex count exceeds the configured hard limit.
    #[error("mesh has {count} vertices, limit is {max}")]
    TooManyVertices {
        /// Actual vertex count.
        count: usize,
        /// Configured limit.
        max: usize,
    },

    /// Triangle count exceeds the configured hard limit.
    #[error("mesh has {count} triangles, limit is {max}")]
    TooManyTriangles {
        /// Actual triangle count.
        count: usize,
        /// Configured limit.
        max: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = InvalidMeshError::IndexOutOfRange {
            triangle: 4,
            index: 17,
            vertex_count: 12,
        };
        let msg = format!("{err}");
        assert!(msg.contains("triangle 4"));
        assert!(msg.contains("vertex 17"));

        let err = InvalidMeshError::TooManyTriangles {
            count: 11,
            max: 10,
        };
        assert!(format!("{err}").contains("limit is 10"));
    }
}
