//! Error types for geodesic field generation.

use thiserror::Error;

/// Result type alias using [`FieldError`].
pub type Result<T> = std::result::Result<T, FieldError>;

/// Errors that abort a field generation run.
#[derive(Debug, Error)]
pub enum FieldError {
    /// A face references a vertex index outside the vertex list.
    #[error("face {face} references vertex {vertex} (mesh has {vertex_count} vertices)")]
    InvalidMesh {
        /// The face index.
        face: usize,
        /// The out-of-range vertex index.
        vertex: usize,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// A vertex position has a NaN or infinite coordinate.
    #[error("vertex {vertex} has a non-finite position {position:?}")]
    NonFiniteVertex {
        /// The vertex index.
        vertex: usize,
        /// The offending position.
        position: [f64; 3],
    },

    /// A polygon face has fewer than three corners.
    #[error("face {face} has {corners} corners, need at least 3")]
    DegenerateFace {
        /// The face index.
        face: usize,
        /// Number of corners the face had.
        corners: usize,
    },

    /// The source vertex is not part of the graph.
    #[error("source vertex {index} out of range (graph has {vertex_count} vertices)")]
    InvalidSource {
        /// The requested source index.
        index: usize,
        /// Number of vertices in the graph.
        vertex_count: usize,
    },

    /// A vertex has no path from the source and the policy forbids substitution.
    #[error("vertex {vertex} is unreachable from the source")]
    UnreachableVertex {
        /// Lowest unreachable vertex index.
        vertex: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },

    /// A serialized field line could not be parsed.
    #[error("line {line}: cannot parse {value:?} as a float")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// The offending text.
        value: String,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FieldError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        FieldError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}
