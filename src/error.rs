//! Error types for automaton, geometry and mesh I/O operations

use thiserror::Error;

/// Errors that can occur while building boards, flattening meshes or
/// reading and writing files
#[derive(Debug, Error)]
pub enum AutomataError {
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A mesh line could not be parsed
    #[error("parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number of the offending line
        line: usize,
        /// Description of what was wrong
        message: String,
    },

    /// A face references a vertex that does not exist
    #[error("line {line}: face references vertex {index} but only {vertex_count} vertices are defined")]
    MissingVertex {
        /// 1-based line number of the face
        line: usize,
        /// The 1-based index as written in the file
        index: i64,
        /// Number of vertices in the mesh
        vertex_count: usize,
    },

    /// A face cannot be flattened (zero-length edge, zero-area or non-planar basis)
    #[error("face {face} is degenerate: {reason}")]
    DegenerateFace {
        /// Index of the face
        face: usize,
        /// What made it degenerate
        reason: String,
    },

    /// A region in the adjacency map has no entry in the state assignment
    #[error("region {0} is missing from the state assignment")]
    MissingRegion(String),

    /// Per-face input (colours, texture coordinate lists) does not cover the faces
    #[error("expected one entry per face: {faces} faces, {got} supplied")]
    FaceCountMismatch {
        /// Number of faces
        faces: usize,
        /// Number of entries supplied
        got: usize,
    },

    /// A face's texture coordinates do not line up with its vertices
    #[error("face {face} has {vertices} vertices but {uvs} texture coordinates")]
    UvMismatch {
        /// Index of the face
        face: usize,
        /// Vertex count of the face
        vertices: usize,
        /// Texture coordinates supplied for it
        uvs: usize,
    },

    /// The mesh has no faces
    #[error("mesh has no faces")]
    EmptyMesh,

    /// I/O error from the standard library
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image encoding error
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

impl AutomataError {
    /// Create a `Parse` error for the given line.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create a `DegenerateFace` error for the given face.
    pub fn degenerate(face: usize, reason: impl Into<String>) -> Self {
        Self::DegenerateFace {
            face,
            reason: reason.into(),
        }
    }
}

/// Result type alias for automaton operations
pub type Result<T> = std::result::Result<T, AutomataError>;
