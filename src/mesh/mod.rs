//! Polygon meshes
//!
//! Plain vertex/face data loaded from, and written back to, Wavefront OBJ
//! text. Vertex and texture-coordinate indices are 0-based in memory and
//! 1-based on disk.

mod obj;

pub use obj::{
    load_obj, parse_obj, save_textured_obj, write_material_library, write_textured_obj,
    ObjLoadOptions,
};

use glam::{DVec2, DVec3};

/// One polygon of a mesh
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Face {
    /// Vertex indices in winding order (at least three for a valid face)
    pub vertices: Vec<usize>,
    /// Texture-coordinate indices, one per vertex, or empty when untextured
    pub tex_coords: Vec<usize>,
}

impl Face {
    /// Create an untextured face
    pub fn new(vertices: Vec<usize>) -> Self {
        Self {
            vertices,
            tex_coords: Vec::new(),
        }
    }

    /// Number of vertices (and edges)
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Check if the face has no vertices
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl AsRef<[usize]> for Face {
    fn as_ref(&self) -> &[usize] {
        &self.vertices
    }
}

/// A polygon mesh: vertex positions, optional texture coordinates, faces
///
/// Meshes are loaded once and treated as immutable; adjacency and
/// flattening both read from the same vertex and face lists.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjMesh {
    /// Vertex positions
    pub vertices: Vec<DVec3>,
    /// Texture coordinates (`vt` lines), empty for untextured meshes
    pub tex_coords: Vec<DVec2>,
    /// Faces in file order; a face's position is its face id
    pub faces: Vec<Face>,
}

impl ObjMesh {
    /// Create a mesh from vertex positions and faces given as index lists
    pub fn new(vertices: Vec<DVec3>, faces: Vec<Vec<usize>>) -> Self {
        Self {
            vertices,
            tex_coords: Vec::new(),
            faces: faces.into_iter().map(Face::new).collect(),
        }
    }

    /// Number of vertices
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Total number of face corners (sum of face vertex counts)
    pub fn corner_count(&self) -> usize {
        self.faces.iter().map(Face::len).sum()
    }

    /// Check if the mesh has no faces
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Position of a vertex
    #[inline]
    pub fn vertex(&self, index: usize) -> Option<DVec3> {
        self.vertices.get(index).copied()
    }

    /// Vertex positions of a face in winding order
    ///
    /// Returns `None` if the face does not exist or references a missing vertex.
    pub fn face_positions(&self, face: usize) -> Option<Vec<DVec3>> {
        self.faces
            .get(face)?
            .vertices
            .iter()
            .map(|&i| self.vertex(i))
            .collect()
    }

    /// Average of a face's vertex positions
    pub fn face_centroid(&self, face: usize) -> Option<DVec3> {
        let positions = self.face_positions(face)?;
        if positions.is_empty() {
            return None;
        }
        let sum: DVec3 = positions.iter().copied().sum();
        Some(sum / positions.len() as f64)
    }
}
