//! Spatial indexing for position-to-face lookups
//!
//! This module is only available with the `spatial-index` feature.

use glam::{DVec3, Vec3};
use kiddo::immutable::float::kdtree::ImmutableKdTree;
use kiddo::SquaredEuclidean;

use crate::mesh::ObjMesh;
use crate::region::FaceId;

/// KD-tree over face centroids
///
/// Maps a 3D position to the face whose centroid is nearest, which is how
/// a picked point on a mesh becomes a region to seed or inspect.
///
/// # Performance
///
/// - Construction: O(n log n)
/// - Query: O(log n)
#[derive(Clone)]
pub struct FaceIndex {
    tree: Option<ImmutableKdTree<f32, usize, 3, 32>>,
    faces: Vec<FaceId>,
}

impl FaceIndex {
    /// Build an index from one centre per face
    ///
    /// # Example
    ///
    /// ```
    /// use surface_automata::*;
    ///
    /// let centers = vec![
    ///     DVec3::new(1.0, 0.0, 0.0),
    ///     DVec3::new(0.0, 1.0, 0.0),
    ///     DVec3::new(0.0, 0.0, 1.0),
    /// ];
    ///
    /// let index = FaceIndex::new(&centers);
    /// assert_eq!(index.find_nearest(DVec3::new(1.0, 0.1, 0.0)), Some(0));
    /// ```
    pub fn new(centers: &[DVec3]) -> Self {
        Self::from_pairs(centers.iter().copied().enumerate())
    }

    /// Build an index over the centroids of a mesh's faces
    ///
    /// Faces whose centroid cannot be computed (missing vertices) are left
    /// out of the index.
    pub fn from_mesh(mesh: &ObjMesh) -> Self {
        Self::from_pairs((0..mesh.face_count()).filter_map(|f| Some((f, mesh.face_centroid(f)?))))
    }

    fn from_pairs(pairs: impl Iterator<Item = (FaceId, DVec3)>) -> Self {
        let (faces, points): (Vec<FaceId>, Vec<[f32; 3]>) = pairs
            .map(|(face, c)| {
                let c = c.as_vec3();
                (face, [c.x, c.y, c.z])
            })
            .unzip();

        let tree = (!points.is_empty()).then(|| ImmutableKdTree::new_from_slice(&points));
        Self { tree, faces }
    }

    /// Number of indexed faces
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Check if the index holds no faces
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Face whose centre is nearest to `position`, or `None` when empty
    pub fn find_nearest(&self, position: DVec3) -> Option<FaceId> {
        let tree = self.tree.as_ref()?;
        let query: Vec3 = position.as_vec3();
        let result = tree.nearest_one::<SquaredEuclidean>(&[query.x, query.y, query.z]);
        self.faces.get(result.item).copied()
    }
}

impl std::fmt::Debug for FaceIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaceIndex")
            .field("faces", &self.faces.len())
            .finish()
    }
}
