//! Mesh face adjacency
//!
//! Two faces are adjacent when they share an edge, i.e. the same two vertex
//! indices in either order. Winding is not checked, so meshes whose faces
//! are listed with inconsistent orientation still connect. Non-manifold
//! edges (shared by three or more faces) make every sharer a mutual
//! neighbour.

use std::collections::{BTreeSet, HashMap};

use super::AdjacencyMap;
use crate::region::FaceId;

/// Undirected edge key: the two vertex indices, smaller first
type EdgeKey = (usize, usize);

/// Type alias for edge-face ownership map
type EdgeFaceMap = HashMap<EdgeKey, Vec<FaceId>>;

#[inline]
fn edge_key(a: usize, b: usize) -> EdgeKey {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Iterate the boundary edges of a face, closing the loop back to the first vertex
fn face_edges(vertices: &[usize]) -> impl Iterator<Item = (usize, usize)> + '_ {
    let n = vertices.len();
    (0..n).map(move |i| (vertices[(i + n - 1) % n], vertices[i]))
}

/// Build map from each edge to every face that owns it
///
/// An edge and its reverse share one key, so a face wound the other way
/// still lands on the same entry.
fn build_edge_face_map<F: AsRef<[usize]>>(faces: &[F]) -> EdgeFaceMap {
    let mut map: EdgeFaceMap = HashMap::new();

    for (face_id, face) in faces.iter().enumerate() {
        for (a, b) in face_edges(face.as_ref()) {
            map.entry(edge_key(a, b)).or_default().push(face_id);
        }
    }

    map
}

/// Build the face-adjacency map of a polygon mesh
///
/// `faces` lists each face as its vertex indices. Face ids are positions in
/// that slice. Each face's neighbours are sorted ascending and never include
/// the face itself. A face sharing no edge has no neighbours.
///
/// Runs in time linear in the total edge count.
pub fn build_mesh_adjacency<F: AsRef<[usize]>>(faces: &[F]) -> AdjacencyMap<FaceId> {
    let edge_faces = build_edge_face_map(faces);

    let entries = faces.iter().enumerate().map(|(face_id, face)| {
        let mut neighbors = BTreeSet::new();
        for (a, b) in face_edges(face.as_ref()) {
            if let Some(owners) = edge_faces.get(&edge_key(a, b)) {
                neighbors.extend(owners.iter().copied().filter(|&other| other != face_id));
            }
        }
        (face_id, neighbors.into_iter().collect::<Vec<_>>())
    });

    let map = AdjacencyMap::from_entries(entries);
    log::debug!(
        "built mesh face adjacency: {} faces, {} edges, {} links",
        map.len(),
        edge_faces.len(),
        map.link_count()
    );
    map
}
