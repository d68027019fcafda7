//! Face normals

use glam::DVec3;

use crate::error::{AutomataError, Result};
use crate::mesh::ObjMesh;
use crate::region::FaceId;

/// Vectors shorter than this are treated as zero
pub const LENGTH_EPSILON: f64 = 1e-12;

/// First three vertex positions of a face
pub(crate) fn leading_triangle(mesh: &ObjMesh, face: FaceId) -> Result<[DVec3; 3]> {
    let vertices = &mesh
        .faces
        .get(face)
        .ok_or_else(|| AutomataError::degenerate(face, "face does not exist"))?
        .vertices;

    if vertices.len() < 3 {
        return Err(AutomataError::degenerate(
            face,
            format!("face has {} vertices, at least 3 are needed", vertices.len()),
        ));
    }

    let mut points = [DVec3::ZERO; 3];
    for (slot, &index) in points.iter_mut().zip(vertices) {
        *slot = mesh.vertex(index).ok_or_else(|| {
            AutomataError::degenerate(face, format!("vertex {} does not exist", index))
        })?;
    }
    Ok(points)
}

/// Normal of a face from its first two edges
///
/// Computed as `(p1 - p2) x (p2 - p3)` over the face's first three
/// vertices, without normalisation. The direction follows the winding, so
/// normals of a mesh are not guaranteed to point consistently outward.
///
/// # Errors
///
/// Returns `DegenerateFace` for a face with fewer than three vertices, a
/// missing vertex, or collinear leading vertices (zero-length normal).
pub fn face_normal(mesh: &ObjMesh, face: FaceId) -> Result<DVec3> {
    let [p1, p2, p3] = leading_triangle(mesh, face)?;
    let a = p1 - p2;
    let b = p2 - p3;
    let normal = a.cross(b);

    if normal.length() < LENGTH_EPSILON {
        return Err(AutomataError::degenerate(
            face,
            "first three vertices are collinear (zero-area normal)",
        ));
    }
    Ok(normal)
}

/// Normals of every face, in face order
pub fn face_normals(mesh: &ObjMesh) -> Result<Vec<DVec3>> {
    (0..mesh.face_count())
        .map(|face| face_normal(mesh, face))
        .collect()
}
