//! Planar flattening of mesh faces
//!
//! A face is flattened by an orthonormal change of basis whose rows are
//! the binormal, the unit first edge and the unit normal. After rotation
//! the third component is the distance along the normal, constant over a
//! planar face, and is dropped; the first two components are the face's
//! 2D shape with edge lengths and angles preserved.

use glam::{DMat3, DVec2, DVec3};

use super::normals::{face_normal, leading_triangle, LENGTH_EPSILON};
use crate::error::{AutomataError, Result};
use crate::mesh::ObjMesh;
use crate::region::FaceId;

/// Largest accepted deviation of `|det|` from 1 for a rotation basis
pub const DETERMINANT_TOLERANCE: f64 = 1e-6;

/// Relative spread of normal-axis depths above which a face is reported as
/// not quite planar
const PLANARITY_TOLERANCE: f64 = 1e-6;

/// Relative spread of normal-axis depths above which a face is rejected
pub const NON_PLANAR_TOLERANCE: f64 = 1e-3;

/// Build the rotation taking a face into its tangent plane
///
/// Rows: `edge x normal` (binormal), `edge` and `normal`, both inputs
/// normalised first. Applying the matrix to the normal yields `(0, 0, 1)`.
///
/// # Errors
///
/// Returns `DegenerateFace` if either vector has zero length, or if the
/// resulting basis is not orthonormal (`|det|` off 1 by more than
/// [`DETERMINANT_TOLERANCE`]), which happens when `edge` is not
/// perpendicular to `normal`.
pub fn flat_rotation(face: FaceId, edge: DVec3, normal: DVec3) -> Result<DMat3> {
    let edge_length = edge.length();
    if edge_length < LENGTH_EPSILON {
        return Err(AutomataError::degenerate(face, "first edge has zero length"));
    }
    let normal_length = normal.length();
    if normal_length < LENGTH_EPSILON {
        return Err(AutomataError::degenerate(face, "normal has zero length"));
    }

    let edge = edge / edge_length;
    let normal = normal / normal_length;
    let binormal = edge.cross(normal);

    let rotation = DMat3::from_cols(binormal, edge, normal).transpose();
    let det = rotation.determinant();
    if (det.abs() - 1.0).abs() > DETERMINANT_TOLERANCE {
        return Err(AutomataError::degenerate(
            face,
            format!("rotation basis is not orthonormal (determinant {:.9})", det),
        ));
    }

    Ok(rotation)
}

/// Flatten one face into 2D points, one per vertex in winding order
///
/// X runs along the binormal, Y along the face's first edge (`p1 - p2`).
///
/// Depths along the normal are compared relative to the face size (at
/// least 1). A spread above `1e-6` is logged and projected away; a spread
/// above [`NON_PLANAR_TOLERANCE`] is an error.
///
/// # Errors
///
/// Returns `DegenerateFace` for a face that has no usable normal or first
/// edge, references a missing vertex, or is not planar.
pub fn flatten_face(mesh: &ObjMesh, face: FaceId) -> Result<Vec<DVec2>> {
    let normal = face_normal(mesh, face)?;
    let [p1, p2, _] = leading_triangle(mesh, face)?;
    let rotation = flat_rotation(face, p1 - p2, normal)?;

    let positions = mesh
        .face_positions(face)
        .ok_or_else(|| AutomataError::degenerate(face, "face references a missing vertex"))?;
    let rotated: Vec<DVec3> = positions.iter().map(|&p| rotation * p).collect();

    let (min_depth, max_depth) = rotated
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
            (lo.min(r.z), hi.max(r.z))
        });
    let scale = positions
        .iter()
        .map(|p| (*p - p1).length())
        .fold(0.0, f64::max)
        .max(1.0);
    let spread = max_depth - min_depth;
    if spread > NON_PLANAR_TOLERANCE * scale {
        return Err(AutomataError::degenerate(
            face,
            format!("face is not planar (depth spread {:.3e})", spread),
        ));
    }
    if spread > PLANARITY_TOLERANCE * scale {
        log::warn!(
            "face {} is not planar (depth spread {:.3e}); flattening projects it",
            face,
            spread
        );
    }

    Ok(rotated.into_iter().map(|r| DVec2::new(r.x, r.y)).collect())
}

/// Flatten every face of a mesh, in face order
///
/// Aborts on the first degenerate face: a single bad face would poison
/// the whole atlas.
pub fn flatten_faces(mesh: &ObjMesh) -> Result<Vec<Vec<DVec2>>> {
    let flattened = (0..mesh.face_count())
        .map(|face| flatten_face(mesh, face))
        .collect::<Result<Vec<_>>>()?;
    log::debug!("flattened {} faces", flattened.len());
    Ok(flattened)
}
