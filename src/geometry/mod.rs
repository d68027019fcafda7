//! Face geometry: normals and planar flattening
//!
//! Each face is rotated into its own tangent plane so it can be laid out
//! flat in a texture atlas.

mod flatten;
mod normals;

pub use flatten::{
    flat_rotation, flatten_face, flatten_faces, DETERMINANT_TOLERANCE, NON_PLANAR_TOLERANCE,
};
pub use normals::{face_normal, face_normals, LENGTH_EPSILON};
