//! Wavefront OBJ reading and textured writing

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use glam::{DVec2, DVec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{Face, ObjMesh};
use crate::config::ExportOptions;
use crate::error::{AutomataError, Result};

/// Options for reading OBJ files
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ObjLoadOptions {
    /// Swap the Y and Z coordinate of every vertex (Z-up to Y-up)
    pub swap_yz: bool,
}

impl ObjLoadOptions {
    /// Options with the Y/Z swap enabled
    pub fn swapped() -> Self {
        Self { swap_yz: true }
    }
}

/// A face as read, before its indices are checked against the vertex list
struct PendingFace {
    line: usize,
    vertices: Vec<i64>,
    tex_coords: Vec<i64>,
}

/// Parse OBJ text into a mesh
///
/// Reads `v`, `vt` and `f` lines. Face corners may be written as `v`,
/// `v/vt`, `v/vt/vn` or `v//vn`; negative indices count back from the
/// last element defined so far. Normals, objects, smoothing groups and
/// material directives are ignored. Group lines are ignored with a warning
/// because adjacency cannot bridge separate groups.
///
/// # Errors
///
/// Fails on the first malformed line with its 1-based line number: a
/// non-numeric coordinate, a face with fewer than three corners, or an
/// index that does not refer to a defined vertex or texture coordinate.
/// No partial mesh is returned.
pub fn parse_obj<R: BufRead>(reader: R, options: ObjLoadOptions) -> Result<ObjMesh> {
    let mut vertices = Vec::new();
    let mut tex_coords = Vec::new();
    let mut pending = Vec::new();
    let mut groups = 0usize;

    for (line_idx, line) in reader.lines().enumerate() {
        let line_no = line_idx + 1;
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let Some(keyword) = tokens.next() else {
            continue;
        };

        match keyword {
            "v" => {
                let x = parse_float(line_no, "vertex", tokens.next())?;
                let y = parse_float(line_no, "vertex", tokens.next())?;
                let z = parse_float(line_no, "vertex", tokens.next())?;
                let position = if options.swap_yz {
                    DVec3::new(x, z, y)
                } else {
                    DVec3::new(x, y, z)
                };
                vertices.push(position);
            }
            "vt" => {
                let u = parse_float(line_no, "texture coordinate", tokens.next())?;
                let v = match tokens.next() {
                    Some(token) => parse_float(line_no, "texture coordinate", Some(token))?,
                    None => 0.0,
                };
                tex_coords.push(DVec2::new(u, v));
            }
            "f" => {
                pending.push(parse_face(
                    line_no,
                    tokens,
                    vertices.len(),
                    tex_coords.len(),
                )?);
            }
            "g" => {
                groups += 1;
                if groups == 2 {
                    log::warn!(
                        "line {}: mesh has more than one group; faces in different groups only connect through shared vertex indices",
                        line_no
                    );
                }
            }
            "vn" | "vp" | "o" | "s" | "usemtl" | "mtllib" | "l" | "p" => {}
            other => {
                log::debug!("line {}: ignoring unsupported directive '{}'", line_no, other);
            }
        }
    }

    let faces = pending
        .into_iter()
        .map(|face| resolve_face(face, vertices.len(), tex_coords.len()))
        .collect::<Result<Vec<_>>>()?;

    log::info!(
        "parsed OBJ: {} vertices, {} texture coordinates, {} faces",
        vertices.len(),
        tex_coords.len(),
        faces.len()
    );

    Ok(ObjMesh {
        vertices,
        tex_coords,
        faces,
    })
}

/// Load an OBJ file from disk
pub fn load_obj(path: impl AsRef<Path>, options: ObjLoadOptions) -> Result<ObjMesh> {
    let path = path.as_ref();
    log::debug!("loading mesh from {}", path.display());
    let file = File::open(path)?;
    parse_obj(BufReader::new(file), options)
}

fn parse_float(line: usize, what: &str, token: Option<&str>) -> Result<f64> {
    let token = token.ok_or_else(|| AutomataError::parse(line, format!("{} is missing a component", what)))?;
    let value: f64 = token
        .parse()
        .map_err(|_| AutomataError::parse(line, format!("invalid {} component '{}'", what, token)))?;
    if !value.is_finite() {
        return Err(AutomataError::parse(line, format!("non-finite {} component '{}'", what, token)));
    }
    Ok(value)
}

/// Parse one index; negative values are relative to `defined`
fn parse_index(line: usize, token: &str, defined: usize) -> Result<i64> {
    let raw: i64 = token
        .parse()
        .map_err(|_| AutomataError::parse(line, format!("invalid index '{}'", token)))?;
    match raw {
        0 => Err(AutomataError::parse(line, "index 0 is not valid, OBJ indices start at 1")),
        i if i < 0 => Ok(defined as i64 + i + 1),
        i => Ok(i),
    }
}

fn parse_face<'a>(
    line: usize,
    corners: impl Iterator<Item = &'a str>,
    vertices_defined: usize,
    tex_defined: usize,
) -> Result<PendingFace> {
    let mut vertices = Vec::new();
    let mut tex_coords = Vec::new();

    for corner in corners {
        let mut parts = corner.split('/');
        let vertex = parts.next().unwrap_or_default();
        vertices.push(parse_index(line, vertex, vertices_defined)?);

        match parts.next() {
            Some(tex) if !tex.is_empty() => tex_coords.push(parse_index(line, tex, tex_defined)?),
            _ => {}
        }
    }

    if vertices.len() < 3 {
        return Err(AutomataError::parse(
            line,
            format!("face needs at least 3 vertices, found {}", vertices.len()),
        ));
    }
    if !tex_coords.is_empty() && tex_coords.len() != vertices.len() {
        return Err(AutomataError::parse(
            line,
            "face mixes corners with and without texture coordinates",
        ));
    }

    Ok(PendingFace {
        line,
        vertices,
        tex_coords,
    })
}

fn resolve_face(face: PendingFace, vertex_count: usize, tex_count: usize) -> Result<Face> {
    let vertices = face
        .vertices
        .iter()
        .map(|&index| {
            if index >= 1 && (index as usize) <= vertex_count {
                Ok(index as usize - 1)
            } else {
                Err(AutomataError::MissingVertex {
                    line: face.line,
                    index,
                    vertex_count,
                })
            }
        })
        .collect::<Result<Vec<_>>>()?;

    let tex_coords = face
        .tex_coords
        .iter()
        .map(|&index| {
            if index >= 1 && (index as usize) <= tex_count {
                Ok(index as usize - 1)
            } else {
                Err(AutomataError::parse(
                    face.line,
                    format!(
                        "texture coordinate {} out of range ({} defined)",
                        index, tex_count
                    ),
                ))
            }
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Face {
        vertices,
        tex_coords,
    })
}

/// Write a mesh with per-face texture coordinates as OBJ text
///
/// Output order: material library, vertices, texture coordinates (face by
/// face, corner by corner), material use, faces. Faces pair each vertex
/// with its own texture coordinate; texture indices count up from 1 across
/// the whole file.
///
/// # Errors
///
/// Returns `FaceCountMismatch` if `uvs` does not hold one list per face,
/// `UvMismatch` if a list does not hold one coordinate per corner, or an
/// I/O error from the writer.
pub fn write_textured_obj<W: Write>(
    writer: &mut W,
    mesh: &ObjMesh,
    uvs: &[Vec<DVec2>],
    options: &ExportOptions,
) -> Result<()> {
    if uvs.len() != mesh.face_count() {
        return Err(AutomataError::FaceCountMismatch {
            faces: mesh.face_count(),
            got: uvs.len(),
        });
    }
    for (face_id, (face, face_uvs)) in mesh.faces.iter().zip(uvs).enumerate() {
        if face.len() != face_uvs.len() {
            return Err(AutomataError::UvMismatch {
                face: face_id,
                vertices: face.len(),
                uvs: face_uvs.len(),
            });
        }
    }

    writeln!(writer, "mtllib {}", options.material_library)?;

    for v in &mesh.vertices {
        writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
    }

    for uv in uvs.iter().flatten() {
        writeln!(writer, "vt {} {}", uv.x, uv.y)?;
    }

    writeln!(writer, "usemtl {}", options.material_name)?;

    let mut tex_index = 1;
    for face in &mesh.faces {
        write!(writer, "f")?;
        for &vertex in &face.vertices {
            write!(writer, " {}/{}", vertex + 1, tex_index)?;
            tex_index += 1;
        }
        writeln!(writer)?;
    }

    Ok(())
}

/// Write a textured mesh to an OBJ file
pub fn save_textured_obj(
    path: impl AsRef<Path>,
    mesh: &ObjMesh,
    uvs: &[Vec<DVec2>],
    options: &ExportOptions,
) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_textured_obj(&mut writer, mesh, uvs, options)?;
    writer.flush()?;
    log::info!("wrote textured mesh to {}", path.display());
    Ok(())
}

/// Write the material library referenced by a textured OBJ
///
/// Declares one material whose diffuse map is the texture atlas.
pub fn write_material_library<W: Write>(writer: &mut W, options: &ExportOptions) -> Result<()> {
    writeln!(writer, "newmtl {}", options.material_name)?;
    writeln!(writer, "Ka 1.000 1.000 1.000")?;
    writeln!(writer, "Kd 1.000 1.000 1.000")?;
    writeln!(writer, "Ks 0.000 0.000 0.000")?;
    writeln!(writer, "d 1.0")?;
    writeln!(writer, "illum 1")?;
    writeln!(writer, "map_Kd {}", options.texture_file)?;
    Ok(())
}
