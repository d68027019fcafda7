//! Mesh surfaces: an automaton board made of polygon faces

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
#[cfg(feature = "spatial-index")]
use std::sync::OnceLock;

use glam::DVec3;

use crate::adjacency::{build_mesh_adjacency, AdjacencyMap};
use crate::atlas::{synthesize_scaled, TextureAtlas};
use crate::automaton::State;
use crate::config::ExportOptions;
use crate::error::{AutomataError, Result};
use crate::geometry::flatten_faces;
use crate::mesh::{load_obj, save_textured_obj, write_material_library, ObjLoadOptions, ObjMesh};
use crate::palette::{Rgb, StateColorMapper, BACKGROUND};
use crate::region::FaceId;

#[cfg(feature = "spatial-index")]
use crate::spatial::FaceIndex;

/// Files written by [`MeshSurface::export`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFiles {
    /// Textured OBJ
    pub obj: PathBuf,
    /// Material library
    pub material: PathBuf,
    /// Texture atlas PNG
    pub texture: PathBuf,
}

/// A loaded mesh together with its face adjacency
///
/// Faces are the regions: face `i` of the mesh is region `i` of the
/// adjacency map. The adjacency is shared so an [`Automaton`] can be built
/// over it without copying.
///
/// # Example
///
/// ```
/// use surface_automata::*;
///
/// let obj = "\
/// v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nv 0 0 1\nv 1 0 1\nv 1 1 1\nv 0 1 1\n\
/// f 1 4 3 2\nf 5 6 7 8\nf 1 2 6 5\nf 2 3 7 6\nf 3 4 8 7\nf 4 1 5 8\n";
/// let mesh = parse_obj(obj.as_bytes(), ObjLoadOptions::default()).unwrap();
/// let surface = MeshSurface::from_mesh(mesh).unwrap();
///
/// let initial = surface.random_state(3, 7);
/// let mut automaton = Automaton::new(surface.shared_adjacency(), initial, Rule::cyclic(3)).unwrap();
/// automaton.steps(5);
///
/// let colors = surface.face_colors(automaton.state(), &Palette::random(3, 7));
/// let atlas = surface.build_atlas(&colors, 8.0).unwrap();
/// assert_eq!(atlas.uvs.len(), 6);
/// ```
///
/// [`Automaton`]: crate::Automaton
#[derive(Debug, Clone)]
pub struct MeshSurface {
    mesh: ObjMesh,
    adjacency: Arc<AdjacencyMap<FaceId>>,

    /// Centroid index for position-to-face lookups, built on first lookup
    /// (requires spatial-index feature)
    #[cfg(feature = "spatial-index")]
    index: OnceLock<FaceIndex>,
}

impl MeshSurface {
    /// Build the face adjacency of a mesh
    ///
    /// # Errors
    ///
    /// Returns `EmptyMesh` if the mesh has no faces.
    pub fn from_mesh(mesh: ObjMesh) -> Result<Self> {
        if mesh.faces.is_empty() {
            return Err(AutomataError::EmptyMesh);
        }

        let adjacency = Arc::new(build_mesh_adjacency(&mesh.faces));
        let isolated = adjacency
            .iter()
            .filter(|(_, neighbors)| neighbors.is_empty())
            .count();
        if isolated > 0 {
            log::warn!("{} faces share no edge with any other face", isolated);
        }

        log::info!(
            "mesh surface ready: {} vertices, {} faces",
            mesh.vertex_count(),
            mesh.face_count()
        );

        Ok(Self {
            mesh,
            adjacency,
            #[cfg(feature = "spatial-index")]
            index: OnceLock::new(),
        })
    }

    /// Load an OBJ file and build its face adjacency
    pub fn load(path: impl AsRef<Path>, options: ObjLoadOptions) -> Result<Self> {
        Self::from_mesh(load_obj(path, options)?)
    }

    /// Number of faces (regions)
    #[inline]
    pub fn face_count(&self) -> usize {
        self.mesh.face_count()
    }

    /// The underlying mesh
    #[inline]
    pub fn mesh(&self) -> &ObjMesh {
        &self.mesh
    }

    /// Face adjacency map
    #[inline]
    pub fn adjacency(&self) -> &AdjacencyMap<FaceId> {
        &self.adjacency
    }

    /// Shared handle to the face adjacency map
    pub fn shared_adjacency(&self) -> Arc<AdjacencyMap<FaceId>> {
        Arc::clone(&self.adjacency)
    }

    /// Mean of a face's vertex positions
    pub fn face_centroid(&self, face: FaceId) -> Option<DVec3> {
        self.mesh.face_centroid(face)
    }

    /// Face whose centroid is nearest to `position`
    ///
    /// O(log n) via the centroid KD-tree, which the first call builds.
    #[cfg(feature = "spatial-index")]
    pub fn find_face_at(&self, position: DVec3) -> Option<FaceId> {
        self.index
            .get_or_init(|| FaceIndex::from_mesh(&self.mesh))
            .find_nearest(position)
    }

    /// Seeded random initial state over every face
    pub fn random_state(&self, colors: u32, seed: u64) -> State<FaceId> {
        State::random(&self.adjacency, colors, seed)
    }

    /// One colour per face, in face order
    pub fn face_colors<C>(&self, state: &State<FaceId>, mapper: &C) -> Vec<Rgb>
    where
        C: StateColorMapper + ?Sized,
    {
        (0..self.face_count())
            .map(|face| state.get(&face).map_or(BACKGROUND, |v| mapper.map_color(v)))
            .collect()
    }

    /// Flatten every face and pack the colours into an atlas
    ///
    /// # Errors
    ///
    /// Returns `DegenerateFace` if any face cannot be flattened, and the
    /// atlas errors of [`synthesize_scaled`].
    pub fn build_atlas(&self, colors: &[Rgb], pixels_per_unit: f64) -> Result<TextureAtlas> {
        let flattened = flatten_faces(&self.mesh)?;
        synthesize_scaled(&flattened, colors, pixels_per_unit)
    }

    /// Write `<stem>.obj`, `<stem>.mtl` and `<stem>.png` into `dir`
    ///
    /// The atlas is built first, so a degenerate face aborts the export
    /// before any file is created. Files go out texture first and OBJ last;
    /// if any write fails, the files already written are removed, so no OBJ
    /// is left pointing at a missing material or texture.
    pub fn export(
        &self,
        dir: impl AsRef<Path>,
        stem: &str,
        colors: &[Rgb],
        pixels_per_unit: f64,
    ) -> Result<ExportedFiles> {
        let atlas = self.build_atlas(colors, pixels_per_unit)?;

        let dir = dir.as_ref();
        let options = ExportOptions::with_stem(stem);
        let files = ExportedFiles {
            obj: dir.join(format!("{}.obj", stem)),
            material: dir.join(&options.material_library),
            texture: dir.join(&options.texture_file),
        };

        let mut attempted: Vec<&Path> = Vec::with_capacity(3);
        let result = (|| -> Result<()> {
            attempted.push(&files.texture);
            atlas.save_png(&files.texture)?;

            attempted.push(&files.material);
            let mut writer = BufWriter::new(File::create(&files.material)?);
            write_material_library(&mut writer, &options)?;
            writer.flush()?;

            attempted.push(&files.obj);
            save_textured_obj(&files.obj, &self.mesh, &atlas.uvs, &options)
        })();

        if let Err(e) = result {
            for path in attempted {
                if let Err(remove_err) = std::fs::remove_file(path) {
                    log::debug!("could not remove {}: {}", path.display(), remove_err);
                }
            }
            return Err(e);
        }

        Ok(files)
    }
}
