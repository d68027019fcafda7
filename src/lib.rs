//! Cellular automata over arbitrary adjacency graphs
//!
//! A standalone library for running cellular automata on a toroidal grid or
//! on the faces of a polygon mesh, and for baking a mesh generation into a
//! textured OBJ (flattened faces packed into a colour atlas).
//!
//! # Quick Start
//!
//! ```rust
//! use surface_automata::*;
//!
//! // A 64x64 Greenberg-Hastings board
//! let config = AutomatonConfigBuilder::new()
//!     .seed(42)
//!     .dimensions(64, 64).unwrap()
//!     .colors(5).unwrap()
//!     .greenberg_hastings()
//!     .build().unwrap();
//!
//! let map = build_grid_adjacency(config.width, config.height);
//! let initial = State::random(&map, config.colors, config.seed);
//! let mut automaton = Automaton::new(map, initial, config.rule.clone()).unwrap();
//!
//! automaton.steps(10);
//! let palette = Palette::random(config.colors, config.palette_seed);
//! let frame = render_grid(config.width, config.height, automaton.state(), &palette, 1);
//! assert_eq!(frame.dimensions(), (64, 64));
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): O(log n) position-to-face lookups using a KD-tree
//! - `parallel`: [`step_parallel`] evaluates regions on the rayon thread pool
//! - `serde`: serialization support for configuration, rules and grid cells

// Modules
pub mod error;
pub mod config;
pub mod region;
pub mod adjacency;
pub mod rules;
pub mod automaton;
pub mod geometry;
pub mod atlas;
pub mod mesh;
pub mod palette;
pub mod render;
pub mod surface;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{AutomataError, Result};
pub use config::{AutomatonConfig, AutomatonConfigBuilder, ExportOptions};
pub use region::{FaceId, GridCell, Region};
pub use adjacency::{build_grid_adjacency, build_mesh_adjacency, AdjacencyMap};
pub use rules::Rule;
pub use automaton::{step, validate_closed_world, Automaton, GenerationSink, RunSummary, State};
pub use geometry::{face_normal, face_normals, flat_rotation, flatten_face, flatten_faces};
pub use atlas::{largest_span, next_perfect_square, synthesize, synthesize_scaled, TextureAtlas};
pub use mesh::{load_obj, parse_obj, write_textured_obj, Face, ObjLoadOptions, ObjMesh};
pub use palette::{region_colors, GradientPalette, Palette, Rgb, StateColorMapper};
pub use render::{render_grid, FrameRecorder, PngSequence};
pub use surface::{ExportedFiles, MeshSurface};

#[cfg(feature = "parallel")]
pub use automaton::step_parallel;

#[cfg(feature = "spatial-index")]
pub use spatial::FaceIndex;

// Re-export glam vectors used in the public API
pub use glam::{DVec2, DVec3};
