//! Texture atlas synthesis
//!
//! Packs one solid-colour cell per colour into a square image and maps each
//! face's flattened outline into the middle of its cell. Cells are filled
//! row-major; colours past the last face and unused cells stay black.

use std::path::Path;

use glam::DVec2;
use image::{ImageFormat, Rgb as Pixel, RgbImage};

use crate::error::{AutomataError, Result};
use crate::palette::Rgb;

/// Cell size as a multiple of the largest face span
pub const CELL_MARGIN: f64 = 3.0;

/// Smallest perfect square greater than or equal to `n`
///
/// Saturates at `usize::MAX` when the next square does not fit.
///
/// ```rust
/// use surface_automata::next_perfect_square;
///
/// assert_eq!(next_perfect_square(4), 4);
/// assert_eq!(next_perfect_square(5), 9);
/// assert_eq!(next_perfect_square(10), 16);
/// ```
pub fn next_perfect_square(n: usize) -> usize {
    let root = integer_sqrt(n);
    if root * root == n {
        n
    } else {
        (root + 1).saturating_mul(root + 1)
    }
}

/// Floor of the square root, exact for every `usize`
fn integer_sqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    while root.checked_mul(root).map_or(true, |sq| sq > n) {
        root -= 1;
    }
    while (root + 1).checked_mul(root + 1).is_some_and(|sq| sq <= n) {
        root += 1;
    }
    root
}

/// Largest x or y distance between two points of the same face
pub fn largest_span(faces: &[Vec<DVec2>]) -> f64 {
    faces
        .iter()
        .filter(|face| !face.is_empty())
        .map(|face| {
            let (min, max) = bounds(face);
            let extent = max - min;
            extent.x.max(extent.y)
        })
        .fold(0.0, f64::max)
}

fn bounds(points: &[DVec2]) -> (DVec2, DVec2) {
    points.iter().fold(
        (DVec2::splat(f64::INFINITY), DVec2::splat(f64::NEG_INFINITY)),
        |(lo, hi), p| (lo.min(*p), hi.max(*p)),
    )
}

/// A square colour atlas and the UV coordinates into it
#[derive(Debug, Clone)]
pub struct TextureAtlas {
    /// Atlas raster, `cells_per_side * cell_size` pixels square
    pub image: RgbImage,
    /// Number of cells along each side
    pub cells_per_side: u32,
    /// Edge length of one cell in pixels
    pub cell_size: u32,
    /// Per-face UV coordinates, one per flattened point
    pub uvs: Vec<Vec<DVec2>>,
}

impl TextureAtlas {
    /// Side length of the atlas in pixels
    pub fn size(&self) -> u32 {
        self.image.width()
    }

    /// Total number of UV coordinates over all faces
    pub fn uv_count(&self) -> usize {
        self.uvs.iter().map(Vec::len).sum()
    }

    /// Colour of the cell at `(x, y)`, or `None` outside the grid
    pub fn cell_color(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.cells_per_side || y >= self.cells_per_side {
            return None;
        }
        let pixel = self.image.get_pixel(x * self.cell_size, y * self.cell_size);
        Some(pixel.0)
    }

    /// Save the atlas as a PNG
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.image.save_with_format(path, ImageFormat::Png)?;
        log::info!(
            "saved {}x{} texture atlas to {}",
            self.size(),
            self.size(),
            path.display()
        );
        Ok(())
    }
}

/// Build an atlas at one pixel per mesh unit
///
/// See [`synthesize_scaled`].
pub fn synthesize(faces: &[Vec<DVec2>], colors: &[Rgb]) -> Result<TextureAtlas> {
    synthesize_scaled(faces, colors, 1.0)
}

/// Build an atlas, scaling mesh units to pixels by `pixels_per_unit`
///
/// The grid holds `next_perfect_square(colors.len())` cells, each
/// `ceil(3 * largest_span * pixels_per_unit)` pixels (at least one).
/// Colour `i` fills cell `i` in row-major order while `i` is below the face
/// count; later colours and unused cells are painted black. Face `i` is
/// centred on cell `i`, and UVs are normalised by the atlas size with V
/// flipped so the origin sits at the bottom left.
///
/// # Errors
///
/// Returns `EmptyMesh` if there are no colours, `FaceCountMismatch` if
/// there are fewer colours than faces, and `InvalidConfig` for a
/// non-positive scale or an atlas too large to allocate.
pub fn synthesize_scaled(
    faces: &[Vec<DVec2>],
    colors: &[Rgb],
    pixels_per_unit: f64,
) -> Result<TextureAtlas> {
    if colors.is_empty() {
        return Err(AutomataError::EmptyMesh);
    }
    if colors.len() < faces.len() {
        return Err(AutomataError::FaceCountMismatch {
            faces: faces.len(),
            got: colors.len(),
        });
    }
    if !(pixels_per_unit.is_finite() && pixels_per_unit > 0.0) {
        return Err(AutomataError::InvalidConfig(format!(
            "pixels per unit must be positive (got {})",
            pixels_per_unit
        )));
    }

    let span = largest_span(faces) * CELL_MARGIN * pixels_per_unit;
    let cells_per_side = integer_sqrt(next_perfect_square(colors.len()));
    let cell_size = (span.ceil() as u64).max(1);
    let side = cells_per_side as u64 * cell_size;
    let too_large = || {
        AutomataError::InvalidConfig(format!(
            "atlas of {} cells at {} px per cell is too large",
            cells_per_side, cell_size
        ))
    };
    let side = u32::try_from(side).map_err(|_| too_large())?;
    let cells_per_side = u32::try_from(cells_per_side).map_err(|_| too_large())?;
    let cell_size = u32::try_from(cell_size).map_err(|_| too_large())?;

    let mut image = RgbImage::new(side, side);
    let size = side as f64;
    let half = cell_size as f64 / 2.0;
    let mut uvs = Vec::with_capacity(faces.len());

    for (index, (face, color)) in faces.iter().zip(colors).enumerate() {
        let cell_x = index as u32 % cells_per_side;
        let cell_y = index as u32 / cells_per_side;
        let origin_x = cell_x * cell_size;
        let origin_y = cell_y * cell_size;

        for py in origin_y..origin_y + cell_size {
            for px in origin_x..origin_x + cell_size {
                image.put_pixel(px, py, Pixel(*color));
            }
        }

        let center = if face.is_empty() {
            DVec2::ZERO
        } else {
            let (min, max) = bounds(face);
            (min + max) / 2.0
        };
        let offset = DVec2::new(origin_x as f64 + half, origin_y as f64 + half);
        uvs.push(
            face.iter()
                .map(|p| {
                    let local = (*p - center) * pixels_per_unit + offset;
                    DVec2::new(local.x / size, 1.0 - local.y / size)
                })
                .collect(),
        );
    }

    log::info!(
        "packed {} faces ({} colours) into a {}x{} atlas ({} px cells)",
        faces.len(),
        colors.len(),
        cells_per_side,
        cells_per_side,
        cell_size
    );

    Ok(TextureAtlas {
        image,
        cells_per_side,
        cell_size,
        uvs,
    })
}
