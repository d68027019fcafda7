//! Headless rendering of grid boards
//!
//! Grid generations become images, one square block of pixels per cell.
//! Sinks in this module plug into [`Automaton::run`](crate::Automaton::run)
//! so a run can be recorded without any display.

use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgb as Pixel, RgbImage};

use crate::automaton::{GenerationSink, State};
use crate::error::{AutomataError, Result};
use crate::palette::{StateColorMapper, BACKGROUND};
use crate::region::GridCell;

/// Pixel length of `cells` cells at `scale` pixels each, clamped to `u32::MAX`
fn image_side(cells: usize, scale: u32) -> u32 {
    u32::try_from(cells).unwrap_or(u32::MAX).saturating_mul(scale)
}

/// Draw a grid state, `scale` pixels per cell edge
///
/// Cell `(x, y)` covers pixels `x * scale .. (x + 1) * scale` horizontally
/// and the matching rows vertically. Cells missing from the state are drawn
/// as [`BACKGROUND`]. A `scale` of 0 is treated as 1.
pub fn render_grid<C>(
    width: usize,
    height: usize,
    state: &State<GridCell>,
    mapper: &C,
    scale: u32,
) -> RgbImage
where
    C: StateColorMapper + ?Sized,
{
    let scale = scale.max(1);
    RgbImage::from_fn(image_side(width, scale), image_side(height, scale), |px, py| {
        let cell = GridCell::new((px / scale) as usize, (py / scale) as usize);
        Pixel(
            state
                .get(&cell)
                .map_or(BACKGROUND, |value| mapper.map_color(value)),
        )
    })
}

/// Keeps every rendered generation in memory
pub struct FrameRecorder<'a, C: StateColorMapper + ?Sized> {
    width: usize,
    height: usize,
    scale: u32,
    mapper: &'a C,
    frames: Vec<RgbImage>,
    limit: Option<usize>,
}

impl<'a, C: StateColorMapper + ?Sized> FrameRecorder<'a, C> {
    /// Record generations of a `width` x `height` grid
    pub fn new(width: usize, height: usize, mapper: &'a C) -> Self {
        Self {
            width,
            height,
            scale: 1,
            mapper,
            frames: Vec::new(),
            limit: None,
        }
    }

    /// Pixels per cell edge
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    /// Ask the run to stop once this many frames are held
    pub fn with_limit(mut self, frames: usize) -> Self {
        self.limit = Some(frames);
        self
    }

    /// Frames recorded so far, oldest first
    pub fn frames(&self) -> &[RgbImage] {
        &self.frames
    }

    /// Take the recorded frames
    pub fn into_frames(self) -> Vec<RgbImage> {
        self.frames
    }
}

impl<C: StateColorMapper + ?Sized> GenerationSink<GridCell> for FrameRecorder<'_, C> {
    fn accept(&mut self, _generation: usize, state: &State<GridCell>) -> ControlFlow<()> {
        self.frames
            .push(render_grid(self.width, self.height, state, self.mapper, self.scale));
        match self.limit {
            Some(limit) if self.frames.len() >= limit => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    }
}

/// Writes each generation to `<dir>/<prefix>_<generation>.png`
///
/// A failed write stops the run; the error is held until [`finish`]
/// hands it back.
///
/// [`finish`]: PngSequence::finish
pub struct PngSequence<'a, C: StateColorMapper + ?Sized> {
    dir: PathBuf,
    prefix: String,
    width: usize,
    height: usize,
    scale: u32,
    mapper: &'a C,
    written: Vec<PathBuf>,
    error: Option<AutomataError>,
}

impl<'a, C: StateColorMapper + ?Sized> PngSequence<'a, C> {
    /// Write frames of a `width` x `height` grid into `dir`
    ///
    /// The directory must already exist.
    pub fn new(
        dir: impl AsRef<Path>,
        prefix: &str,
        width: usize,
        height: usize,
        mapper: &'a C,
    ) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            prefix: prefix.to_string(),
            width,
            height,
            scale: 1,
            mapper,
            written: Vec::new(),
            error: None,
        }
    }

    /// Pixels per cell edge
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    /// Path the given generation is written to
    pub fn frame_path(&self, generation: usize) -> PathBuf {
        self.dir
            .join(format!("{}_{:05}.png", self.prefix, generation))
    }

    /// Finish the sequence, returning the files written
    ///
    /// # Errors
    ///
    /// Returns the write error that stopped the run, if any.
    pub fn finish(self) -> Result<Vec<PathBuf>> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.written),
        }
    }
}

impl<C: StateColorMapper + ?Sized> GenerationSink<GridCell> for PngSequence<'_, C> {
    fn accept(&mut self, generation: usize, state: &State<GridCell>) -> ControlFlow<()> {
        let path = self.frame_path(generation);
        let image = render_grid(self.width, self.height, state, self.mapper, self.scale);
        match image.save_with_format(&path, ImageFormat::Png) {
            Ok(()) => {
                log::debug!("wrote frame {}", path.display());
                self.written.push(path);
                ControlFlow::Continue(())
            }
            Err(e) => {
                log::error!("failed to write frame {}: {}", path.display(), e);
                self.error = Some(e.into());
                ControlFlow::Break(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjacency::build_grid_adjacency;
    use crate::automaton::Automaton;
    use crate::palette::Palette;
    use crate::rules::Rule;

    #[test]
    fn test_image_side_saturates() {
        assert_eq!(image_side(3, 2), 6);
        assert_eq!(image_side(70_000, 70_000), u32::MAX);
        assert_eq!(image_side(usize::MAX, 1), u32::MAX);
    }

    fn checkerboard(width: usize, height: usize) -> State<GridCell> {
        State::from_values(
            (0..width).flat_map(|x| (0..height).map(move |y| (GridCell::new(x, y), ((x + y) % 2) as u32))),
        )
    }

    #[test]
    fn test_render_grid_pixels() {
        let palette = Palette::monochrome();
        let image = render_grid(3, 2, &checkerboard(3, 2), &palette, 1);
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(image.get_pixel(1, 0).0, [255, 255, 255]);
        assert_eq!(image.get_pixel(0, 1).0, [255, 255, 255]);
        assert_eq!(image.get_pixel(2, 1).0, [255, 255, 255]);
    }

    #[test]
    fn test_render_grid_scaled() {
        let palette = Palette::monochrome();
        let image = render_grid(2, 2, &checkerboard(2, 2), &palette, 4);
        assert_eq!(image.dimensions(), (8, 8));
        assert_eq!(image.get_pixel(3, 3).0, [0, 0, 0]);
        assert_eq!(image.get_pixel(4, 3).0, [255, 255, 255]);
        assert_eq!(image.get_pixel(7, 7).0, [0, 0, 0]);
    }

    #[test]
    fn test_missing_cells_are_background() {
        let palette = Palette::from_colors(vec![[9, 9, 9]]);
        let state = State::from_values(vec![(GridCell::new(0, 0), 0)]);
        let image = render_grid(2, 1, &state, &palette, 1);
        assert_eq!(image.get_pixel(0, 0).0, [9, 9, 9]);
        assert_eq!(image.get_pixel(1, 0).0, BACKGROUND);
    }

    #[test]
    fn test_frame_recorder_limit_stops_run() {
        let map = build_grid_adjacency(6, 6);
        let initial = State::random(&map, 3, 5);
        let mut automaton = Automaton::new(map, initial, Rule::cyclic(3)).unwrap();
        let palette = Palette::random(3, 5);

        let mut recorder = FrameRecorder::new(6, 6, &palette).with_limit(4);
        let summary = automaton.run(Some(100), &mut recorder).unwrap();

        assert!(summary.stopped_by_sink);
        assert_eq!(recorder.frames().len(), 4);
        assert_eq!(recorder.into_frames()[0].dimensions(), (6, 6));
    }

    #[test]
    fn test_png_sequence_reports_write_errors() {
        let map = build_grid_adjacency(4, 4);
        let initial = State::uniform(&map, 0);
        let mut automaton = Automaton::new(map, initial, Rule::greenberg_hastings(3)).unwrap();
        let palette = Palette::random(3, 1);

        let missing = std::env::temp_dir().join("surface_automata_no_such_dir/nested");
        let mut sink = PngSequence::new(&missing, "frame", 4, 4, &palette);
        let summary = automaton.run(Some(5), &mut sink).unwrap();

        assert!(summary.stopped_by_sink);
        assert_eq!(summary.generations, 1);
        assert!(sink.finish().is_err());
    }

    #[test]
    fn test_png_sequence_writes_frames() {
        let dir = std::env::temp_dir().join(format!("surface_automata_frames_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let map = build_grid_adjacency(5, 5);
        let initial = State::random(&map, 4, 9);
        let mut automaton = Automaton::new(map, initial, Rule::greenberg_hastings(4)).unwrap();
        let palette = Palette::random(4, 9);

        let mut sink = PngSequence::new(&dir, "gh", 5, 5, &palette).with_scale(2);
        automaton.run(Some(3), &mut sink).unwrap();
        let written = sink.finish().unwrap();

        assert_eq!(written.len(), 3);
        assert!(written[0].ends_with("gh_00001.png"));
        let decoded = image::open(&written[2]).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (10, 10));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
