//! Colour mapping for automaton values
//!
//! Turning a state value into a colour is a display concern; the engine
//! never looks at colours.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::adjacency::AdjacencyMap;
use crate::automaton::State;
use crate::region::Region;

/// RGB colour type
pub type Rgb = [u8; 3];

/// Colour used for unassigned atlas cells and out-of-range values
pub const BACKGROUND: Rgb = [0, 0, 0];

/// Trait for mapping automaton values to colors
pub trait StateColorMapper {
    /// Map a state value to an RGB color
    fn map_color(&self, value: u32) -> Rgb;
}

/// Fixed lookup table from value to colour
///
/// Values outside the table map to [`BACKGROUND`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Lowest channel value drawn for random palettes, keeps colours off black
    pub const MIN_CHANNEL: u8 = 60;

    /// Random palette of `count` colours, channels in `60..255`
    pub fn random(count: u32, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let colors = (0..count)
            .map(|_| {
                [
                    rng.gen_range(Self::MIN_CHANNEL..255),
                    rng.gen_range(Self::MIN_CHANNEL..255),
                    rng.gen_range(Self::MIN_CHANNEL..255),
                ]
            })
            .collect();
        Self { colors }
    }

    /// Palette from explicit colours, indexed by value
    pub fn from_colors(colors: Vec<Rgb>) -> Self {
        Self { colors }
    }

    /// Two-state palette: black for dead, white for alive
    pub fn monochrome() -> Self {
        Self::from_colors(vec![BACKGROUND, [255, 255, 255]])
    }

    /// Number of colours in the table
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl StateColorMapper for Palette {
    fn map_color(&self, value: u32) -> Rgb {
        self.colors
            .get(value as usize)
            .copied()
            .unwrap_or(BACKGROUND)
    }
}

/// Red-to-green ramp
///
/// Starts at pure red and moves 5 steps towards green per value, clamped
/// at the channel limits. Useful for telling neighbouring face ids apart.
#[derive(Debug, Clone, Copy, Default)]
pub struct GradientPalette;

impl StateColorMapper for GradientPalette {
    fn map_color(&self, value: u32) -> Rgb {
        let shift = value.saturating_mul(5).min(255) as u8;
        [255 - shift, shift, 0]
    }
}

/// Colour every region of a map, in the map's region order
///
/// Regions missing from the state are drawn as [`BACKGROUND`].
pub fn region_colors<R, C>(map: &AdjacencyMap<R>, state: &State<R>, mapper: &C) -> Vec<Rgb>
where
    R: Region,
    C: StateColorMapper + ?Sized,
{
    map.regions()
        .iter()
        .map(|r| state.get(r).map_or(BACKGROUND, |v| mapper.map_color(v)))
        .collect()
}
