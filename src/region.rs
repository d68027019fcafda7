//! Region identifiers
//!
//! A region is one addressable unit of an automaton surface: a grid cell or a
//! mesh face. Regions are value-type keys, hashed and compared by value.

use std::fmt::Debug;
use std::hash::Hash;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of a mesh face (0-based, stable for the lifetime of a loaded mesh)
pub type FaceId = usize;

/// Bound for anything usable as a region key
///
/// `Ord` gives a deterministic iteration order, `Debug` names the region in
/// error messages.
pub trait Region: Copy + Eq + Hash + Ord + Debug {}

impl<T> Region for T where T: Copy + Eq + Hash + Ord + Debug {}

/// A cell of a 2D toroidal grid
///
/// Ordered by `x` first, then `y`, matching the column-major order in which
/// grid boards are built.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct GridCell {
    /// Column, `0..width`
    pub x: usize,
    /// Row, `0..height`
    pub y: usize,
}

impl GridCell {
    /// Create a new grid cell key
    #[inline]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Offset this cell by `(dx, dy)` on a `width` x `height` torus
    ///
    /// Offsets are expected in `-1..=1`; index −1 wraps to `dimension − 1`
    /// and index `dimension` wraps to 0.
    pub fn wrapped_offset(self, dx: isize, dy: isize, width: usize, height: usize) -> Self {
        Self {
            x: wrap(self.x, dx, width),
            y: wrap(self.y, dy, height),
        }
    }
}

impl From<(usize, usize)> for GridCell {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

fn wrap(index: usize, delta: isize, dimension: usize) -> usize {
    let dimension = dimension as isize;
    (index as isize + delta).rem_euclid(dimension) as usize
}
