//! Toroidal grid adjacency (Moore neighbourhood)

use super::AdjacencyMap;
use crate::region::GridCell;

/// Moore neighbourhood offsets, left column first
const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Build the adjacency map of a `width` x `height` toroidal grid
///
/// Every cell gets its 8 Moore neighbours with indices taken modulo the
/// grid dimensions, so the left edge touches the right edge and the top
/// touches the bottom. Cells are ordered column by column.
///
/// Grids narrower than 3 in either direction are degenerate: neighbours
/// coincide (and may include the cell itself for a dimension of 1), but
/// every cell still lists exactly 8 entries.
pub fn build_grid_adjacency(width: usize, height: usize) -> AdjacencyMap<GridCell> {
    let entries = (0..width).flat_map(|x| {
        (0..height).map(move |y| {
            let cell = GridCell::new(x, y);
            let neighbors = MOORE_OFFSETS
                .iter()
                .map(|&(dx, dy)| cell.wrapped_offset(dx, dy, width, height))
                .collect();
            (cell, neighbors)
        })
    });

    let map = AdjacencyMap::from_entries(entries);
    log::debug!(
        "built {}x{} toroidal grid adjacency ({} cells)",
        width,
        height,
        map.len()
    );
    map
}
