//! Synchronous generation step
//!
//! Every region reads only prior-generation values. The next generation is
//! collected into a fresh assignment and nothing becomes visible until the
//! whole board has been computed.

use std::collections::HashMap;

use super::state::{validate_closed_world, State};
use crate::adjacency::AdjacencyMap;
use crate::error::Result;
use crate::region::Region;
use crate::rules::Rule;

/// Compute the next generation of a board
///
/// # Errors
///
/// Returns `MissingRegion` if a region of the map, or one of its listed
/// neighbours, has no value in `state`.
///
/// # Example
///
/// ```
/// use surface_automata::*;
///
/// let map = build_grid_adjacency(5, 5);
/// let state = State::uniform(&map, 0);
/// let next = step(&map, &state, &Rule::conway()).unwrap();
/// assert_eq!(next.population(), 0);
/// ```
pub fn step<R: Region>(map: &AdjacencyMap<R>, state: &State<R>, rule: &Rule) -> Result<State<R>> {
    validate_closed_world(map, state)?;
    Ok(step_unchecked(map, state, rule))
}

/// Step a board already known to be closed
///
/// Panics if a region is missing from `state`.
pub(crate) fn step_unchecked<R: Region>(map: &AdjacencyMap<R>, state: &State<R>, rule: &Rule) -> State<R> {
    let prior = state.values();
    let next: HashMap<R, u32> = map
        .iter()
        .map(|(region, neighbors)| (*region, next_value(prior, region, neighbors, rule)))
        .collect();
    State::from_map(next)
}

#[inline]
fn next_value<R: Region>(prior: &HashMap<R, u32>, region: &R, neighbors: &[R], rule: &Rule) -> u32 {
    rule.evaluate(prior[region], neighbors.iter().map(|n| prior[n]))
}

/// Compute the next generation with regions evaluated across worker threads
///
/// Workers share the frozen prior generation read-only and each produces
/// the value of a disjoint region, so the result is identical to [`step`].
#[cfg(feature = "parallel")]
pub fn step_parallel<R>(map: &AdjacencyMap<R>, state: &State<R>, rule: &Rule) -> Result<State<R>>
where
    R: Region + Send + Sync,
{
    use rayon::prelude::*;

    validate_closed_world(map, state)?;
    let prior = state.values();
    let next: HashMap<R, u32> = map
        .regions()
        .par_iter()
        .map(|region| (*region, next_value(prior, region, map.neighbors(region), rule)))
        .collect();
    Ok(State::from_map(next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjacency::build_grid_adjacency;
    use crate::error::AutomataError;
    use crate::region::GridCell;

    fn live_cells(state: &State<GridCell>) -> Vec<GridCell> {
        let mut cells: Vec<GridCell> = state
            .iter()
            .filter(|(_, &v)| v != 0)
            .map(|(&c, _)| c)
            .collect();
        cells.sort();
        cells
    }

    #[test]
    fn test_blinker_oscillates() {
        let map = build_grid_adjacency(8, 8);
        let mut state = State::uniform(&map, 0);
        let horizontal = vec![GridCell::new(2, 3), GridCell::new(3, 3), GridCell::new(4, 3)];
        let vertical = vec![GridCell::new(3, 2), GridCell::new(3, 3), GridCell::new(3, 4)];
        for &cell in &horizontal {
            state.set(cell, 1);
        }

        let rule = Rule::conway();
        for generation in 1..=4 {
            state = step(&map, &state, &rule).unwrap();
            let expected = if generation % 2 == 1 { &vertical } else { &horizontal };
            assert_eq!(&live_cells(&state), expected, "generation {}", generation);
        }
    }

    #[test]
    fn test_isolated_cell_dies() {
        let map = build_grid_adjacency(6, 6);
        let mut state = State::uniform(&map, 0);
        state.set(GridCell::new(2, 2), 1);

        let next = step(&map, &state, &Rule::conway()).unwrap();
        assert_eq!(next.population(), 0);
    }

    #[test]
    fn test_update_is_synchronous() {
        // On a 3x3 torus every cell neighbours every other cell. (1,1) and
        // (1,2) each advance because of the other's value; an in-place
        // update would hide the 1 at (1,1) from cells visited after it.
        let map = build_grid_adjacency(3, 3);
        let mut state = State::uniform(&map, 0);
        state.set(GridCell::new(1, 1), 1);
        state.set(GridCell::new(1, 2), 2);

        // threshold 0: advance when any neighbour holds the successor
        let rule = Rule::cyclic(3).with_threshold(0);
        let next = step(&map, &state, &rule).unwrap();

        // (1,1) read the 2 at (1,2)
        assert_eq!(next.get(&GridCell::new(1, 1)), Some(2));
        // (1,2) read the resting cells and wrapped to 0
        assert_eq!(next.get(&GridCell::new(1, 2)), Some(0));
        // resting cells read the old 1 at (1,1), not its new 2
        assert_eq!(next.get(&GridCell::new(0, 0)), Some(1));
        assert_eq!(next.get(&GridCell::new(2, 2)), Some(1));
    }

    #[test]
    fn test_step_does_not_touch_input() {
        let map = build_grid_adjacency(4, 4);
        let state = State::random(&map, 4, 3);
        let before = state.clone();
        let _ = step(&map, &state, &Rule::greenberg_hastings(4)).unwrap();
        assert_eq!(state, before);
    }

    #[test]
    fn test_missing_region_is_an_error() {
        let map = build_grid_adjacency(3, 3);
        let state = State::from_values(vec![(GridCell::new(0, 0), 1)]);
        let result = step(&map, &state, &Rule::conway());
        assert!(matches!(result, Err(AutomataError::MissingRegion(_))));
    }

    #[test]
    fn test_isolated_mesh_face_uses_empty_neighbors() {
        let map = crate::adjacency::AdjacencyMap::from_entries(vec![(0usize, vec![])]);
        let state = State::from_values(vec![(0usize, 2)]);
        let next = step(&map, &state, &Rule::greenberg_hastings(3)).unwrap();
        assert_eq!(next.get(&0), Some(0));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let map = build_grid_adjacency(32, 24);
        let state = State::random(&map, 5, 99);
        let rule = Rule::cyclic(5);
        let a = step(&map, &state, &rule).unwrap();
        let b = step_parallel(&map, &state, &rule).unwrap();
        assert_eq!(a, b);
    }
}
