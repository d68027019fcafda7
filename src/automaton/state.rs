//! State assignments
//!
//! A state assignment maps every region of a board to its integer value.
//! Assignments are never edited while a run is in progress; each generation
//! produces a whole new one.

use std::collections::HashMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::adjacency::AdjacencyMap;
use crate::error::{AutomataError, Result};
use crate::region::Region;

/// Mapping from region to automaton value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State<R: Region> {
    values: HashMap<R, u32>,
}

impl<R: Region> State<R> {
    /// Assign the same value to every region of the map
    pub fn uniform(map: &AdjacencyMap<R>, value: u32) -> Self {
        Self {
            values: map.regions().iter().map(|&r| (r, value)).collect(),
        }
    }

    /// Assign a random value in `0..colors` to every region
    ///
    /// Deterministic for a given map, colour count and seed. Values are
    /// drawn in the map's region order.
    pub fn random(map: &AdjacencyMap<R>, colors: u32, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let colors = colors.max(1);
        Self {
            values: map
                .regions()
                .iter()
                .map(|&r| (r, rng.gen_range(0..colors)))
                .collect(),
        }
    }

    /// Build a state from explicit `(region, value)` pairs
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = (R, u32)>,
    {
        Self {
            values: values.into_iter().collect(),
        }
    }

    pub(crate) fn from_map(values: HashMap<R, u32>) -> Self {
        Self { values }
    }

    /// Value of a region, if assigned
    #[inline]
    pub fn get(&self, region: &R) -> Option<u32> {
        self.values.get(region).copied()
    }

    /// Set the value of a region
    ///
    /// Meant for seeding a board before it is handed to the engine.
    pub fn set(&mut self, region: R, value: u32) {
        self.values.insert(region, value);
    }

    /// Number of assigned regions
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no region is assigned
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of regions holding a non-zero value
    pub fn population(&self) -> usize {
        self.values.values().filter(|&&v| v != 0).count()
    }

    /// Count regions per value in `0..colors`; out-of-range values are skipped
    pub fn histogram(&self, colors: u32) -> Vec<usize> {
        let mut counts = vec![0; colors as usize];
        for &value in self.values.values() {
            if let Some(slot) = counts.get_mut(value as usize) {
                *slot += 1;
            }
        }
        counts
    }

    /// Values listed in the map's region order
    ///
    /// Regions missing from the state read as 0.
    pub fn values_in_order(&self, map: &AdjacencyMap<R>) -> Vec<u32> {
        map.regions()
            .iter()
            .map(|r| self.get(r).unwrap_or(0))
            .collect()
    }

    /// Iterate `(region, value)` pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&R, &u32)> + '_ {
        self.values.iter()
    }

    pub(crate) fn values(&self) -> &HashMap<R, u32> {
        &self.values
    }
}

/// Check that every region of the map, and every neighbour it lists, has a value
///
/// A missing entry means the board is internally inconsistent and cannot
/// be stepped.
pub fn validate_closed_world<R: Region>(map: &AdjacencyMap<R>, state: &State<R>) -> Result<()> {
    for (region, neighbors) in map.iter() {
        if state.get(region).is_none() {
            return Err(AutomataError::MissingRegion(format!("{:?}", region)));
        }
        if let Some(missing) = neighbors.iter().find(|n| state.get(n).is_none()) {
            return Err(AutomataError::MissingRegion(format!("{:?}", missing)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjacency::build_grid_adjacency;
    use crate::region::GridCell;

    #[test]
    fn test_uniform() {
        let map = build_grid_adjacency(4, 4);
        let state = State::uniform(&map, 2);
        assert_eq!(state.len(), 16);
        assert_eq!(state.get(&GridCell::new(3, 3)), Some(2));
        assert_eq!(state.population(), 16);
    }

    #[test]
    fn test_random_is_deterministic() {
        let map = build_grid_adjacency(8, 8);
        let a = State::random(&map, 4, 7);
        let b = State::random(&map, 4, 7);
        assert_eq!(a, b);
        assert!(a.iter().all(|(_, &v)| v < 4));
    }

    #[test]
    fn test_random_different_seeds() {
        let map = build_grid_adjacency(16, 16);
        let a = State::random(&map, 4, 1);
        let b = State::random(&map, 4, 2);
        assert_ne!(a, b);
    }

    #[test]
    fn test_histogram() {
        let state = State::from_values(vec![(0usize, 0), (1, 1), (2, 1), (3, 9)]);
        assert_eq!(state.histogram(3), vec![1, 2, 0]);
    }

    #[test]
    fn test_values_in_order() {
        let map = AdjacencyMap::from_entries(vec![(2usize, vec![]), (0, vec![]), (1, vec![])]);
        let state = State::from_values(vec![(0usize, 5), (2, 7)]);
        assert_eq!(state.values_in_order(&map), vec![7, 5, 0]);
    }

    #[test]
    fn test_closed_world() {
        let map = build_grid_adjacency(3, 3);
        let mut state = State::uniform(&map, 0);
        assert!(validate_closed_world(&map, &state).is_ok());

        let center = GridCell::new(1, 1);
        let mut partial = State::from_values(
            state
                .iter()
                .map(|(&r, &v)| (r, v))
                .filter(|(r, _)| *r != center),
        );
        assert!(matches!(
            validate_closed_world(&map, &partial),
            Err(AutomataError::MissingRegion(_))
        ));

        partial.set(center, 1);
        state.set(center, 1);
        assert_eq!(partial, state);
    }
}
