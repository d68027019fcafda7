//! Adjacency maps
//!
//! Topology-agnostic neighbour maps from a region to the regions next to it.
//! Two builders are provided: a toroidal grid with Moore neighbourhoods and
//! the face-adjacency graph of a polygon mesh.

mod grid;
mod mesh;

pub use grid::build_grid_adjacency;
pub use mesh::build_mesh_adjacency;

use std::collections::{HashMap, HashSet};

use crate::region::Region;

/// Mapping from a region to its ordered list of neighbouring regions
///
/// Regions are kept in a deterministic order (the order they were inserted
/// by the builder) so that every pass over the board visits them the same
/// way. The map is built once and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMap<R: Region> {
    order: Vec<R>,
    neighbors: HashMap<R, Vec<R>>,
}

impl<R: Region> AdjacencyMap<R> {
    /// Build a map from `(region, neighbours)` entries, keeping entry order
    ///
    /// A region listed twice keeps its first position and its last
    /// neighbour list.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (R, Vec<R>)>,
    {
        let entries = entries.into_iter();
        let (lower, _) = entries.size_hint();
        let mut order = Vec::with_capacity(lower);
        let mut neighbors = HashMap::with_capacity(lower);

        for (region, adjacent) in entries {
            if neighbors.insert(region, adjacent).is_none() {
                order.push(region);
            }
        }

        Self { order, neighbors }
    }

    /// All regions in build order
    #[inline]
    pub fn regions(&self) -> &[R] {
        &self.order
    }

    /// Neighbours of a region, or an empty slice if the region is unknown
    pub fn neighbors(&self, region: &R) -> &[R] {
        self.neighbors
            .get(region)
            .map(|n| n.as_slice())
            .unwrap_or(&[])
    }

    /// Number of regions in the map
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the map has no regions
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Check if a region is part of the map
    #[inline]
    pub fn contains(&self, region: &R) -> bool {
        self.neighbors.contains_key(region)
    }

    /// Number of neighbours listed for a region
    #[inline]
    pub fn neighbor_count(&self, region: &R) -> usize {
        self.neighbors(region).len()
    }

    /// Check if `other` is listed as a neighbour of `region`
    pub fn is_neighbor(&self, region: &R, other: &R) -> bool {
        self.neighbors(region).contains(other)
    }

    /// Iterate `(region, neighbours)` pairs in build order
    pub fn iter(&self) -> impl Iterator<Item = (&R, &[R])> + '_ {
        self.order
            .iter()
            .map(move |region| (region, self.neighbors(region)))
    }

    /// Total number of directed neighbour links
    pub fn link_count(&self) -> usize {
        self.neighbors.values().map(Vec::len).sum()
    }

    /// Find regions within a given hop count from a center region (BFS)
    ///
    /// The result includes the center itself and is sorted. Returns an empty
    /// vec if the center is not part of the map.
    pub fn regions_within(&self, center: R, hops: usize) -> Vec<R> {
        if !self.contains(&center) {
            return vec![];
        }

        let mut visited = HashSet::new();
        let mut current = vec![center];
        visited.insert(center);

        for _ in 0..hops {
            let mut next = Vec::new();
            for region in &current {
                for &neighbor in self.neighbors(region) {
                    if visited.insert(neighbor) {
                        next.push(neighbor);
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            current = next;
        }

        let mut found: Vec<R> = visited.into_iter().collect();
        found.sort();
        found
    }
}
