//! Constructive heuristics for initial waypoint tours.
//!
//! - [`nearest_neighbor_tour`] — Greedy nearest-neighbour ring, O(n²)

mod nearest_neighbor;

pub use nearest_neighbor::nearest_neighbor_tour;
