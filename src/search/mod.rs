//! Point-to-point shortest-path search over the road graph.
//!
//! - [`BidirectionalSearch`] — bidirectional Dijkstra or A*, selected by
//!   [`SearchAlgorithm`](crate::config::SearchAlgorithm)

mod bidirectional;
mod potential;

pub use bidirectional::{BidirectionalSearch, ShortestPath};
