//! # u-waypoint
//!
//! Waypoint tour optimization over road networks: find the shortest paths
//! between every pair of waypoints, order the waypoints with a travelling
//! salesman heuristic, and stitch the result back into a full road route.
//!
//! ## Modules
//!
//! - [`models`] — Road graph, condensed waypoint graph, tours and route plans
//! - [`distance`] — Dense travel-cost matrix
//! - [`config`] — Engine, search and heuristic settings
//! - [`error`] — Error type shared by every stage
//! - [`search`] — Bidirectional Dijkstra / A* point-to-point search
//! - [`condense`] — Parallel condensation of the road graph onto waypoints
//! - [`christofides`] — Christofides 1.5-approximation
//! - [`colony`] — Ant colony optimization
//! - [`constructive`] — Nearest-neighbour initial tour
//! - [`local_search`] — Randomised pairwise exchange (2-opt)
//! - [`engine`] — End-to-end planning: condense, order, expand

pub mod christofides;
pub mod colony;
pub mod condense;
pub mod config;
pub mod constructive;
pub mod distance;
pub mod engine;
pub mod error;
pub mod local_search;
pub mod models;
pub mod search;

pub use error::{Result, RoutingError};
