//! Domain model types for waypoint routing.
//!
//! Provides the road network with typed edge attributes, the condensed
//! graph over waypoints, and the tour and route plan produced from it.

mod condensed;
mod edge;
mod graph;
mod node;
mod tour;

pub use condensed::{CondensedEdge, CondensedGraph};
pub use edge::EdgeAttributes;
pub use graph::{Edge, RoadGraph};
pub use node::{haversine_distance, CoordinateSystem, Node, NodeId, Position};
pub use tour::{RoutePlan, Tour};
