//! Error type shared by every stage of the engine.

use thiserror::Error;

use crate::models::NodeId;

/// Errors reported to the caller of the route engine.
///
/// None of these are retried internally: retrying cannot change graph
/// connectivity or fix a bad parameter.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// A required waypoint pair has no path in the road graph.
    #[error("no route from {from} to {to}")]
    Unreachable {
        /// Origin waypoint.
        from: NodeId,
        /// Destination waypoint.
        to: NodeId,
    },

    /// The condensed graph is missing pairs and the consumer needs all of them.
    #[error("condensed graph is incomplete: {missing} waypoint pair(s) missing")]
    IncompleteCondensedGraph {
        /// Number of missing ordered pairs.
        missing: usize,
    },

    /// A parameter is outside its valid domain.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Fewer than two waypoints were supplied.
    #[error("at least 2 waypoints are required, got {waypoints}")]
    DegenerateInput {
        /// Number of waypoints received.
        waypoints: usize,
    },

    /// A node id does not exist in the road graph.
    #[error("node {0} is not part of the road graph")]
    UnknownNode(NodeId),

    /// A* search needs a position on every node.
    #[error("node {0} has no position, required by A* search")]
    MissingPosition(NodeId),

    /// The same node was given twice as a waypoint.
    #[error("waypoint {0} appears more than once")]
    DuplicateWaypoint(NodeId),

    /// An algorithm selector string was not recognised.
    #[error("unknown algorithm `{0}`")]
    UnknownAlgorithm(String),

    /// JSON configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl RoutingError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RoutingError>;
