//! Condensed graph over waypoints.

use serde::{Deserialize, Serialize};

use super::NodeId;
use crate::distance::DistanceMatrix;
use crate::error::{Result, RoutingError};

/// Shortest connection between two waypoints.
///
/// `weight` is the cost of exactly `path`; the path is kept for route
/// expansion and never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CondensedEdge {
    /// Travel cost of `path`.
    pub weight: f64,
    /// Road nodes from the origin waypoint to the destination waypoint, inclusive.
    pub path: Vec<NodeId>,
}

/// Complete (or partial) graph over a waypoint set.
///
/// Waypoints are addressed by their index in [`waypoints`](Self::waypoints).
///
/// # Examples
///
/// ```
/// use u_waypoint::models::{CondensedEdge, CondensedGraph, NodeId};
///
/// let mut cg = CondensedGraph::new(vec![NodeId(10), NodeId(20)]);
/// cg.insert(0, 1, CondensedEdge { weight: 4.0, path: vec![NodeId(10), NodeId(15), NodeId(20)] });
///
/// assert_eq!(cg.weight(0, 1), 4.0);
/// assert!(cg.weight(1, 0).is_infinite());
/// assert_eq!(cg.missing_pairs(), vec![(1, 0)]);
/// ```
#[derive(Debug, Clone)]
pub struct CondensedGraph {
    waypoints: Vec<NodeId>,
    edges: Vec<Option<CondensedEdge>>,
    weights: DistanceMatrix,
}

impl CondensedGraph {
    /// Creates a condensed graph with no edges.
    pub fn new(waypoints: Vec<NodeId>) -> Self {
        let n = waypoints.len();
        Self {
            waypoints,
            edges: vec![None; n * n],
            weights: DistanceMatrix::new(n),
        }
    }

    /// Builds a condensed graph directly from a weight matrix.
    ///
    /// Every finite pair gets a two-node path. Useful when costs come from
    /// somewhere other than a road search.
    pub fn from_matrix(waypoints: Vec<NodeId>, weights: &DistanceMatrix) -> Result<Self> {
        if weights.size() != waypoints.len() {
            return Err(RoutingError::invalid(
                "weights",
                format!(
                    "matrix size {} does not match {} waypoints",
                    weights.size(),
                    waypoints.len()
                ),
            ));
        }
        let mut graph = Self::new(waypoints);
        for i in 0..graph.len() {
            for j in 0..graph.len() {
                let w = weights.get(i, j);
                if i != j && w.is_finite() {
                    let path = vec![graph.waypoints[i], graph.waypoints[j]];
                    graph.insert(i, j, CondensedEdge { weight: w, path });
                }
            }
        }
        Ok(graph)
    }

    /// Stores the edge from waypoint `from` to waypoint `to`. Self-pairs are ignored.
    pub fn insert(&mut self, from: usize, to: usize, edge: CondensedEdge) {
        if from == to {
            return;
        }
        let n = self.len();
        self.weights.set(from, to, edge.weight);
        self.edges[from * n + to] = Some(edge);
    }

    /// Edge from waypoint `from` to waypoint `to`, if present.
    pub fn edge(&self, from: usize, to: usize) -> Option<&CondensedEdge> {
        self.edges[from * self.len() + to].as_ref()
    }

    /// Edge weight, `f64::INFINITY` when the pair is missing.
    pub fn weight(&self, from: usize, to: usize) -> f64 {
        self.weights.get(from, to)
    }

    /// Dense weight view.
    pub fn weights(&self) -> &DistanceMatrix {
        &self.weights
    }

    /// Waypoint node ids in index order.
    pub fn waypoints(&self) -> &[NodeId] {
        &self.waypoints
    }

    /// Number of waypoints.
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Returns `true` if there are no waypoints.
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Ordered pairs with no edge, in row-major order.
    pub fn missing_pairs(&self) -> Vec<(usize, usize)> {
        let n = self.len();
        (0..n)
            .flat_map(|i| (0..n).map(move |j| (i, j)))
            .filter(|&(i, j)| i != j && self.edges[i * n + j].is_none())
            .collect()
    }

    /// Returns `true` if every ordered pair has an edge.
    pub fn is_complete(&self) -> bool {
        self.missing_pairs().is_empty()
    }

    /// Fails with [`RoutingError::IncompleteCondensedGraph`] unless complete.
    pub fn require_complete(&self) -> Result<()> {
        let missing = self.missing_pairs().len();
        if missing > 0 {
            return Err(RoutingError::IncompleteCondensedGraph { missing });
        }
        Ok(())
    }

    /// Indices of waypoints reachable in one hop from `from`.
    pub fn neighbors(&self, from: usize) -> impl Iterator<Item = usize> + '_ {
        let n = self.len();
        (0..n).filter(move |&to| to != from && self.edges[from * n + to].is_some())
    }
}
