//! Road network graph.

use std::collections::HashMap;

use super::{EdgeAttributes, Node, NodeId, Position};
use crate::error::{Result, RoutingError};

/// A directed road edge stored in the graph arena.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Arena index of the tail node.
    pub from: usize,
    /// Arena index of the head node.
    pub to: usize,
    /// Cost attributes.
    pub attributes: EdgeAttributes,
}

/// A directed, weighted road network.
///
/// Nodes live in an arena addressed by dense indices; a hash map resolves
/// stable [`NodeId`]s to those indices. Both outgoing and incoming adjacency
/// are kept so that searches can run backwards from a target.
///
/// # Examples
///
/// ```
/// use u_waypoint::models::{EdgeAttributes, NodeId, RoadGraph};
///
/// let mut graph = RoadGraph::new();
/// graph.add_node(NodeId(1), None);
/// graph.add_node(NodeId(2), None);
/// graph.add_edge(NodeId(1), NodeId(2), EdgeAttributes::with_travel_time(3.0)).unwrap();
///
/// assert_eq!(graph.num_nodes(), 2);
/// assert_eq!(graph.num_edges(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RoadGraph {
    nodes: Vec<Node>,
    index: HashMap<NodeId, usize>,
    edges: Vec<Edge>,
    outgoing: Vec<Vec<usize>>,
    incoming: Vec<Vec<usize>>,
}

impl RoadGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node, or updates the position of an existing one.
    ///
    /// Returns the node's arena index.
    pub fn add_node(&mut self, id: NodeId, position: Option<Position>) -> usize {
        if let Some(&idx) = self.index.get(&id) {
            if position.is_some() {
                self.nodes[idx].position = position;
            }
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(Node { id, position });
        self.index.insert(id, idx);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        idx
    }

    /// Adds a directed edge between two existing nodes.
    ///
    /// Parallel edges are allowed.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, attributes: EdgeAttributes) -> Result<()> {
        attributes.validate()?;
        let from = self.index_of(from)?;
        let to = self.index_of(to)?;
        let edge = self.edges.len();
        self.edges.push(Edge {
            from,
            to,
            attributes,
        });
        self.outgoing[from].push(edge);
        self.incoming[to].push(edge);
        Ok(())
    }

    /// Adds edges in both directions with the same attributes.
    pub fn add_two_way_edge(
        &mut self,
        a: NodeId,
        b: NodeId,
        attributes: EdgeAttributes,
    ) -> Result<()> {
        self.add_edge(a, b, attributes)?;
        self.add_edge(b, a, attributes)
    }

    /// Resolves a node id to its arena index.
    pub fn index_of(&self, id: NodeId) -> Result<usize> {
        self.index
            .get(&id)
            .copied()
            .ok_or(RoutingError::UnknownNode(id))
    }

    /// Returns `true` if the node id is present.
    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// Returns the node stored at an arena index.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    pub fn node(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    /// All nodes in arena order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the edge stored at an edge index.
    pub fn edge(&self, idx: usize) -> &Edge {
        &self.edges[idx]
    }

    /// Edge indices leaving the node at `idx`.
    pub fn outgoing(&self, idx: usize) -> &[usize] {
        &self.outgoing[idx]
    }

    /// Edge indices entering the node at `idx`.
    pub fn incoming(&self, idx: usize) -> &[usize] {
        &self.incoming[idx]
    }

    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Cheapest direct edge weight from `from` to `to`, if any edge exists.
    pub fn edge_weight(&self, from: NodeId, to: NodeId, assumed_speed: f64) -> Option<f64> {
        let from = self.index.get(&from)?;
        let to = *self.index.get(&to)?;
        self.outgoing[*from]
            .iter()
            .map(|&e| &self.edges[e])
            .filter(|e| e.to == to)
            .map(|e| e.attributes.weight(assumed_speed))
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Total cost of a node path, or `None` if consecutive nodes are not linked.
    pub fn path_cost(&self, path: &[NodeId], assumed_speed: f64) -> Option<f64> {
        path.windows(2)
            .map(|w| self.edge_weight(w[0], w[1], assumed_speed))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> RoadGraph {
        let mut g = RoadGraph::new();
        for id in 1..=3 {
            g.add_node(NodeId(id), Some(Position::planar(id as f64, 0.0)));
        }
        g.add_edge(NodeId(1), NodeId(2), EdgeAttributes::with_travel_time(2.0))
            .unwrap();
        g.add_edge(NodeId(2), NodeId(3), EdgeAttributes::with_length(30.0))
            .unwrap();
        g.add_edge(NodeId(1), NodeId(3), EdgeAttributes::with_travel_time(9.0))
            .unwrap();
        g
    }

    #[test]
    fn test_adjacency_both_directions() {
        let g = triangle();
        let n1 = g.index_of(NodeId(1)).unwrap();
        let n3 = g.index_of(NodeId(3)).unwrap();
        assert_eq!(g.outgoing(n1).len(), 2);
        assert_eq!(g.incoming(n1).len(), 0);
        assert_eq!(g.incoming(n3).len(), 2);
    }

    #[test]
    fn test_add_node_is_idempotent() {
        let mut g = triangle();
        let idx = g.add_node(NodeId(2), None);
        assert_eq!(idx, 1);
        assert_eq!(g.num_nodes(), 3);
        // Existing position is kept when none is supplied.
        assert!(g.node(idx).position.is_some());
    }

    #[test]
    fn test_unknown_node() {
        let mut g = triangle();
        let err = g
            .add_edge(NodeId(1), NodeId(99), EdgeAttributes::with_travel_time(1.0))
            .unwrap_err();
        assert!(matches!(err, RoutingError::UnknownNode(NodeId(99))));
    }

    #[test]
    fn test_rejects_edge_without_cost() {
        let mut g = triangle();
        assert!(g
            .add_edge(NodeId(1), NodeId(2), EdgeAttributes::default())
            .is_err());
    }

    #[test]
    fn test_parallel_edges_cheapest_weight() {
        let mut g = triangle();
        g.add_edge(NodeId(1), NodeId(2), EdgeAttributes::with_travel_time(1.5))
            .unwrap();
        assert_eq!(g.edge_weight(NodeId(1), NodeId(2), 10.0), Some(1.5));
    }

    #[test]
    fn test_path_cost() {
        let g = triangle();
        let cost = g
            .path_cost(&[NodeId(1), NodeId(2), NodeId(3)], 10.0)
            .unwrap();
        assert!((cost - 5.0).abs() < 1e-12);
        assert!(g.path_cost(&[NodeId(3), NodeId(1)], 10.0).is_none());
    }

    #[test]
    fn test_two_way_edge() {
        let mut g = RoadGraph::new();
        g.add_node(NodeId(1), None);
        g.add_node(NodeId(2), None);
        g.add_two_way_edge(NodeId(1), NodeId(2), EdgeAttributes::with_travel_time(4.0))
            .unwrap();
        assert_eq!(g.num_edges(), 2);
        assert_eq!(g.edge_weight(NodeId(2), NodeId(1), 1.0), Some(4.0));
    }
}
