//! Node potentials guiding the bidirectional search.

use crate::error::{Result, RoutingError};
use crate::models::{CoordinateSystem, Position, RoadGraph};

/// Potential added to forward keys and subtracted from backward keys.
///
/// The balanced A* potential `p(v) = (h(v, t) - h(v, s)) / 2` makes both
/// directions see the same reduced edge costs, so a node settled by both
/// searches still bounds the shortest path. `h` is a straight-line travel
/// time lower bound and must never exceed the true edge cost.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Potential {
    /// Plain Dijkstra.
    Zero,
    /// Balanced straight-line potential between `source` and `target`.
    Balanced {
        source: Position,
        target: Position,
        coordinates: CoordinateSystem,
        max_speed: f64,
    },
}

impl Potential {
    pub(crate) fn balanced(
        graph: &RoadGraph,
        source: usize,
        target: usize,
        coordinates: CoordinateSystem,
        max_speed: f64,
    ) -> Result<Self> {
        Ok(Self::Balanced {
            source: position_of(graph, source)?,
            target: position_of(graph, target)?,
            coordinates,
            max_speed,
        })
    }

    /// Forward potential of the node at `idx`.
    pub(crate) fn at(&self, graph: &RoadGraph, idx: usize) -> f64 {
        match *self {
            Self::Zero => 0.0,
            Self::Balanced {
                source,
                target,
                coordinates,
                max_speed,
            } => match graph.node(idx).position {
                Some(pos) => {
                    let to_target = pos.distance_to(&target, coordinates) / max_speed;
                    let to_source = pos.distance_to(&source, coordinates) / max_speed;
                    (to_target - to_source) / 2.0
                }
                // Positions are checked when the search is built.
                None => 0.0,
            },
        }
    }
}

fn position_of(graph: &RoadGraph, idx: usize) -> Result<Position> {
    let node = graph.node(idx);
    node.position.ok_or(RoutingError::MissingPosition(node.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NodeId;

    fn line() -> RoadGraph {
        let mut g = RoadGraph::new();
        g.add_node(NodeId(0), Some(Position::planar(0.0, 0.0)));
        g.add_node(NodeId(1), Some(Position::planar(5.0, 0.0)));
        g.add_node(NodeId(2), Some(Position::planar(10.0, 0.0)));
        g.add_node(NodeId(3), None);
        g
    }

    #[test]
    fn test_zero_potential() {
        let g = line();
        assert_eq!(Potential::Zero.at(&g, 1), 0.0);
    }

    #[test]
    fn test_balanced_potential_antisymmetric() {
        let g = line();
        let p = Potential::balanced(&g, 0, 2, CoordinateSystem::Planar, 1.0).unwrap();
        assert!((p.at(&g, 0) - 5.0).abs() < 1e-12);
        assert!((p.at(&g, 2) + 5.0).abs() < 1e-12);
        assert!(p.at(&g, 1).abs() < 1e-12);
    }

    #[test]
    fn test_balanced_requires_positions() {
        let g = line();
        let err = Potential::balanced(&g, 0, 3, CoordinateSystem::Planar, 1.0).unwrap_err();
        assert!(matches!(err, RoutingError::MissingPosition(NodeId(3))));
    }
}
