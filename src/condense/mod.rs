//! Condensation of the road graph into a complete graph over waypoints.
//!
//! Every ordered waypoint pair is an independent [`BidirectionalSearch`]
//! query; the queries run on the rayon pool and are joined before the
//! table is assembled, so the result does not depend on completion order.

use std::collections::HashSet;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::SearchConfig;
use crate::error::{Result, RoutingError};
use crate::models::{CondensedEdge, CondensedGraph, NodeId, RoadGraph};
use crate::search::{BidirectionalSearch, ShortestPath};

/// What to do with waypoint pairs that have no path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Completeness {
    /// Fail with [`RoutingError::Unreachable`] on the first missing pair.
    #[default]
    Required,
    /// Leave missing pairs out of the table.
    Partial,
}

/// Builds [`CondensedGraph`]s from a road graph.
///
/// # Examples
///
/// ```
/// use u_waypoint::condense::{Completeness, GraphCondenser};
/// use u_waypoint::config::SearchConfig;
/// use u_waypoint::models::{EdgeAttributes, NodeId, RoadGraph};
///
/// let mut graph = RoadGraph::new();
/// for id in 1..=3 {
///     graph.add_node(NodeId(id), None);
/// }
/// graph.add_two_way_edge(NodeId(1), NodeId(2), EdgeAttributes::with_travel_time(1.0)).unwrap();
/// graph.add_two_way_edge(NodeId(2), NodeId(3), EdgeAttributes::with_travel_time(2.0)).unwrap();
///
/// let condenser = GraphCondenser::new(&graph, SearchConfig::default()).unwrap();
/// let condensed = condenser
///     .condense(&[NodeId(1), NodeId(3)], Completeness::Required)
///     .unwrap();
///
/// assert_eq!(condensed.weight(0, 1), 3.0);
/// assert_eq!(condensed.edge(1, 0).unwrap().path, vec![NodeId(3), NodeId(2), NodeId(1)]);
/// ```
#[derive(Debug, Clone)]
pub struct GraphCondenser<'g> {
    search: BidirectionalSearch<'g>,
}

impl<'g> GraphCondenser<'g> {
    /// Creates a condenser over `graph` using the given search settings.
    pub fn new(graph: &'g RoadGraph, config: SearchConfig) -> Result<Self> {
        Ok(Self {
            search: BidirectionalSearch::new(graph, config)?,
        })
    }

    /// Runs a search for every ordered waypoint pair and assembles the table.
    pub fn condense(&self, waypoints: &[NodeId], completeness: Completeness) -> Result<CondensedGraph> {
        validate_waypoints(waypoints)?;

        let started = Instant::now();
        let n = waypoints.len();
        let pairs: Vec<(usize, usize)> = (0..n)
            .flat_map(|i| (0..n).filter(move |&j| j != i).map(move |j| (i, j)))
            .collect();

        let results: Vec<((usize, usize), ShortestPath)> = pairs
            .into_par_iter()
            .map(|(i, j)| {
                self.search
                    .shortest_path(waypoints[i], waypoints[j])
                    .map(|sp| ((i, j), sp))
            })
            .collect::<Result<_>>()?;

        let mut graph = CondensedGraph::new(waypoints.to_vec());
        for ((i, j), sp) in results {
            if !sp.is_reachable() {
                match completeness {
                    Completeness::Required => {
                        return Err(RoutingError::Unreachable {
                            from: waypoints[i],
                            to: waypoints[j],
                        });
                    }
                    Completeness::Partial => {
                        debug!(from = %waypoints[i], to = %waypoints[j], "waypoint pair unreachable, omitted");
                        continue;
                    }
                }
            }
            graph.insert(
                i,
                j,
                CondensedEdge {
                    weight: sp.cost,
                    path: sp.path,
                },
            );
        }

        info!(
            waypoints = n,
            missing = graph.missing_pairs().len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "condensed graph built"
        );
        Ok(graph)
    }
}

/// Rejects fewer than two waypoints and repeated waypoints.
pub(crate) fn validate_waypoints(waypoints: &[NodeId]) -> Result<()> {
    if waypoints.len() < 2 {
        return Err(RoutingError::DegenerateInput {
            waypoints: waypoints.len(),
        });
    }
    let mut seen = HashSet::with_capacity(waypoints.len());
    for &w in waypoints {
        if !seen.insert(w) {
            return Err(RoutingError::DuplicateWaypoint(w));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EdgeAttributes;

    /// Ring 1-2-3-4-1 with unit edges, plus isolated node 5.
    fn ring_with_island() -> RoadGraph {
        let mut g = RoadGraph::new();
        for id in 1..=5 {
            g.add_node(NodeId(id), None);
        }
        for (a, b) in [(1, 2), (2, 3), (3, 4), (4, 1)] {
            g.add_two_way_edge(NodeId(a), NodeId(b), EdgeAttributes::with_travel_time(1.0))
                .unwrap();
        }
        g
    }

    #[test]
    fn test_condense_complete() {
        let g = ring_with_island();
        let condenser = GraphCondenser::new(&g, SearchConfig::default()).unwrap();
        let waypoints = [NodeId(1), NodeId(2), NodeId(3)];
        let cg = condenser.condense(&waypoints, Completeness::Required).unwrap();
        assert!(cg.is_complete());
        assert_eq!(cg.weight(0, 2), 2.0);
        for i in 0..3 {
            for j in 0..3 {
                if i == j {
                    continue;
                }
                let e = cg.edge(i, j).unwrap();
                assert_eq!(e.path.first(), Some(&waypoints[i]));
                assert_eq!(e.path.last(), Some(&waypoints[j]));
                let summed = g.path_cost(&e.path, 1.0).unwrap();
                assert!((summed - e.weight).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_isolated_waypoint_is_unreachable() {
        let g = ring_with_island();
        let condenser = GraphCondenser::new(&g, SearchConfig::default()).unwrap();
        let err = condenser
            .condense(&[NodeId(1), NodeId(5)], Completeness::Required)
            .unwrap_err();
        assert!(matches!(
            err,
            RoutingError::Unreachable {
                from: NodeId(1),
                to: NodeId(5)
            }
        ));
    }

    #[test]
    fn test_partial_omits_missing_pairs() {
        let g = ring_with_island();
        let condenser = GraphCondenser::new(&g, SearchConfig::default()).unwrap();
        let cg = condenser
            .condense(&[NodeId(1), NodeId(3), NodeId(5)], Completeness::Partial)
            .unwrap();
        assert_eq!(cg.missing_pairs(), vec![(0, 2), (1, 2), (2, 0), (2, 1)]);
        assert!(cg.edge(0, 1).is_some());
    }

    #[test]
    fn test_degenerate_input() {
        let g = ring_with_island();
        let condenser = GraphCondenser::new(&g, SearchConfig::default()).unwrap();
        assert!(matches!(
            condenser.condense(&[NodeId(1)], Completeness::Required),
            Err(RoutingError::DegenerateInput { waypoints: 1 })
        ));
    }

    #[test]
    fn test_duplicate_waypoint() {
        let g = ring_with_island();
        let condenser = GraphCondenser::new(&g, SearchConfig::default()).unwrap();
        assert!(matches!(
            condenser.condense(&[NodeId(1), NodeId(2), NodeId(1)], Completeness::Required),
            Err(RoutingError::DuplicateWaypoint(NodeId(1)))
        ));
    }

    #[test]
    fn test_unknown_waypoint() {
        let g = ring_with_island();
        let condenser = GraphCondenser::new(&g, SearchConfig::default()).unwrap();
        assert!(matches!(
            condenser.condense(&[NodeId(1), NodeId(77)], Completeness::Partial),
            Err(RoutingError::UnknownNode(NodeId(77)))
        ));
    }

    #[test]
    fn test_deterministic() {
        let g = ring_with_island();
        let condenser = GraphCondenser::new(&g, SearchConfig::default()).unwrap();
        let waypoints = [NodeId(1), NodeId(2), NodeId(3), NodeId(4)];
        let a = condenser.condense(&waypoints, Completeness::Required).unwrap();
        let b = condenser.condense(&waypoints, Completeness::Required).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(a.edge(i, j), b.edge(i, j));
            }
        }
    }
}
