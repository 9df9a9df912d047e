//! Bidirectional Dijkstra / A* point-to-point search.
//!
//! # Algorithm
//!
//! A forward search from the source over outgoing edges and a backward
//! search from the target over incoming edges expand in strict alternation.
//! Every time a node receives a label from one side while the other side
//! already labelled it, `μ = g_f(v) + g_b(v)` is a candidate path length.
//! The search stops as soon as a node is settled by both directions and
//! returns the best candidate, which is then a shortest path.
//!
//! With the A* variant, keys are `g + p(v)` forward and `g - p(v)` backward
//! for the balanced straight-line potential `p` (see [`Potential`]).
//!
//! # Reference
//!
//! Goldberg, A.V. & Harrelson, C. (2005). "Computing the shortest path:
//! A* search meets graph theory", *SODA '05*, 156-165.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;

use super::potential::Potential;
use crate::config::{SearchAlgorithm, SearchConfig};
use crate::error::{Result, RoutingError};
use crate::models::{NodeId, RoadGraph};

/// Result of a point-to-point query.
///
/// Unreachable targets are reported as `cost = f64::INFINITY` with an empty
/// path; check [`is_reachable`](Self::is_reachable).
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath {
    /// Total travel cost of `path`.
    pub cost: f64,
    /// Road nodes from source to target, inclusive.
    pub path: Vec<NodeId>,
}

impl ShortestPath {
    /// The unreachable sentinel.
    pub fn unreachable() -> Self {
        Self {
            cost: f64::INFINITY,
            path: Vec::new(),
        }
    }

    /// Returns `true` unless this is the unreachable sentinel.
    pub fn is_reachable(&self) -> bool {
        self.cost.is_finite()
    }
}

/// Point-to-point search over a borrowed road graph.
///
/// # Examples
///
/// ```
/// use u_waypoint::config::SearchConfig;
/// use u_waypoint::models::{EdgeAttributes, NodeId, RoadGraph};
/// use u_waypoint::search::BidirectionalSearch;
///
/// let mut graph = RoadGraph::new();
/// for id in 1..=3 {
///     graph.add_node(NodeId(id), None);
/// }
/// graph.add_edge(NodeId(1), NodeId(2), EdgeAttributes::with_travel_time(2.0)).unwrap();
/// graph.add_edge(NodeId(2), NodeId(3), EdgeAttributes::with_travel_time(2.0)).unwrap();
/// graph.add_edge(NodeId(1), NodeId(3), EdgeAttributes::with_travel_time(5.0)).unwrap();
///
/// let search = BidirectionalSearch::new(&graph, SearchConfig::default()).unwrap();
/// let result = search.shortest_path(NodeId(1), NodeId(3)).unwrap();
/// assert_eq!(result.cost, 4.0);
/// assert_eq!(result.path, vec![NodeId(1), NodeId(2), NodeId(3)]);
///
/// let back = search.shortest_path(NodeId(3), NodeId(1)).unwrap();
/// assert!(!back.is_reachable());
/// ```
#[derive(Debug, Clone)]
pub struct BidirectionalSearch<'g> {
    graph: &'g RoadGraph,
    config: SearchConfig,
}

impl<'g> BidirectionalSearch<'g> {
    /// Creates a search, validating the configuration.
    ///
    /// The A* variant additionally requires every node to have a position.
    pub fn new(graph: &'g RoadGraph, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        if config.algorithm == SearchAlgorithm::AStar {
            if let Some(node) = graph.nodes().iter().find(|n| n.position.is_none()) {
                return Err(RoutingError::MissingPosition(node.id));
            }
        }
        Ok(Self { graph, config })
    }

    /// Search settings in use.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Shortest path from `source` to `target`.
    ///
    /// Fails only for node ids absent from the graph.
    pub fn shortest_path(&self, source: NodeId, target: NodeId) -> Result<ShortestPath> {
        let s = self.graph.index_of(source)?;
        let t = self.graph.index_of(target)?;
        if s == t {
            return Ok(ShortestPath {
                cost: 0.0,
                path: vec![source],
            });
        }

        let potential = match self.config.algorithm {
            SearchAlgorithm::Dijkstra => Potential::Zero,
            SearchAlgorithm::AStar => Potential::balanced(
                self.graph,
                s,
                t,
                self.config.coordinates,
                self.config.max_speed,
            )?,
        };

        Ok(self.run(s, t, &potential))
    }

    fn run(&self, s: usize, t: usize, potential: &Potential) -> ShortestPath {
        let graph = self.graph;
        let speed = self.config.assumed_speed;

        let mut forward = Frontier::new(s, potential.at(graph, s));
        let mut backward = Frontier::new(t, -potential.at(graph, t));

        let mut best = f64::INFINITY;
        let mut meeting: Option<usize> = None;
        let mut direction = Direction::Backward;

        while !forward.heap.is_empty() && !backward.heap.is_empty() {
            direction = direction.flip();
            let (this, other) = match direction {
                Direction::Forward => (&mut forward, &backward),
                Direction::Backward => (&mut backward, &forward),
            };

            let Some(entry) = this.heap.pop() else {
                break;
            };
            if this.finalized.contains_key(&entry.node) {
                continue;
            }
            this.finalized.insert(entry.node, entry.dist);

            if other.finalized.contains_key(&entry.node) {
                break;
            }

            let edges = match direction {
                Direction::Forward => graph.outgoing(entry.node),
                Direction::Backward => graph.incoming(entry.node),
            };
            for &e in edges {
                let edge = graph.edge(e);
                let next = match direction {
                    Direction::Forward => edge.to,
                    Direction::Backward => edge.from,
                };
                if this.finalized.contains_key(&next) {
                    continue;
                }

                let dist = entry.dist + edge.attributes.weight(speed);
                let improved = this
                    .tentative
                    .get(&next)
                    .map_or(true, |&known| dist < known);
                if !improved {
                    continue;
                }

                let key = match direction {
                    Direction::Forward => dist + potential.at(graph, next),
                    Direction::Backward => dist - potential.at(graph, next),
                };
                this.label(next, entry.node, dist, key);

                if let Some(&opposite) = other.tentative.get(&next) {
                    if dist + opposite < best {
                        best = dist + opposite;
                        meeting = Some(next);
                    }
                }
            }
        }

        match meeting {
            Some(m) if best.is_finite() => ShortestPath {
                cost: best,
                path: self.join_paths(&forward, &backward, m),
            },
            _ => ShortestPath::unreachable(),
        }
    }

    /// Forward path to `meeting` followed by the backward path from it,
    /// with the meeting node appearing once.
    fn join_paths(&self, forward: &Frontier, backward: &Frontier, meeting: usize) -> Vec<NodeId> {
        let mut path = vec![meeting];
        let mut current = meeting;
        while let Some(&prev) = forward.parent.get(&current) {
            path.push(prev);
            current = prev;
        }
        path.reverse();

        current = meeting;
        while let Some(&next) = backward.parent.get(&current) {
            path.push(next);
            current = next;
        }

        path.into_iter().map(|idx| self.graph.node(idx).id).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

impl Direction {
    fn flip(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// Priority queue entry; equal keys pop in insertion order.
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    key: f64,
    seq: u64,
    dist: f64,
    node: usize,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    // Reversed so that `BinaryHeap` pops the smallest key first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .total_cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// State of one search direction.
struct Frontier {
    heap: BinaryHeap<QueueEntry>,
    finalized: FxHashMap<usize, f64>,
    tentative: FxHashMap<usize, f64>,
    parent: FxHashMap<usize, usize>,
    seq: u64,
}

impl Frontier {
    fn new(origin: usize, key: f64) -> Self {
        let mut frontier = Self {
            heap: BinaryHeap::new(),
            finalized: FxHashMap::default(),
            tentative: FxHashMap::default(),
            parent: FxHashMap::default(),
            seq: 0,
        };
        frontier.tentative.insert(origin, 0.0);
        frontier.push(origin, 0.0, key);
        frontier
    }

    fn label(&mut self, node: usize, parent: usize, dist: f64, key: f64) {
        self.tentative.insert(node, dist);
        self.parent.insert(node, parent);
        self.push(node, dist, key);
    }

    fn push(&mut self, node: usize, dist: f64, key: f64) {
        self.heap.push(QueueEntry {
            key,
            seq: self.seq,
            dist,
            node,
        });
        self.seq += 1;
    }
}
