//! End-to-end waypoint routing: condense, order, expand.

use std::time::Instant;

use tracing::info;

use crate::christofides::christofides;
use crate::colony::AntColony;
use crate::condense::{Completeness, GraphCondenser};
use crate::config::{EngineConfig, TourHeuristic};
use crate::constructive::nearest_neighbor_tour;
use crate::error::{Result, RoutingError};
use crate::local_search::pairwise_exchange;
use crate::models::{CondensedGraph, NodeId, RoadGraph, RoutePlan, Tour};

/// Plans a route through a set of waypoints on a road graph.
///
/// # Examples
///
/// ```
/// use u_waypoint::config::{EngineConfig, TourHeuristic};
/// use u_waypoint::engine::RouteEngine;
/// use u_waypoint::models::{EdgeAttributes, NodeId, RoadGraph};
///
/// // Ring 1-2-3-4 with unit travel times.
/// let mut graph = RoadGraph::new();
/// for id in 1..=4 {
///     graph.add_node(NodeId(id), None);
/// }
/// for (a, b) in [(1, 2), (2, 3), (3, 4), (4, 1)] {
///     graph.add_two_way_edge(NodeId(a), NodeId(b), EdgeAttributes::with_travel_time(1.0)).unwrap();
/// }
///
/// let engine = RouteEngine::new(
///     EngineConfig::default().with_heuristic(TourHeuristic::Christofides),
/// ).unwrap();
/// let plan = engine.plan(&graph, &[NodeId(1), NodeId(3), NodeId(2)]).unwrap();
///
/// assert_eq!(plan.total_cost, 4.0);
/// assert_eq!(plan.visiting_order.first(), Some(&NodeId(1)));
/// assert_eq!(plan.visiting_order.last(), Some(&NodeId(1)));
/// ```
#[derive(Debug, Clone)]
pub struct RouteEngine {
    config: EngineConfig,
}

impl RouteEngine {
    /// Creates an engine, validating the configuration.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Condenses `graph` onto `waypoints`, orders them and expands the
    /// result into a full node route starting at the first waypoint.
    pub fn plan(&self, graph: &RoadGraph, waypoints: &[NodeId]) -> Result<RoutePlan> {
        let started = Instant::now();

        let completeness = match self.config.heuristic {
            TourHeuristic::AntColony => Completeness::Partial,
            TourHeuristic::Christofides | TourHeuristic::PairwiseExchange => Completeness::Required,
        };
        let condenser = GraphCondenser::new(graph, self.config.search.clone())?;
        let condensed = condenser.condense(waypoints, completeness)?;

        let tour = if condensed.len() == 2 {
            Tour::new(vec![0, 1])
        } else {
            self.order(&condensed)?
        };
        let plan = self.expand(&condensed, &tour)?;

        info!(
            waypoints = waypoints.len(),
            heuristic = ?self.config.heuristic,
            total_cost = plan.total_cost,
            route_nodes = plan.full_route.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "route planned"
        );
        Ok(plan)
    }

    /// Orders the waypoints of `graph` with the configured heuristic.
    ///
    /// The returned tour visits every waypoint and starts at index 0.
    pub fn order(&self, graph: &CondensedGraph) -> Result<Tour> {
        let n = graph.len();
        if n < 2 {
            return Err(RoutingError::DegenerateInput { waypoints: n });
        }

        let started = Instant::now();
        let tour = match self.config.heuristic {
            TourHeuristic::Christofides => christofides(graph)?,
            TourHeuristic::AntColony => {
                let outcome = AntColony::new(self.config.colony.clone())?
                    .with_round_trip(self.config.round_trip)
                    .run(graph, 0)?;
                if !outcome.visited_all {
                    let mut seen = vec![false; n];
                    for &s in outcome.tour.stops() {
                        seen[s] = true;
                    }
                    let missing = seen.iter().position(|&v| !v).unwrap_or(0);
                    return Err(RoutingError::Unreachable {
                        from: graph.waypoints()[0],
                        to: graph.waypoints()[missing],
                    });
                }
                outcome.tour
            }
            TourHeuristic::PairwiseExchange => {
                graph.require_complete()?;
                let ring = nearest_neighbor_tour(graph.weights(), 0);
                pairwise_exchange(graph.weights(), &ring, &self.config.exchange)
            }
        };

        let weights = graph.weights();
        let cost = if self.config.round_trip {
            weights.cycle_cost(tour.stops())
        } else {
            weights.path_cost(tour.stops())
        };
        info!(
            heuristic = ?self.config.heuristic,
            waypoints = n,
            round_trip = self.config.round_trip,
            cost,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "tour optimised"
        );

        Ok(match tour.rotated_to(0) {
            Some(rotated) => rotated,
            None => tour,
        })
    }

    /// Expands a tour into road nodes by concatenating the stored legs.
    ///
    /// With `round_trip` the closing leg back to the first stop is included.
    /// A leg missing from `graph` fails with [`RoutingError::Unreachable`];
    /// a stop outside `graph` with [`RoutingError::InvalidParameter`].
    pub fn expand(&self, graph: &CondensedGraph, tour: &Tour) -> Result<RoutePlan> {
        let stops = tour.stops();
        let waypoints = graph.waypoints();
        if let Some(&bad) = stops.iter().find(|&&s| s >= waypoints.len()) {
            return Err(RoutingError::invalid(
                "tour",
                format!("stop {bad} out of range for {} waypoints", waypoints.len()),
            ));
        }

        let mut legs: Vec<(usize, usize)> = stops.windows(2).map(|w| (w[0], w[1])).collect();
        if self.config.round_trip && stops.len() >= 2 {
            legs.push((stops[stops.len() - 1], stops[0]));
        }

        let mut full_route: Vec<NodeId> = stops.first().map(|&s| waypoints[s]).into_iter().collect();
        let mut total_cost = 0.0;
        for (from, to) in legs {
            let edge = graph.edge(from, to).ok_or(RoutingError::Unreachable {
                from: waypoints[from],
                to: waypoints[to],
            })?;
            full_route.extend(edge.path.iter().skip(1).copied());
            total_cost += edge.weight;
        }

        let mut visiting_order: Vec<NodeId> = stops.iter().map(|&s| waypoints[s]).collect();
        if self.config.round_trip && stops.len() >= 2 {
            visiting_order.push(waypoints[stops[0]]);
        }

        Ok(RoutePlan {
            full_route,
            total_cost,
            visiting_order,
        })
    }
}
