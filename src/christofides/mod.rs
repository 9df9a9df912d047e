//! Christofides approximation for the waypoint tour.
//!
//! # Algorithm
//!
//! 1. Minimum spanning tree (Prim).
//! 2. Minimum-weight perfect matching on the tree's odd-degree vertices.
//! 3. Eulerian circuit of tree ∪ matching (Hierholzer).
//! 4. Shortcut repeated vertices into a Hamiltonian cycle.
//!
//! Under metric weights the cycle is at most 1.5× optimal. The metric
//! property is not checked; on non-metric input the result is still a valid
//! cycle, just without the bound.
//!
//! Road costs are directed, so the approximation runs on the symmetric view
//! `min(w(u,v), w(v,u))` and the finished cycle is oriented in whichever
//! direction is cheaper under the directed weights.
//!
//! # Reference
//!
//! Christofides, N. (1976). "Worst-case analysis of a new heuristic for the
//! travelling salesman problem", Report 388, GSIA, Carnegie Mellon University.

mod euler;
mod matching;
mod mst;

use crate::error::{Result, RoutingError};
use crate::models::{CondensedGraph, Tour};

use euler::{eulerian_circuit, shortcut};
use matching::min_weight_perfect_matching;
use mst::prim_mst;

/// Builds a Christofides tour over every waypoint of a complete condensed graph.
///
/// Fails with [`RoutingError::IncompleteCondensedGraph`] if any pair is
/// missing, and with [`RoutingError::DegenerateInput`] below two waypoints.
///
/// # Examples
///
/// ```
/// use u_waypoint::christofides::christofides;
/// use u_waypoint::distance::DistanceMatrix;
/// use u_waypoint::models::{CondensedGraph, NodeId};
///
/// let d = std::f64::consts::SQRT_2;
/// let weights = DistanceMatrix::from_data(4, vec![
///     0.0, 1.0, d, 1.0,
///     1.0, 0.0, 1.0, d,
///     d, 1.0, 0.0, 1.0,
///     1.0, d, 1.0, 0.0,
/// ]).unwrap();
/// let waypoints = (0..4).map(NodeId).collect();
/// let graph = CondensedGraph::from_matrix(waypoints, &weights).unwrap();
///
/// let tour = christofides(&graph).unwrap();
/// assert!((weights.cycle_cost(tour.stops()) - 4.0).abs() < 1e-12);
/// ```
pub fn christofides(graph: &CondensedGraph) -> Result<Tour> {
    let n = graph.len();
    if n < 2 {
        return Err(RoutingError::DegenerateInput { waypoints: n });
    }
    graph.require_complete()?;

    if n == 2 {
        return Ok(Tour::new(vec![0, 1]));
    }

    let symmetric = graph.weights().symmetrized();

    let tree = prim_mst(&symmetric);
    let mut degree = vec![0usize; n];
    for &(a, b) in &tree {
        degree[a] += 1;
        degree[b] += 1;
    }
    let odd: Vec<usize> = (0..n).filter(|&v| degree[v] % 2 == 1).collect();
    let matching = min_weight_perfect_matching(&odd, &symmetric);

    let mut multigraph = tree;
    multigraph.extend(matching);

    let circuit = eulerian_circuit(n, &multigraph, 0);
    let tour = Tour::from_closed(shortcut(&circuit));

    let directed = graph.weights();
    let reversed = tour.reversed();
    if directed.cycle_cost(reversed.stops()) < directed.cycle_cost(tour.stops()) {
        Ok(reversed)
    } else {
        Ok(tour)
    }
}
