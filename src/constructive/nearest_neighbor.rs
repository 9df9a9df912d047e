//! Nearest-neighbour ring construction.
//!
//! Starting from one waypoint, always move to the cheapest unvisited
//! waypoint, then close the ring back to the start.
//!
//! # Complexity
//!
//! O(n²) where n = number of waypoints.

use crate::distance::DistanceMatrix;
use crate::models::Tour;

/// Builds a cyclic tour over every waypoint of `weights`, starting at `start`.
///
/// Ties go to the lowest waypoint index. Missing pairs (infinite weights)
/// are only taken when nothing finite is left, so the result always visits
/// every waypoint.
///
/// # Examples
///
/// ```
/// use u_waypoint::constructive::nearest_neighbor_tour;
/// use u_waypoint::distance::DistanceMatrix;
///
/// // Points on a line at 0, 1, 2, 3.
/// let mut dm = DistanceMatrix::new(4);
/// for i in 0..4 {
///     for j in 0..4 {
///         dm.set(i, j, (i as f64 - j as f64).abs());
///     }
/// }
///
/// let tour = nearest_neighbor_tour(&dm, 0);
/// assert_eq!(tour.stops(), &[0, 1, 2, 3]);
/// assert!((dm.cycle_cost(tour.stops()) - 6.0).abs() < 1e-10);
/// ```
pub fn nearest_neighbor_tour(weights: &DistanceMatrix, start: usize) -> Tour {
    let n = weights.size();
    if start >= n {
        return Tour::new(Vec::new());
    }

    let mut remaining: Vec<usize> = (0..n).filter(|&i| i != start).collect();
    let mut stops = Vec::with_capacity(n);
    stops.push(start);
    let mut current = start;

    while let Some(next) = weights.nearest_neighbor(current, &remaining) {
        remaining.retain(|&i| i != next);
        stops.push(next);
        current = next;
    }

    Tour::new(stops)
}
