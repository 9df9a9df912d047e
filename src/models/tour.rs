//! Tour and route plan types.

use serde::{Deserialize, Serialize};

use super::NodeId;

/// A cyclic visiting order over waypoint indices.
///
/// The return to the first stop is implicit; [`closed`](Self::closed)
/// materialises it.
///
/// # Examples
///
/// ```
/// use u_waypoint::models::Tour;
///
/// let tour = Tour::from_closed(vec![0, 2, 1, 0]);
/// assert_eq!(tour.stops(), &[0, 2, 1]);
/// assert_eq!(tour.closed(), vec![0, 2, 1, 0]);
///
/// let rotated = tour.rotated_to(1).unwrap();
/// assert_eq!(rotated.stops(), &[1, 0, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tour {
    stops: Vec<usize>,
}

impl Tour {
    /// Creates a tour from stops without the closing repetition.
    pub fn new(stops: Vec<usize>) -> Self {
        Self { stops }
    }

    /// Creates a tour from a closed sequence, dropping the repeated last stop.
    pub fn from_closed(mut closed: Vec<usize>) -> Self {
        if closed.len() > 1 && closed.first() == closed.last() {
            closed.pop();
        }
        Self { stops: closed }
    }

    /// Stops in visiting order.
    pub fn stops(&self) -> &[usize] {
        &self.stops
    }

    /// Stops followed by the first stop again.
    pub fn closed(&self) -> Vec<usize> {
        let mut seq = self.stops.clone();
        if let Some(&first) = self.stops.first() {
            seq.push(first);
        }
        seq
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns `true` if the tour has no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Same cycle starting at `stop`, or `None` if the stop is not visited.
    pub fn rotated_to(&self, stop: usize) -> Option<Self> {
        let pos = self.stops.iter().position(|&s| s == stop)?;
        let mut stops = self.stops.clone();
        stops.rotate_left(pos);
        Some(Self { stops })
    }

    /// Same cycle traversed in the opposite direction, keeping the first stop.
    pub fn reversed(&self) -> Self {
        let mut stops = self.stops.clone();
        if stops.len() > 2 {
            stops[1..].reverse();
        }
        Self { stops }
    }

    /// Returns `true` if the tour visits each of `0..n` exactly once.
    pub fn is_permutation_of(&self, n: usize) -> bool {
        if self.stops.len() != n {
            return false;
        }
        let mut seen = vec![false; n];
        for &s in &self.stops {
            if s >= n || seen[s] {
                return false;
            }
            seen[s] = true;
        }
        true
    }
}

/// Final result handed to the reporting side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    /// Every road node along the route, in travel order.
    pub full_route: Vec<NodeId>,
    /// Total travel cost of the route.
    pub total_cost: f64,
    /// Waypoints in visiting order; for round trips the start is repeated at the end.
    pub visiting_order: Vec<NodeId>,
}
