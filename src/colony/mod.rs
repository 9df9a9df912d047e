//! Ant colony optimization over the condensed graph.
//!
//! # Algorithm
//!
//! Each iteration releases `n_ants` ants from the start waypoint. An ant
//! repeatedly moves to an unvisited neighbour `j` of its current waypoint `i`
//! with probability proportional to `τ(i,j)^α · η(i,j)^β`, where `τ` is the
//! pheromone level and `η` the desirability (inverse weight unless a custom
//! function is installed). An ant with nowhere left to go returns to the
//! start.
//!
//! After all ants finish, the trails are updated. The first iteration resets
//! every trail to `1 / worst tour cost`; later iterations evaporate by
//! `(1 − ρ)`. Every tour then deposits `1 / cost` on each edge it used.
//!
//! By default tours are priced as closed cycles. With
//! [`AntColony::with_round_trip`]`(false)` the return leg is neither priced
//! nor reinforced, so one-way networks with no way back still rank.
//!
//! Ants of one iteration run on the rayon pool. Each ant owns a `StdRng`
//! seeded from the colony's master generator, so a fixed seed reproduces
//! the run regardless of scheduling.
//!
//! # Reference
//!
//! Dorigo, M., Maniezzo, V. & Colorni, A. (1996). "Ant system: optimization
//! by a colony of cooperating agents", *IEEE Trans. SMC-B* 26(1), 29-41.

mod ant;
mod pheromone;

pub use pheromone::PheromoneMatrix;

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::ColonyConfig;
use crate::error::{Result, RoutingError};
use crate::models::{CondensedGraph, Tour};

use ant::{build_tour, AntTour, ChoiceRule};

/// Desirability of moving `from → to` given the edge weight.
pub type Desirability = dyn Fn(usize, usize, f64) -> f64 + Send + Sync;

/// Smallest weight used when inverting; keeps zero-cost legs finite.
const MIN_WEIGHT: f64 = 1e-9;

fn inverse_weight(_from: usize, _to: usize, weight: f64) -> f64 {
    1.0 / weight.max(MIN_WEIGHT)
}

/// Best tour found by a colony run.
#[derive(Debug, Clone, PartialEq)]
pub struct ColonyOutcome {
    /// Visiting order, starting at the start waypoint.
    pub tour: Tour,
    /// Directed cost, including the return to the start unless the colony
    /// optimises an open path.
    pub cost: f64,
    /// `false` if no ant managed to visit every waypoint.
    pub visited_all: bool,
}

/// Ant colony optimizer.
///
/// # Examples
///
/// ```
/// use u_waypoint::colony::AntColony;
/// use u_waypoint::config::ColonyConfig;
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
/// let graph = CondensedGraph::from_matrix((0..4).map(NodeId).collect(), &weights).unwrap();
///
/// let colony = AntColony::new(ColonyConfig::default().with_seed(7)).unwrap();
/// let best = colony.run(&graph, 0).unwrap();
///
/// assert!(best.visited_all);
/// assert!((best.cost - 4.0).abs() < 1e-9);
/// ```
#[derive(Clone)]
pub struct AntColony {
    config: ColonyConfig,
    desirability: Arc<Desirability>,
    round_trip: bool,
}

impl fmt::Debug for AntColony {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AntColony")
            .field("config", &self.config)
            .field("round_trip", &self.round_trip)
            .finish_non_exhaustive()
    }
}

impl AntColony {
    /// Creates a colony, rejecting invalid parameters.
    pub fn new(config: ColonyConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            desirability: Arc::new(inverse_weight),
            round_trip: true,
        })
    }

    /// Prices tours as closed cycles (`true`, the default) or as open paths
    /// ending at the last waypoint.
    pub fn with_round_trip(mut self, round_trip: bool) -> Self {
        self.round_trip = round_trip;
        self
    }

    /// Replaces the default inverse-weight desirability.
    pub fn with_desirability<F>(mut self, desirability: F) -> Self
    where
        F: Fn(usize, usize, f64) -> f64 + Send + Sync + 'static,
    {
        self.desirability = Arc::new(desirability);
        self
    }

    /// Colony parameters.
    pub fn config(&self) -> &ColonyConfig {
        &self.config
    }

    /// Runs the colony from waypoint index `start`.
    ///
    /// Missing pairs are tolerated; check [`ColonyOutcome::visited_all`].
    pub fn run(&self, graph: &CondensedGraph, start: usize) -> Result<ColonyOutcome> {
        let n = graph.len();
        if n < 2 {
            return Err(RoutingError::DegenerateInput { waypoints: n });
        }
        if start >= n {
            return Err(RoutingError::invalid(
                "start",
                format!("index {start} out of range for {n} waypoints"),
            ));
        }

        let started = Instant::now();
        let mut master = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let mut pheromone = PheromoneMatrix::new(n, 1.0);
        let mut best: Option<AntTour> = None;

        for iteration in 0..self.config.n_iterations {
            let seeds: Vec<u64> = (0..self.config.n_ants).map(|_| master.random()).collect();
            let rule = ChoiceRule {
                alpha: self.config.alpha,
                beta: self.config.beta,
                uniform: iteration == 0 && self.config.uniform_first_pass,
                desirability: self.desirability.as_ref(),
            };

            let tours: Vec<AntTour> = seeds
                .into_par_iter()
                .map(|seed| {
                    let mut rng = StdRng::seed_from_u64(seed);
                    build_tour(graph, &pheromone, start, &rule, &mut rng)
                })
                .collect();

            if iteration == 0 {
                let worst = tours
                    .iter()
                    .map(|t| t.score(self.round_trip))
                    .filter(|c| c.is_finite())
                    .fold(f64::NEG_INFINITY, f64::max);
                let initial = if worst.is_finite() && worst > 0.0 {
                    1.0 / worst
                } else {
                    1.0
                };
                pheromone.fill(initial);
            } else {
                pheromone.evaporate(self.config.rho);
            }

            for tour in &tours {
                let score = tour.score(self.round_trip);
                if !score.is_finite() {
                    continue;
                }
                let path = if self.round_trip {
                    &tour.path[..]
                } else {
                    tour.open_path()
                };
                pheromone.deposit(path, 1.0 / score.max(MIN_WEIGHT));
            }

            for tour in tours {
                let improves = match &best {
                    Some(b) => tour.is_better_than(b, self.round_trip),
                    None => true,
                };
                if improves {
                    best = Some(tour);
                }
            }

            debug!(
                iteration,
                best_cost = best.as_ref().map_or(f64::INFINITY, |b| b.score(self.round_trip)),
                "ant colony iteration"
            );
        }

        let best = best.ok_or_else(|| RoutingError::invalid("n_ants", "no ant was released"))?;
        let cost = best.score(self.round_trip);
        info!(
            waypoints = n,
            iterations = self.config.n_iterations,
            ants = self.config.n_ants,
            round_trip = self.round_trip,
            cost,
            visited_all = best.visited_all,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "ant colony finished"
        );

        Ok(ColonyOutcome {
            tour: Tour::from_closed(best.path),
            cost,
            visited_all: best.visited_all,
        })
    }
}
