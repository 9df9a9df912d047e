//! Engine configuration.
//!
//! Every config struct has a [`Default`], consuming `with_*` builder methods,
//! and a `validate` method that rejects out-of-domain values instead of
//! clamping them. [`EngineConfig`] can also be read from JSON.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RoutingError};
use crate::models::CoordinateSystem;

/// 30 km/h in m/s, the speed assumed for edges that only carry a length.
pub const DEFAULT_ASSUMED_SPEED: f64 = 30.0 / 3.6;

/// 130 km/h in m/s, an upper bound on road speed used by the A* potential.
pub const DEFAULT_MAX_SPEED: f64 = 130.0 / 3.6;

/// Point-to-point search variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchAlgorithm {
    /// Bidirectional Dijkstra.
    #[default]
    Dijkstra,
    /// Bidirectional A* with a straight-line travel-time potential.
    #[serde(alias = "a*", alias = "astar")]
    AStar,
}

impl FromStr for SearchAlgorithm {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(Self::Dijkstra),
            "a*" | "astar" | "a_star" => Ok(Self::AStar),
            _ => Err(RoutingError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Tour heuristic applied to the condensed graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TourHeuristic {
    /// Christofides 1.5-approximation.
    Christofides,
    /// Ant colony optimization.
    #[default]
    AntColony,
    /// Nearest-neighbour ring improved by random pairwise exchange.
    PairwiseExchange,
}

impl FromStr for TourHeuristic {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
            "christofides" => Ok(Self::Christofides),
            "ant_colony" | "aco" => Ok(Self::AntColony),
            "pairwise_exchange" | "2opt" | "two_opt" => Ok(Self::PairwiseExchange),
            _ => Err(RoutingError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Configuration of the point-to-point search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Search variant.
    pub algorithm: SearchAlgorithm,
    /// Speed (m/s) used to turn an edge length into a travel time.
    pub assumed_speed: f64,
    /// Fastest possible speed (m/s); keeps the A* potential admissible.
    pub max_speed: f64,
    /// How node positions are measured by A*.
    pub coordinates: CoordinateSystem,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            algorithm: SearchAlgorithm::Dijkstra,
            assumed_speed: DEFAULT_ASSUMED_SPEED,
            max_speed: DEFAULT_MAX_SPEED,
            coordinates: CoordinateSystem::Geographic,
        }
    }
}

impl SearchConfig {
    /// Sets the search variant.
    pub fn with_algorithm(mut self, algorithm: SearchAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Sets the speed assumed for length-only edges.
    pub fn with_assumed_speed(mut self, speed: f64) -> Self {
        self.assumed_speed = speed;
        self
    }

    /// Sets the speed bound used by the A* potential.
    pub fn with_max_speed(mut self, speed: f64) -> Self {
        self.max_speed = speed;
        self
    }

    /// Sets how positions are measured.
    pub fn with_coordinates(mut self, coordinates: CoordinateSystem) -> Self {
        self.coordinates = coordinates;
        self
    }

    /// Checks that both speeds are positive and finite.
    pub fn validate(&self) -> Result<()> {
        positive("assumed_speed", self.assumed_speed)?;
        positive("max_speed", self.max_speed)
    }
}

/// Ant colony parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColonyConfig {
    /// Pheromone influence, `>= 0`.
    pub alpha: f64,
    /// Heuristic (inverse weight) influence, `>= 0`.
    pub beta: f64,
    /// Evaporation rate in `[0, 1]`.
    pub rho: f64,
    /// Agents per iteration.
    pub n_ants: usize,
    /// Number of iterations.
    pub n_iterations: usize,
    /// Choose uniformly on the first iteration, before pheromone is informative.
    pub uniform_first_pass: bool,
    /// Seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for ColonyConfig {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            beta: 2.0,
            rho: 0.5,
            n_ants: 10,
            n_iterations: 100,
            uniform_first_pass: true,
            seed: None,
        }
    }
}

impl ColonyConfig {
    /// Sets the pheromone influence.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the heuristic influence.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the evaporation rate.
    pub fn with_rho(mut self, rho: f64) -> Self {
        self.rho = rho;
        self
    }

    /// Sets the number of agents per iteration.
    pub fn with_ants(mut self, n_ants: usize) -> Self {
        self.n_ants = n_ants;
        self
    }

    /// Sets the number of iterations.
    pub fn with_iterations(mut self, n_iterations: usize) -> Self {
        self.n_iterations = n_iterations;
        self
    }

    /// Enables or disables the uniform first pass.
    pub fn with_uniform_first_pass(mut self, enabled: bool) -> Self {
        self.uniform_first_pass = enabled;
        self
    }

    /// Fixes the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Rejects negative exponents, `rho` outside `[0, 1]` and empty runs.
    pub fn validate(&self) -> Result<()> {
        non_negative("alpha", self.alpha)?;
        non_negative("beta", self.beta)?;
        if !(0.0..=1.0).contains(&self.rho) {
            return Err(RoutingError::invalid(
                "rho",
                format!("must be within [0, 1], got {}", self.rho),
            ));
        }
        if self.n_ants == 0 {
            return Err(RoutingError::invalid("n_ants", "must be at least 1"));
        }
        if self.n_iterations == 0 {
            return Err(RoutingError::invalid("n_iterations", "must be at least 1"));
        }
        Ok(())
    }
}

/// Pairwise exchange parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeConfig {
    /// Number of random exchanges attempted.
    pub iterations: usize,
    /// Seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            seed: None,
        }
    }
}

impl ExchangeConfig {
    /// Sets the exchange budget.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Fixes the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Top-level configuration of the route engine.
///
/// # Examples
///
/// ```
/// use u_waypoint::config::{EngineConfig, TourHeuristic};
///
/// let config = EngineConfig::from_json(r#"{
///     "heuristic": "christofides",
///     "search": { "algorithm": "a_star" },
///     "round_trip": false
/// }"#).unwrap();
///
/// assert_eq!(config.heuristic, TourHeuristic::Christofides);
/// assert!(!config.round_trip);
/// assert_eq!(config.colony.n_ants, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Point-to-point search settings.
    pub search: SearchConfig,
    /// Which tour heuristic orders the waypoints.
    pub heuristic: TourHeuristic,
    /// Ant colony settings.
    pub colony: ColonyConfig,
    /// Pairwise exchange settings.
    pub exchange: ExchangeConfig,
    /// Return to the first waypoint at the end.
    pub round_trip: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            heuristic: TourHeuristic::default(),
            colony: ColonyConfig::default(),
            exchange: ExchangeConfig::default(),
            round_trip: true,
        }
    }
}

impl EngineConfig {
    /// Parses and validates a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the search settings.
    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    /// Sets the tour heuristic.
    pub fn with_heuristic(mut self, heuristic: TourHeuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Sets the ant colony settings.
    pub fn with_colony(mut self, colony: ColonyConfig) -> Self {
        self.colony = colony;
        self
    }

    /// Sets the pairwise exchange settings.
    pub fn with_exchange(mut self, exchange: ExchangeConfig) -> Self {
        self.exchange = exchange;
        self
    }

    /// Chooses between a round trip and an open path.
    pub fn with_round_trip(mut self, round_trip: bool) -> Self {
        self.round_trip = round_trip;
        self
    }

    /// Validates every section.
    pub fn validate(&self) -> Result<()> {
        self.search.validate()?;
        self.colony.validate()
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(RoutingError::invalid(
            name,
            format!("must be finite and non-negative, got {value}"),
        ));
    }
    Ok(())
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(RoutingError::invalid(
            name,
            format!("must be positive and finite, got {value}"),
        ));
    }
    Ok(())
}
