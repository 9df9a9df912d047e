//! Tour construction by a single ant.

use rand::Rng;

use super::pheromone::PheromoneMatrix;
use super::Desirability;
use crate::models::CondensedGraph;

/// Closed walk produced by one ant.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AntTour {
    /// Visited waypoints, starting and ending at the start waypoint.
    pub path: Vec<usize>,
    /// Directed cost of `path`; infinite when the return leg is missing.
    pub cost: f64,
    /// Cost of `path` without the return leg.
    pub open_cost: f64,
    /// Whether every waypoint was visited before returning.
    pub visited_all: bool,
}

impl AntTour {
    /// Cost the colony minimises: the closed cycle or the open path.
    pub fn score(&self, round_trip: bool) -> f64 {
        if round_trip {
            self.cost
        } else {
            self.open_cost
        }
    }

    /// `path` without the return to the start.
    pub fn open_path(&self) -> &[usize] {
        match self.path.split_last() {
            Some((last, rest)) if !rest.is_empty() && Some(last) == rest.first() => rest,
            _ => &self.path,
        }
    }

    /// Complete tours beat incomplete ones, then the lower score wins.
    pub fn is_better_than(&self, other: &AntTour, round_trip: bool) -> bool {
        match (self.visited_all, other.visited_all) {
            (true, false) => true,
            (false, true) => false,
            _ => self.score(round_trip) < other.score(round_trip),
        }
    }
}

/// Per-iteration choice rule shared by all ants.
pub(crate) struct ChoiceRule<'a> {
    pub alpha: f64,
    pub beta: f64,
    /// Ignore pheromone and desirability, choose uniformly.
    pub uniform: bool,
    pub desirability: &'a Desirability,
}

/// Walks from `start` until no unvisited neighbour is left, then returns to `start`.
pub(crate) fn build_tour<R: Rng>(
    graph: &CondensedGraph,
    pheromone: &PheromoneMatrix,
    start: usize,
    rule: &ChoiceRule<'_>,
    rng: &mut R,
) -> AntTour {
    let n = graph.len();
    let mut visited = vec![false; n];
    visited[start] = true;
    let mut path = Vec::with_capacity(n + 1);
    path.push(start);
    let mut cost = 0.0;
    let mut current = start;
    let mut candidates = Vec::with_capacity(n);
    let mut scores = Vec::with_capacity(n);

    loop {
        candidates.clear();
        candidates.extend(graph.neighbors(current).filter(|&to| !visited[to]));
        if candidates.is_empty() {
            break;
        }

        let next = if rule.uniform {
            candidates[rng.random_range(0..candidates.len())]
        } else {
            scores.clear();
            scores.extend(candidates.iter().map(|&to| {
                let eta = (rule.desirability)(current, to, graph.weight(current, to));
                pheromone.get(current, to).powf(rule.alpha) * eta.powf(rule.beta)
            }));
            candidates[roulette(&scores, rng)]
        };

        cost += graph.weight(current, next);
        visited[next] = true;
        path.push(next);
        current = next;
    }

    let open_cost = cost;
    if current != start {
        cost += graph.weight(current, start);
        path.push(start);
    }

    AntTour {
        path,
        cost,
        open_cost,
        visited_all: visited.iter().all(|&v| v),
    }
}

/// Index drawn with probability proportional to `scores`.
///
/// Falls back to a uniform draw when the scores carry no usable mass.
fn roulette<R: Rng>(scores: &[f64], rng: &mut R) -> usize {
    let total: f64 = scores.iter().filter(|s| s.is_finite() && **s > 0.0).sum();
    if !(total.is_finite() && total > 0.0) {
        return rng.random_range(0..scores.len());
    }

    let mut threshold = rng.random::<f64>() * total;
    let mut last = 0;
    for (i, &s) in scores.iter().enumerate() {
        if !(s.is_finite() && s > 0.0) {
            continue;
        }
        last = i;
        if threshold < s {
            return i;
        }
        threshold -= s;
    }
    last
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::models::NodeId;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn inverse(_: usize, _: usize, w: f64) -> f64 {
        1.0 / w
    }

    fn graph(size: usize, edges: &[(usize, usize, f64)]) -> CondensedGraph {
        let mut dm = DistanceMatrix::new(size);
        for &(a, b, w) in edges {
            dm.set(a, b, w);
        }
        CondensedGraph::from_matrix((0..size as u64).map(NodeId).collect(), &dm).unwrap()
    }

    #[test]
    fn test_roulette_skips_zero_scores() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            assert_eq!(roulette(&[0.0, 2.0, 0.0], &mut rng), 1);
        }
    }

    #[test]
    fn test_roulette_uniform_when_all_zero() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut hits = [0usize; 3];
        for _ in 0..300 {
            hits[roulette(&[0.0, 0.0, 0.0], &mut rng)] += 1;
        }
        assert!(hits.iter().all(|&h| h > 0));
    }

    #[test]
    fn test_full_tour_on_complete_graph() {
        let g = graph(3, &[(0, 1, 1.0), (1, 0, 1.0), (1, 2, 1.0), (2, 1, 1.0), (0, 2, 1.0), (2, 0, 1.0)]);
        let p = PheromoneMatrix::new(3, 1.0);
        let rule = ChoiceRule {
            alpha: 1.0,
            beta: 1.0,
            uniform: false,
            desirability: &inverse,
        };
        let tour = build_tour(&g, &p, 0, &rule, &mut StdRng::seed_from_u64(1));
        assert!(tour.visited_all);
        assert_eq!(tour.path.len(), 4);
        assert_eq!(tour.path.first(), tour.path.last());
        assert!((tour.cost - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_dead_end_returns_to_start() {
        // 0 -> 1 only, 1 -> 0 only, 2 unreachable.
        let g = graph(3, &[(0, 1, 2.0), (1, 0, 3.0)]);
        let p = PheromoneMatrix::new(3, 1.0);
        let rule = ChoiceRule {
            alpha: 1.0,
            beta: 1.0,
            uniform: true,
            desirability: &inverse,
        };
        let tour = build_tour(&g, &p, 0, &rule, &mut StdRng::seed_from_u64(1));
        assert!(!tour.visited_all);
        assert_eq!(tour.path, vec![0, 1, 0]);
        assert!((tour.cost - 5.0).abs() < 1e-12);
        assert!((tour.open_cost - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_missing_return_leg_is_infinite() {
        let g = graph(2, &[(0, 1, 1.0)]);
        let p = PheromoneMatrix::new(2, 1.0);
        let rule = ChoiceRule {
            alpha: 1.0,
            beta: 1.0,
            uniform: false,
            desirability: &inverse,
        };
        let tour = build_tour(&g, &p, 0, &rule, &mut StdRng::seed_from_u64(1));
        assert!(tour.visited_all);
        assert!(tour.cost.is_infinite());
        assert_eq!(tour.open_cost, 1.0);
        assert_eq!(tour.open_path(), &[0, 1]);
    }

    #[test]
    fn test_complete_tour_preferred() {
        let complete = AntTour {
            path: vec![0, 1, 2, 0],
            cost: f64::INFINITY,
            open_cost: 7.0,
            visited_all: true,
        };
        let partial = AntTour {
            path: vec![0, 1, 0],
            cost: 2.0,
            open_cost: 1.0,
            visited_all: false,
        };
        assert!(complete.is_better_than(&partial, true));
        assert!(!partial.is_better_than(&complete, true));
        assert!(complete.is_better_than(&partial, false));
    }

    #[test]
    fn test_open_score_ignores_return_leg() {
        let no_way_back = AntTour {
            path: vec![0, 1, 2, 0],
            cost: f64::INFINITY,
            open_cost: 2.0,
            visited_all: true,
        };
        let closed = AntTour {
            path: vec![0, 2, 1, 0],
            cost: 30.0,
            open_cost: 12.0,
            visited_all: true,
        };
        assert!(closed.is_better_than(&no_way_back, true));
        assert!(no_way_back.is_better_than(&closed, false));
        assert_eq!(no_way_back.open_path(), &[0, 1, 2]);
    }
}
