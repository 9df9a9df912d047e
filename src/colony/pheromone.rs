//! Pheromone trail storage.

/// Dense pheromone levels on directed waypoint pairs.
///
/// Owned by a single colony run. Ants read it through a shared borrow while
/// building tours; it is only written between iterations.
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneMatrix {
    data: Vec<f64>,
    size: usize,
}

impl PheromoneMatrix {
    /// Creates a matrix with every pair at `initial`.
    pub fn new(size: usize, initial: f64) -> Self {
        Self {
            data: vec![initial; size * size],
            size,
        }
    }

    /// Pheromone on the edge `from → to`.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Resets every pair to `value`.
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Multiplies every pair by `1 - rho`.
    pub fn evaporate(&mut self, rho: f64) {
        let keep = 1.0 - rho;
        for tau in &mut self.data {
            *tau *= keep;
        }
    }

    /// Adds `amount` to each directed edge along the closed walk `path`.
    pub fn deposit(&mut self, path: &[usize], amount: f64) {
        for w in path.windows(2) {
            self.data[w[0] * self.size + w[1]] += amount;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaporate_then_deposit() {
        let mut p = PheromoneMatrix::new(3, 1.0);
        p.evaporate(0.25);
        assert!((p.get(0, 1) - 0.75).abs() < 1e-12);
        p.deposit(&[0, 1, 2, 0], 0.5);
        assert!((p.get(0, 1) - 1.25).abs() < 1e-12);
        assert!((p.get(2, 0) - 1.25).abs() < 1e-12);
        // Only the traversed direction is reinforced.
        assert!((p.get(1, 0) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_full_evaporation() {
        let mut p = PheromoneMatrix::new(2, 3.0);
        p.evaporate(1.0);
        assert_eq!(p.get(0, 1), 0.0);
        p.fill(0.2);
        assert_eq!(p.get(1, 0), 0.2);
    }
}
