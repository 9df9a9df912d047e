//! Dense travel-cost matrix over waypoints.

/// A dense n×n travel-cost matrix stored in row-major order.
///
/// Missing pairs hold `f64::INFINITY`; the diagonal is zero.
///
/// # Examples
///
/// ```
/// use u_waypoint::distance::DistanceMatrix;
///
/// let mut dm = DistanceMatrix::new(3);
/// dm.set(0, 1, 5.0);
/// assert_eq!(dm.get(0, 1), 5.0);
/// assert!(dm.get(1, 0).is_infinite());
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a matrix of the given size with every off-diagonal pair missing.
    pub fn new(size: usize) -> Self {
        let mut data = vec![f64::INFINITY; size * size];
        for i in 0..size {
            data[i * size + i] = 0.0;
        }
        Self { data, size }
    }

    /// Creates a matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the cost from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the cost from `from` to `to`.
    pub fn set(&mut self, from: usize, to: usize, cost: f64) {
        self.data[from * self.size + to] = cost;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Undirected view: each pair takes the cheaper of its two directions.
    pub fn symmetrized(&self) -> Self {
        let mut out = self.clone();
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                let w = self.get(i, j).min(self.get(j, i));
                out.set(i, j, w);
                out.set(j, i, w);
            }
        }
        out
    }

    /// Cost of visiting `stops` in order, returning to the first stop.
    ///
    /// Empty and single-stop tours cost zero.
    pub fn cycle_cost(&self, stops: &[usize]) -> f64 {
        if stops.len() < 2 {
            return 0.0;
        }
        let closing = self.get(stops[stops.len() - 1], stops[0]);
        self.path_cost(stops) + closing
    }

    /// Cost of visiting `stops` in order without returning.
    pub fn path_cost(&self, stops: &[usize]) -> f64 {
        stops.windows(2).map(|w| self.get(w[0], w[1])).sum()
    }

    /// Returns the nearest candidate from `from`, ties going to the earlier candidate.
    ///
    /// Returns `None` if `candidates` is empty.
    pub fn nearest_neighbor(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        candidates
            .iter()
            .copied()
            .min_by(|&a, &b| self.get(from, a).total_cmp(&self.get(from, b)))
    }
}
