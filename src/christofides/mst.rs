//! Prim's minimum spanning tree on a dense symmetric matrix.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::distance::DistanceMatrix;

#[derive(Debug, Clone, Copy)]
struct FrontierEdge {
    weight: f64,
    seq: usize,
    from: usize,
    to: usize,
}

impl PartialEq for FrontierEdge {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEdge {}

impl PartialOrd for FrontierEdge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEdge {
    // Min-heap on weight, then insertion order.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Grows a spanning tree from node 0 and returns its edges in the order they
/// were added. Self-loops are never considered.
///
/// Nodes unreachable through finite weights are left out of the tree.
pub(crate) fn prim_mst(weights: &DistanceMatrix) -> Vec<(usize, usize)> {
    let n = weights.size();
    if n == 0 {
        return Vec::new();
    }

    let mut visited = vec![false; n];
    let mut heap = BinaryHeap::new();
    let mut seq = 0;
    let mut tree = Vec::with_capacity(n - 1);

    let mut push_frontier = |heap: &mut BinaryHeap<FrontierEdge>, visited: &[bool], from: usize| {
        for to in 0..n {
            let weight = weights.get(from, to);
            if to != from && !visited[to] && weight.is_finite() {
                heap.push(FrontierEdge {
                    weight,
                    seq,
                    from,
                    to,
                });
                seq += 1;
            }
        }
    };

    visited[0] = true;
    push_frontier(&mut heap, &visited, 0);

    while let Some(edge) = heap.pop() {
        if visited[edge.to] {
            continue;
        }
        visited[edge.to] = true;
        tree.push((edge.from, edge.to));
        if tree.len() == n - 1 {
            break;
        }
        push_frontier(&mut heap, &visited, edge.to);
    }

    tree
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(weights: &DistanceMatrix, tree: &[(usize, usize)]) -> f64 {
        tree.iter().map(|&(a, b)| weights.get(a, b)).sum()
    }

    #[test]
    fn test_unit_square_tree() {
        let d = std::f64::consts::SQRT_2;
        let dm = DistanceMatrix::from_data(
            4,
            vec![0.0, 1.0, d, 1.0, 1.0, 0.0, 1.0, d, d, 1.0, 0.0, 1.0, 1.0, d, 1.0, 0.0],
        )
        .unwrap();
        let tree = prim_mst(&dm);
        assert_eq!(tree.len(), 3);
        assert!((total(&dm, &tree) - 3.0).abs() < 1e-12);
        // Ties resolve in insertion order: 0-1 and 0-3 come before 1-2.
        assert_eq!(tree, vec![(0, 1), (0, 3), (1, 2)]);
    }

    #[test]
    fn test_line_tree() {
        // Points on a line at 0, 1, 3, 6.
        let xs = [0.0f64, 1.0, 3.0, 6.0];
        let mut dm = DistanceMatrix::new(4);
        for i in 0..4 {
            for j in 0..4 {
                dm.set(i, j, (xs[i] - xs[j]).abs());
            }
        }
        let tree = prim_mst(&dm);
        assert_eq!(tree, vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn test_single_node() {
        assert!(prim_mst(&DistanceMatrix::new(1)).is_empty());
    }
}
