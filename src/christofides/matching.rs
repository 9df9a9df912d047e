//! Perfect matching on the odd-degree vertices of the spanning tree.

use tracing::warn;

use crate::distance::DistanceMatrix;

/// Largest vertex set matched exactly; beyond it the greedy fallback is used.
pub(crate) const EXACT_MATCHING_LIMIT: usize = 20;

/// Minimum-weight perfect matching on `vertices` (even count, complete graph).
///
/// Implemented by negating the weights and asking for a maximum-weight
/// perfect matching.
pub(crate) fn min_weight_perfect_matching(
    vertices: &[usize],
    weights: &DistanceMatrix,
) -> Vec<(usize, usize)> {
    max_weight_perfect_matching(vertices, |a, b| -weights.get(a, b))
}

/// Maximum-weight perfect matching on `vertices` under `weight`.
///
/// Exact subset dynamic programming up to [`EXACT_MATCHING_LIMIT`] vertices,
/// heaviest-edge-first greedy pairing above it.
pub(crate) fn max_weight_perfect_matching<W>(vertices: &[usize], weight: W) -> Vec<(usize, usize)>
where
    W: Fn(usize, usize) -> f64,
{
    if vertices.len() <= EXACT_MATCHING_LIMIT {
        exact_matching(vertices, &weight)
    } else {
        warn!(
            vertices = vertices.len(),
            limit = EXACT_MATCHING_LIMIT,
            "too many odd vertices for exact matching, using greedy pairing"
        );
        greedy_matching(vertices, &weight)
    }
}

/// `best[mask]` is the heaviest perfect matching of the vertex subset `mask`;
/// the lowest vertex of each subset is paired with every other member in turn.
fn exact_matching<W>(vertices: &[usize], weight: &W) -> Vec<(usize, usize)>
where
    W: Fn(usize, usize) -> f64,
{
    let k = vertices.len();
    if k == 0 || k % 2 == 1 {
        return Vec::new();
    }

    let full = (1usize << k) - 1;
    let mut best = vec![f64::NEG_INFINITY; full + 1];
    let mut partner = vec![0u8; full + 1];
    best[0] = 0.0;

    for mask in 1..=full {
        if mask.count_ones() % 2 == 1 {
            continue;
        }
        let i = mask.trailing_zeros() as usize;
        let rest = mask & !(1 << i);
        let mut others = rest;
        while others != 0 {
            let j = others.trailing_zeros() as usize;
            others &= others - 1;
            let prev = rest & !(1 << j);
            let candidate = best[prev] + weight(vertices[i], vertices[j]);
            if candidate > best[mask] {
                best[mask] = candidate;
                partner[mask] = j as u8;
            }
        }
    }

    let mut pairs = Vec::with_capacity(k / 2);
    let mut mask = full;
    while mask != 0 {
        let i = mask.trailing_zeros() as usize;
        let j = partner[mask] as usize;
        pairs.push((vertices[i], vertices[j]));
        mask &= !((1 << i) | (1 << j));
    }
    pairs
}

fn greedy_matching<W>(vertices: &[usize], weight: &W) -> Vec<(usize, usize)>
where
    W: Fn(usize, usize) -> f64,
{
    let mut candidates: Vec<(f64, usize, usize)> = Vec::new();
    for (a, &u) in vertices.iter().enumerate() {
        for &v in &vertices[a + 1..] {
            candidates.push((weight(u, v), u, v));
        }
    }
    candidates.sort_by(|x, y| y.0.total_cmp(&x.0));

    let mut matched = std::collections::HashSet::with_capacity(vertices.len());
    let mut pairs = Vec::with_capacity(vertices.len() / 2);
    for (_, u, v) in candidates {
        if !matched.contains(&u) && !matched.contains(&v) {
            matched.insert(u);
            matched.insert(v);
            pairs.push((u, v));
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_matrix(xs: &[f64]) -> DistanceMatrix {
        let n = xs.len();
        let mut dm = DistanceMatrix::new(n);
        for i in 0..n {
            for j in 0..n {
                dm.set(i, j, (xs[i] - xs[j]).abs());
            }
        }
        dm
    }

    fn cost(pairs: &[(usize, usize)], dm: &DistanceMatrix) -> f64 {
        pairs.iter().map(|&(a, b)| dm.get(a, b)).sum()
    }

    #[test]
    fn test_min_matching_pairs_neighbours() {
        // Greedy would take 1-2 (distance 1) first and then be forced into 0-3.
        let dm = line_matrix(&[0.0, 2.0, 3.0, 5.0]);
        let pairs = min_weight_perfect_matching(&[0, 1, 2, 3], &dm);
        assert_eq!(pairs.len(), 2);
        assert!((cost(&pairs, &dm) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_greedy_is_perfect() {
        let dm = line_matrix(&[0.0, 2.0, 3.0, 5.0]);
        let pairs = greedy_matching(&[0, 1, 2, 3], &|a, b| -dm.get(a, b));
        assert_eq!(pairs.len(), 2);
        let mut covered: Vec<usize> = pairs.iter().flat_map(|&(a, b)| [a, b]).collect();
        covered.sort();
        assert_eq!(covered, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_max_matching_prefers_heavy_edges() {
        let dm = line_matrix(&[0.0, 1.0, 10.0, 11.0]);
        let pairs = max_weight_perfect_matching(&[0, 1, 2, 3], |a, b| dm.get(a, b));
        // 0-3 + 1-2 = 11 + 9 = 20 ties with 0-2 + 1-3 = 10 + 10.
        assert!((cost(&pairs, &dm) - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_matching_uses_vertex_labels() {
        let dm = line_matrix(&[0.0, 7.0, 1.0, 8.0, 100.0]);
        let pairs = min_weight_perfect_matching(&[1, 3, 0, 2], &dm);
        let mut sorted: Vec<(usize, usize)> = pairs
            .into_iter()
            .map(|(a, b)| (a.min(b), a.max(b)))
            .collect();
        sorted.sort();
        assert_eq!(sorted, vec![(0, 2), (1, 3)]);
    }

    #[test]
    fn test_empty() {
        let dm = DistanceMatrix::new(0);
        assert!(min_weight_perfect_matching(&[], &dm).is_empty());
    }
}
