//! Hierholzer's Eulerian circuit and shortcutting.

/// Eulerian circuit of an undirected multigraph given as an edge list.
///
/// Every vertex must have even degree. The circuit starts and ends at
/// `start`; an isolated `start` yields `[start]`.
pub(crate) fn eulerian_circuit(n: usize, edges: &[(usize, usize)], start: usize) -> Vec<usize> {
    let mut incident: Vec<Vec<(usize, usize)>> = vec![Vec::new(); n];
    for (id, &(a, b)) in edges.iter().enumerate() {
        incident[a].push((b, id));
        incident[b].push((a, id));
    }

    let mut used = vec![false; edges.len()];
    let mut cursor = vec![0usize; n];
    let mut stack = vec![start];
    let mut circuit = Vec::with_capacity(edges.len() + 1);

    while let Some(&v) = stack.last() {
        while cursor[v] < incident[v].len() && used[incident[v][cursor[v]].1] {
            cursor[v] += 1;
        }
        match incident[v].get(cursor[v]) {
            Some(&(next, id)) => {
                used[id] = true;
                stack.push(next);
            }
            None => {
                circuit.push(v);
                stack.pop();
            }
        }
    }

    circuit.reverse();
    circuit
}

/// Keeps the first visit of every vertex and closes the cycle.
pub(crate) fn shortcut(circuit: &[usize]) -> Vec<usize> {
    let Some(&first) = circuit.first() else {
        return Vec::new();
    };
    let size = circuit.iter().copied().max().map_or(0, |m| m + 1);
    let mut seen = vec![false; size];
    let mut cycle = Vec::with_capacity(size + 1);
    for &v in circuit {
        if !seen[v] {
            seen[v] = true;
            cycle.push(v);
        }
    }
    cycle.push(first);
    cycle
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uses_every_edge_once(circuit: &[usize], edges: &[(usize, usize)]) -> bool {
        let mut remaining: Vec<(usize, usize)> = edges
            .iter()
            .map(|&(a, b)| (a.min(b), a.max(b)))
            .collect();
        for w in circuit.windows(2) {
            let key = (w[0].min(w[1]), w[0].max(w[1]));
            match remaining.iter().position(|&e| e == key) {
                Some(pos) => {
                    remaining.swap_remove(pos);
                }
                None => return false,
            }
        }
        remaining.is_empty()
    }

    #[test]
    fn test_square_circuit() {
        let edges = [(0, 1), (1, 2), (2, 3), (3, 0)];
        let circuit = eulerian_circuit(4, &edges, 0);
        assert_eq!(circuit.len(), 5);
        assert_eq!(circuit.first(), Some(&0));
        assert_eq!(circuit.last(), Some(&0));
        assert!(uses_every_edge_once(&circuit, &edges));
    }

    #[test]
    fn test_bowtie_with_parallel_edges() {
        // Two triangles sharing vertex 0, plus a doubled edge 3-4.
        let edges = [(0, 1), (1, 2), (2, 0), (0, 3), (3, 4), (4, 0), (3, 4), (4, 3)];
        let circuit = eulerian_circuit(5, &edges, 0);
        assert_eq!(circuit.len(), edges.len() + 1);
        assert_eq!(circuit.first(), circuit.last());
        assert!(uses_every_edge_once(&circuit, &edges));
    }

    #[test]
    fn test_isolated_start() {
        assert_eq!(eulerian_circuit(1, &[], 0), vec![0]);
    }

    #[test]
    fn test_shortcut_skips_repeats() {
        assert_eq!(shortcut(&[0, 1, 2, 0, 3, 4, 0]), vec![0, 1, 2, 3, 4, 0]);
        assert!(shortcut(&[]).is_empty());
    }
}
