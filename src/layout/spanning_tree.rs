//! Edge topology selection: Kruskal's minimum spanning tree plus extras.
//!
//! # Algorithm Overview
//!
//! 1. Weigh every unordered node pair by
//!    `distance / (radius_a * radius_b)^radii_weight_power`, so large nearby
//!    nodes are preferred. Sort ascending.
//! 2. Run Kruskal over the sorted pairs with a fresh [`DisjointSet`],
//!    stopping at `n - 1` tree edges.
//! 3. Keep scanning the same list, appending non-tree pairs until the ideal
//!    edge count `round((n - 1) * (1 + extra_edge_proportion))` is reached.
//!
//! The result is an ordered ideal edge set: tree edges first (by weight),
//! then extras (by weight). Callers backfill in that order so connectivity
//! is restored before decorative edges.

use crate::graph::{DisjointSet, Node};

/// An unordered node pair with its edge weight.
///
/// `i` and `j` index into the node slice the pairs were computed from, with
/// `j < i`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedPair {
    pub weight: f64,
    pub i: usize,
    pub j: usize,
}

/// All `n * (n - 1) / 2` pairs sorted by ascending weight.
///
/// The sort is stable and uses IEEE total ordering, so NaN weights from a
/// degenerate configuration sink to the end instead of panicking.
pub fn weighted_pairs(nodes: &[Node], radii_weight_power: f64) -> Vec<WeightedPair> {
    let n = nodes.len();
    let mut pairs = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        let a = &nodes[i];
        for j in 0..i {
            let b = &nodes[j];
            let discount = (a.radius * b.radius).powf(radii_weight_power);
            pairs.push(WeightedPair {
                weight: a.distance_to(b) / discount,
                i,
                j,
            });
        }
    }
    pairs.sort_by(|p, q| p.weight.total_cmp(&q.weight));
    pairs
}

/// Kruskal's algorithm over pre-sorted pairs.
///
/// Returns positions into `pairs` of the tree edges, in ascending weight
/// order. Stops after `node_count - 1` edges or when `pairs` runs out.
pub fn spanning_tree(node_count: usize, pairs: &[WeightedPair]) -> Vec<usize> {
    let target = node_count.saturating_sub(1);
    let mut tree = Vec::with_capacity(target);
    if target == 0 {
        return tree;
    }

    let mut sets = DisjointSet::new(node_count);
    for (pos, pair) in pairs.iter().enumerate() {
        if sets.merge_sets(pair.i, pair.j) {
            tree.push(pos);
            if tree.len() >= target {
                break;
            }
        }
    }
    tree
}

/// Number of edges the animation aims to show for `node_count` nodes.
pub fn ideal_edge_count(node_count: usize, extra_edge_proportion: f64) -> usize {
    if node_count == 0 {
        return 0;
    }
    let ideal = ((node_count - 1) as f64 * (1.0 + extra_edge_proportion)).round();
    // `as` saturates, so NaN and negatives land on 0
    ideal as usize
}

/// The ordered ideal edge set for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct IdealEdges {
    /// `(i, j)` node index pairs: tree edges first, then extras.
    pub pairs: Vec<(usize, usize)>,
    /// How many leading entries of `pairs` form the spanning tree.
    pub tree_len: usize,
    /// Target size of the live edge collection. May exceed `pairs.len()`
    /// when the extra proportion asks for more pairs than exist.
    pub target: usize,
}

/// Compute the ideal edge set over `nodes`.
pub fn ideal_edges(
    nodes: &[Node],
    radii_weight_power: f64,
    extra_edge_proportion: f64,
) -> IdealEdges {
    let n = nodes.len();
    let target = ideal_edge_count(n, extra_edge_proportion);
    let pairs = weighted_pairs(nodes, radii_weight_power);
    let tree = spanning_tree(n, &pairs);

    let mut in_tree = vec![false; pairs.len()];
    let capacity = target.min(pairs.len()).max(tree.len());
    let mut chosen: Vec<(usize, usize)> = Vec::with_capacity(capacity);
    for &pos in &tree {
        in_tree[pos] = true;
        chosen.push((pairs[pos].i, pairs[pos].j));
    }
    let tree_len = chosen.len();

    for (pos, pair) in pairs.iter().enumerate() {
        if chosen.len() >= target {
            break;
        }
        if !in_tree[pos] {
            chosen.push((pair.i, pair.j));
        }
    }

    IdealEdges {
        pairs: chosen,
        tree_len,
        target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeId;
    use petgraph::algo::min_spanning_tree;
    use petgraph::data::Element;
    use petgraph::graph::UnGraph;

    fn nodes_at(coords: &[(f64, f64, f64)]) -> Vec<Node> {
        coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y, r))| Node::new(NodeId(i as u32), x, y, r))
            .collect()
    }

    fn fixture() -> Vec<Node> {
        nodes_at(&[
            (0.10, 0.10, 0.020),
            (0.90, 0.15, 0.015),
            (0.50, 0.50, 0.030),
            (0.20, 0.80, 0.012),
            (0.75, 0.70, 0.025),
            (0.45, 0.05, 0.018),
            (0.05, 0.45, 0.022),
            (0.60, 0.95, 0.016),
        ])
    }

    fn reference_mst_weight(nodes: &[Node], power: f64) -> f64 {
        let mut graph = UnGraph::<(), f64>::new_undirected();
        let idx: Vec<_> = nodes.iter().map(|_| graph.add_node(())).collect();
        for p in weighted_pairs(nodes, power) {
            graph.add_edge(idx[p.i], idx[p.j], p.weight);
        }
        min_spanning_tree(&graph)
            .filter_map(|element| match element {
                Element::Edge { weight, .. } => Some(weight),
                Element::Node { .. } => None,
            })
            .sum()
    }

    #[test]
    fn test_pairs_sorted_and_complete() {
        let nodes = fixture();
        let pairs = weighted_pairs(&nodes, 0.1);
        assert_eq!(pairs.len(), 8 * 7 / 2);
        assert!(pairs.windows(2).all(|w| w[0].weight <= w[1].weight));
        assert!(pairs.iter().all(|p| p.j < p.i));
    }

    #[test]
    fn test_radius_discount_prefers_large_nodes() {
        // Node 0 is equidistant from 1 and 2, but node 2 is larger
        let nodes = nodes_at(&[(0.5, 0.5, 0.02), (0.3, 0.5, 0.01), (0.7, 0.5, 0.04)]);
        let pairs = weighted_pairs(&nodes, 1.0);
        let w01 = pairs.iter().find(|p| (p.i, p.j) == (1, 0)).map(|p| p.weight);
        let w02 = pairs.iter().find(|p| (p.i, p.j) == (2, 0)).map(|p| p.weight);
        assert!(w02 < w01);
    }

    #[test]
    fn test_zero_power_is_plain_distance() {
        let nodes = nodes_at(&[(0.0, 0.0, 0.5), (0.3, 0.4, 0.2)]);
        let pairs = weighted_pairs(&nodes, 0.0);
        assert!((pairs[0].weight - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_tree_matches_reference_weight() {
        let nodes = fixture();
        for &power in &[0.0, 0.1, 0.5, 1.0] {
            let pairs = weighted_pairs(&nodes, power);
            let tree = spanning_tree(nodes.len(), &pairs);
            assert_eq!(tree.len(), nodes.len() - 1);

            let ours: f64 = tree.iter().map(|&pos| pairs[pos].weight).sum();
            let reference = reference_mst_weight(&nodes, power);
            assert!(
                (ours - reference).abs() < 1e-9,
                "power {power}: kruskal {ours} vs reference {reference}"
            );
        }
    }

    #[test]
    fn test_tree_is_connected_and_acyclic() {
        let nodes = fixture();
        let pairs = weighted_pairs(&nodes, 0.1);
        let tree = spanning_tree(nodes.len(), &pairs);

        // n-1 edges that never close a cycle span everything
        let mut sets = DisjointSet::new(nodes.len());
        for &pos in &tree {
            assert!(sets.merge_sets(pairs[pos].i, pairs[pos].j), "cycle in tree");
        }
        for i in 1..nodes.len() {
            assert!(!sets.merge_sets(0, i), "node {i} not reached");
        }
    }

    #[test]
    fn test_tiny_node_sets() {
        assert!(ideal_edges(&[], 0.1, 0.75).pairs.is_empty());

        let one = nodes_at(&[(0.5, 0.5, 0.01)]);
        let ideal = ideal_edges(&one, 0.1, 0.75);
        assert!(ideal.pairs.is_empty());
        assert_eq!(ideal.target, 0);

        let two = nodes_at(&[(0.2, 0.5, 0.01), (0.8, 0.5, 0.01)]);
        let ideal = ideal_edges(&two, 0.1, 0.75);
        assert_eq!(ideal.pairs, vec![(1, 0)]);
        assert_eq!(ideal.tree_len, 1);
    }

    #[test]
    fn test_ideal_edge_count() {
        assert_eq!(ideal_edge_count(0, 0.75), 0);
        assert_eq!(ideal_edge_count(1, 0.75), 0);
        assert_eq!(ideal_edge_count(2, 0.75), 2); // round(1.75)
        assert_eq!(ideal_edge_count(16, 0.75), 26); // round(26.25)
        assert_eq!(ideal_edge_count(5, 0.0), 4);
        assert_eq!(ideal_edge_count(3, 0.25), 3); // round(2.5) rounds up
    }

    #[test]
    fn test_extras_follow_tree_without_duplicates() {
        let nodes = fixture();
        let ideal = ideal_edges(&nodes, 0.1, 0.75);
        assert_eq!(ideal.tree_len, 7);
        assert_eq!(ideal.pairs.len(), ideal_edge_count(8, 0.75));

        let mut seen = std::collections::HashSet::new();
        for &(i, j) in &ideal.pairs {
            assert!(seen.insert((i, j)), "duplicate pair ({i}, {j})");
        }
    }

    #[test]
    fn test_extras_capped_by_available_pairs() {
        // 3 nodes have only 3 pairs; a huge proportion cannot exceed that
        let nodes = nodes_at(&[(0.1, 0.1, 0.01), (0.5, 0.5, 0.01), (0.9, 0.2, 0.01)]);
        let ideal = ideal_edges(&nodes, 0.1, 10.0);
        assert_eq!(ideal.pairs.len(), 3);
        assert_eq!(ideal.target, 22);
    }

    #[test]
    fn test_huge_extra_proportion_stops_at_available_pairs() {
        let nodes = fixture();
        assert_eq!(ideal_edge_count(8, 1e20), usize::MAX);
        let ideal = ideal_edges(&nodes, 0.1, 1e20);
        assert_eq!(ideal.pairs.len(), 8 * 7 / 2);
        assert_eq!(ideal.tree_len, 7);
    }
}
