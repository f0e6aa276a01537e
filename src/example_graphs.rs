//! Example Graphs
//!
//! Deterministic graph generators for tests and benchmarks. Random graphs take a seed so that any failing
//! case can be reproduced exactly.
//!

use crate::util::*;
use itertools::Itertools;
use rand::{Rng, SeedableRng};

/// every pair of vertices connected with the same weight
pub fn complete_graph(vertex_num: VertexNum, weight: Weight) -> SolverInitializer {
    let weighted_edges = (0..vertex_num)
        .tuple_combinations()
        .map(|(u, v)| WeightedEdge::new(u, v, weight))
        .collect();
    SolverInitializer::new(vertex_num, weighted_edges)
}

/// a single cycle `0 - 1 - ... - (n - 1) - 0`
pub fn cycle_graph(vertex_num: VertexNum, weight: Weight) -> SolverInitializer {
    assert!(vertex_num >= 3, "a cycle needs at least 3 vertices");
    let weighted_edges = (0..vertex_num)
        .map(|u| WeightedEdge::new(u, (u + 1) % vertex_num, weight))
        .collect();
    SolverInitializer::new(vertex_num, weighted_edges)
}

/// a `rows x columns` grid, vertex `(i, j)` has index `i * columns + j`
pub fn grid_graph(rows: usize, columns: usize, weight: Weight) -> SolverInitializer {
    let index = |i: usize, j: usize| i * columns + j;
    let mut weighted_edges = vec![];
    for (i, j) in (0..rows).cartesian_product(0..columns) {
        if j + 1 < columns {
            weighted_edges.push(WeightedEdge::new(index(i, j), index(i, j + 1), weight));
        }
        if i + 1 < rows {
            weighted_edges.push(WeightedEdge::new(index(i, j), index(i + 1, j), weight));
        }
    }
    SolverInitializer::new(rows * columns, weighted_edges)
}

/// `triangle_num` disconnected triangles; has no perfect matching whenever `triangle_num > 0`
pub fn disjoint_triangles(triangle_num: usize, weight: Weight) -> SolverInitializer {
    let mut weighted_edges = vec![];
    for triangle in 0..triangle_num {
        let base = 3 * triangle;
        for (u, v) in [(0, 1), (1, 2), (2, 0)] {
            weighted_edges.push(WeightedEdge::new(base + u, base + v, weight));
        }
    }
    SolverInitializer::new(3 * triangle_num, weighted_edges)
}

/// Erdos-Renyi graph where each pair is connected with the given probability, with integer weights
/// drawn uniformly from `[0, max_weight]`
pub fn random_graph(vertex_num: VertexNum, probability: f64, max_weight: usize, seed: u64) -> SolverInitializer {
    let mut rng = DeterministicRng::seed_from_u64(seed);
    let mut weighted_edges = vec![];
    for (u, v) in (0..vertex_num).tuple_combinations() {
        if rng.next_f64() < probability {
            let weight = rng.gen_range(0..=max_weight) as Weight;
            weighted_edges.push(WeightedEdge::new(u, v, weight));
        }
    }
    SolverInitializer::new(vertex_num, weighted_edges)
}

/// a random graph guaranteed to have a perfect matching: a hidden random pairing is added on top of
/// [`random_graph`], with weights large enough that it is rarely optimal
pub fn random_perfect_graph(vertex_num: VertexNum, probability: f64, max_weight: usize, seed: u64) -> SolverInitializer {
    assert!(vertex_num % 2 == 0, "a perfect matching needs an even number of vertices");
    let mut initializer = random_graph(vertex_num, probability, max_weight, seed);
    let mut rng = DeterministicRng::seed_from_u64(seed.wrapping_add(0x9e3779b97f4a7c15));
    let mut vertices: Vec<VertexIndex> = (0..vertex_num).collect();
    for i in (1..vertex_num).rev() {
        let j = rng.gen_range(0..=i);
        vertices.swap(i, j);
    }
    for (u, v) in vertices.into_iter().tuples() {
        let weight = rng.gen_range(max_weight..=2 * max_weight) as Weight;
        initializer.weighted_edges.push(WeightedEdge::new(u, v, weight));
    }
    initializer
}
