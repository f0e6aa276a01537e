use crate::error::*;
use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef;
use rand::RngCore;
use serde::{Deserialize, Serialize};

pub type Weight = f64;
pub type VertexIndex = usize;
pub type VertexNum = VertexIndex;
pub type EdgeIndex = usize;
pub type NodeIndex = usize;
pub type NodeNum = NodeIndex;
pub type TreeIndex = usize;
pub type TreeEdgeIndex = usize;

/// relative tolerance: slacks and dual variables within `EPS * (1 + max weight)` from zero are tight
pub const EPS: Weight = 1e-9;
pub const INFINITY: Weight = f64::INFINITY;
/// a dual step above this value means some tree can grow forever, so there is no perfect matching
pub const NO_PERFECT_MATCHING_THRESHOLD: Weight = 1e10;

/// use Xoshiro256StarStar for deterministic random number generator
pub type DeterministicRng = rand_xoshiro::Xoshiro256StarStar;

pub trait F64Rng {
    fn next_f64(&mut self) -> f64;
}

impl F64Rng for DeterministicRng {
    fn next_f64(&mut self) -> f64 {
        f64::from_bits(0x3FF << 52 | self.next_u64() >> 12) - 1.
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedEdge {
    /// the two endpoints of the edge, order does not matter
    pub vertices: (VertexIndex, VertexIndex),
    /// the non-negative weight of the edge
    pub weight: Weight,
}

impl WeightedEdge {
    pub fn new(u: VertexIndex, v: VertexIndex, weight: Weight) -> Self {
        Self { vertices: (u, v), weight }
    }

    pub fn is_self_loop(&self) -> bool {
        self.vertices.0 == self.vertices.1
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverInitializer {
    /// the number of vertices
    pub vertex_num: VertexNum,
    /// weighted edges, where vertex indices are within the range [0, vertex_num)
    pub weighted_edges: Vec<WeightedEdge>,
}

impl SolverInitializer {
    pub fn new(vertex_num: VertexNum, weighted_edges: Vec<WeightedEdge>) -> Self {
        Self {
            vertex_num,
            weighted_edges,
        }
    }

    /// reject malformed vertices and weights before any solver state is built
    pub fn sanity_check(&self) -> MatchingResult<()> {
        for (edge_index, edge) in self.weighted_edges.iter().enumerate() {
            for vertex in [edge.vertices.0, edge.vertices.1] {
                if vertex >= self.vertex_num {
                    return Err(MatchingError::VertexOutOfRange {
                        edge_index,
                        vertex,
                        vertex_num: self.vertex_num,
                    });
                }
            }
            if !edge.weight.is_finite() || edge.weight < 0. {
                return Err(MatchingError::InvalidWeight {
                    edge_index,
                    weight: edge.weight,
                });
            }
        }
        Ok(())
    }

    pub fn matching_weight(&self, edges: &[EdgeIndex]) -> Weight {
        edges.iter().map(|&edge_index| self.weighted_edges[edge_index].weight).sum()
    }
}

impl<N> From<&UnGraph<N, Weight>> for SolverInitializer {
    fn from(graph: &UnGraph<N, Weight>) -> Self {
        let weighted_edges = graph
            .edge_references()
            .map(|edge| WeightedEdge::new(edge.source().index(), edge.target().index(), *edge.weight()))
            .collect();
        Self::new(graph.node_count(), weighted_edges)
    }
}

/// largest graph accepted by [`brute_force_minimum_perfect_matching`]: its table has `2^n` entries
pub const BRUTE_FORCE_MAX_VERTEX_NUM: VertexNum = 24;

/// exponential reference solver: dynamic programming over subsets of matched vertices;
/// returns `None` if there is no perfect matching
///
/// # Panics
///
/// if the graph has more than [`BRUTE_FORCE_MAX_VERTEX_NUM`] vertices
pub fn brute_force_minimum_perfect_matching(initializer: &SolverInitializer) -> Option<Weight> {
    let vertex_num = initializer.vertex_num;
    assert!(
        vertex_num <= BRUTE_FORCE_MAX_VERTEX_NUM,
        "brute force supports at most {BRUTE_FORCE_MAX_VERTEX_NUM} vertices, got {vertex_num}"
    );
    if vertex_num % 2 == 1 {
        return None;
    }
    let mut pair_weight = vec![vec![INFINITY; vertex_num]; vertex_num];
    for edge in initializer.weighted_edges.iter().filter(|edge| !edge.is_self_loop()) {
        let (u, v) = edge.vertices;
        if edge.weight < pair_weight[u][v] {
            pair_weight[u][v] = edge.weight;
            pair_weight[v][u] = edge.weight;
        }
    }
    let full = (1usize << vertex_num) - 1;
    let mut best = vec![INFINITY; full + 1];
    best[0] = 0.;
    for mask in 0..full {
        if !best[mask].is_finite() {
            continue;
        }
        // always match the lowest unmatched vertex to avoid counting permutations
        let u = (!mask).trailing_zeros() as usize;
        for v in (u + 1)..vertex_num {
            if mask & (1 << v) != 0 || !pair_weight[u][v].is_finite() {
                continue;
            }
            let next = mask | (1 << u) | (1 << v);
            let candidate = best[mask] + pair_weight[u][v];
            if candidate < best[next] {
                best[next] = candidate;
            }
        }
    }
    best[full].is_finite().then_some(best[full])
}
