//! Minimum-Weight Perfect Matching Solver
//!
//! The driver loop of Blossom V: trees are processed one at a time, applying primal operations on tight
//! edges as long as possible, and a global dual update is made whenever a full pass over the trees did
//! not reduce their number. Once every node is matched, blossoms are dissolved into the matching of the
//! original vertices.
//!

use crate::dual_updater::*;
use crate::error::*;
use crate::initializer::*;
use crate::options::*;
use crate::primal_updater::*;
use crate::state::*;
use crate::util::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;

pub trait MatchingSolver {
    /// compute the minimum-weight perfect matching, or report why none exists
    fn solve(&mut self) -> MatchingResult<PerfectMatching>;
    /// sum of all dual variables of the last solved state
    fn sum_dual_variables(&self) -> Option<Weight>;
    fn generate_profiler_report(&self) -> serde_json::Value;
}

/// a perfect matching of the input graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerfectMatching {
    /// the partner of every vertex
    pub partner: Vec<VertexIndex>,
    /// indices of the matched edges in the input, sorted
    pub edges: Vec<EdgeIndex>,
    /// total weight of the matched edges
    pub weight: Weight,
}

impl PerfectMatching {
    /// every vertex is covered by exactly one of `edges`, consistently with `partner`
    pub fn is_perfect_matching(&self, initializer: &SolverInitializer) -> bool {
        let vertex_num = initializer.vertex_num;
        if self.partner.len() != vertex_num || 2 * self.edges.len() != vertex_num {
            return false;
        }
        let mut covered = vec![false; vertex_num];
        for &edge_index in self.edges.iter() {
            let Some(edge) = initializer.weighted_edges.get(edge_index) else {
                return false;
            };
            let (u, v) = edge.vertices;
            if u == v || covered[u] || covered[v] || self.partner[u] != v || self.partner[v] != u {
                return false;
            }
            covered[u] = true;
            covered[v] = true;
        }
        let weight = initializer.matching_weight(&self.edges);
        (weight - self.weight).abs() <= EPS * (1. + weight.abs())
    }
}

/// the full Blossom V algorithm on a fixed input graph
pub struct SolverBlossomV {
    initializer: SolverInitializer,
    options: Options,
    /// the state of the last run, kept for certificate checks and reports
    state: Option<State>,
    matching: Option<PerfectMatching>,
}

impl SolverBlossomV {
    pub fn new(initializer: &SolverInitializer, config: serde_json::Value) -> MatchingResult<Self> {
        let options = Options::from_config(config)?;
        Ok(Self::new_with_options(initializer, options))
    }

    pub fn new_with_options(initializer: &SolverInitializer, options: Options) -> Self {
        Self {
            initializer: initializer.clone(),
            options,
            state: None,
            matching: None,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn statistics(&self) -> Option<&Statistics> {
        self.state.as_ref().map(|state| &state.statistics)
    }

    /// verify the optimality certificate of the last run from scratch
    pub fn check_certificate(&self, tolerance: Weight) -> MatchingResult<()> {
        let (Some(state), Some(matching)) = (self.state.as_ref(), self.matching.as_ref()) else {
            return Err(MatchingError::InvalidCertificate("the solver has not been run".to_string()));
        };
        let matched_edges = internal_matched_edges(state, &matching.partner);
        state.check_certificate(&matched_edges, tolerance)
    }
}

impl MatchingSolver for SolverBlossomV {
    fn solve(&mut self) -> MatchingResult<PerfectMatching> {
        if let Some(matching) = self.matching.as_ref() {
            return Ok(matching.clone());
        }
        let mut state = Initializer::initialize(&self.initializer, self.options)?;
        let result = solve_state(&mut state);
        if let Ok(matching) = result.as_ref() {
            self.matching = Some(matching.clone());
        }
        self.state = Some(state);
        result
    }

    fn sum_dual_variables(&self) -> Option<Weight> {
        self.state.as_ref().map(State::dual_objective)
    }

    fn generate_profiler_report(&self) -> serde_json::Value {
        json!({
            "options": self.options,
            "statistics": self.statistics(),
            "weight": self.matching.as_ref().map(|matching| matching.weight),
        })
    }
}

/// internal edges currently matched, one per pair of partners
fn internal_matched_edges(state: &State, partner: &[VertexIndex]) -> Vec<EdgeIndex> {
    (0..state.node_num)
        .filter(|&vertex_index| vertex_index < partner[vertex_index])
        .filter_map(|vertex_index| state.nodes[vertex_index].matched)
        .collect()
}

/// run the main loop on an initialized state and extract the matching of the original vertices
pub fn solve_state(state: &mut State) -> MatchingResult<PerfectMatching> {
    let begin = Instant::now();
    let result = main_loop(state);
    state.statistics.main_loop_time = begin.elapsed().as_secs_f64();
    result?;
    let begin = Instant::now();
    PrimalUpdater::new(state).finish();
    let matching = extract_matching(state);
    state.statistics.finish_time = begin.elapsed().as_secs_f64();
    tracing::debug!(
        "solved with weight {}: {} grows, {} shrinks, {} expands, {} augments, {} dual updates",
        matching.weight,
        state.statistics.grow_num,
        state.statistics.shrink_num,
        state.statistics.expand_num,
        state.statistics.augment_num,
        state.statistics.dual_update_num
    );
    Ok(matching)
}

fn main_loop(state: &mut State) -> MatchingResult<()> {
    let mut idle_cycles = 0;
    while state.tree_num > 0 {
        let cycle_tree_num = state.tree_num;
        let progress = primal_pass(state);
        if state.tree_num == 0 || state.tree_num != cycle_tree_num {
            idle_cycles = 0;
            continue;
        }
        let delta = dual_step(state)?;
        if progress || delta > state.tolerance {
            idle_cycles = 0;
            continue;
        }
        // a step within the tolerance may still close a (+, +) gap of up to twice the tolerance,
        // so only a second idle cycle in a row means that nothing can change anymore
        idle_cycles += 1;
        if idle_cycles >= 2 {
            tracing::warn!("no primal operation and no dual progress with {} trees", state.tree_num);
            return Err(MatchingError::Stalled);
        }
    }
    Ok(())
}

/// process every tree once, in the order of the root list; returns whether any primal operation happened
fn primal_pass(state: &mut State) -> bool {
    let mut progress = false;
    for root in state.roots() {
        let Some(tree_index) = state.nodes[root].tree else {
            continue;
        };
        if !state.trees[tree_index].is_alive || state.trees[tree_index].root != root {
            continue;
        }
        progress |= process_tree(state, tree_index);
        if state.tree_num == 0 {
            break;
        }
    }
    progress
}

/// one global dual update with the configured strategy, falling back to a fixed delta when the chosen
/// strategy gives no step beyond the tolerance
fn dual_step(state: &mut State) -> MatchingResult<Weight> {
    let strategy = state.options.dual_update_strategy;
    let delta = DualUpdater::new(state).update_duals(strategy)?;
    if delta > state.tolerance || strategy == DualUpdateStrategy::MultipleTreeFixedDelta {
        return Ok(delta);
    }
    let fallback = DualUpdater::new(state).update_duals(DualUpdateStrategy::MultipleTreeFixedDelta)?;
    Ok(delta.max(fallback))
}

/// apply primal operations on a single tree while it has tight edges; returns whether anything changed
fn process_tree(state: &mut State, tree_index: TreeIndex) -> bool {
    let options = state.options;
    let tree_num = state.tree_num;
    let mut progress = false;
    loop {
        if options.update_duals_before {
            DualUpdater::new(state).update_duals_single(tree_index);
        }
        loop {
            state.set_current_edges(tree_index);
            let augment_edge = state
                .tree_edges_of(tree_index)
                .into_iter()
                .filter_map(|(tree_edge_index, _)| state.tree_edges[tree_edge_index].plus_plus_edges.min())
                .find(|&edge_index| state.is_tight(edge_index));
            if let Some(edge_index) = augment_edge {
                state.clear_current_edges(tree_index);
                PrimalUpdater::new(state).augment(edge_index);
                state.statistics.augment_num += 1;
                return true;
            }
            if let Some(edge_index) = state.min_plus_infinity_edge(tree_index).filter(|&e| state.is_tight(e)) {
                PrimalUpdater::new(state).grow(edge_index);
                state.statistics.grow_num += 1;
            } else if let Some(edge_index) = state.min_plus_plus_edge(tree_index).filter(|&e| state.is_tight(e)) {
                PrimalUpdater::new(state).shrink(edge_index);
                state.statistics.shrink_num += 1;
            } else if let Some(blossom) = state
                .min_minus_blossom(tree_index)
                .filter(|&blossom| state.true_dual(blossom) <= state.tolerance)
            {
                PrimalUpdater::new(state).expand(blossom);
                state.statistics.expand_num += 1;
            } else {
                break;
            }
            progress = true;
        }
        state.clear_current_edges(tree_index);
        if state.tree_num != tree_num {
            break;
        }
        if options.update_duals_after && DualUpdater::new(state).update_duals_single(tree_index) {
            continue;
        }
        break;
    }
    progress
}

fn extract_matching(state: &State) -> PerfectMatching {
    let mut partner = Vec::with_capacity(state.node_num);
    let mut edges = vec![];
    let mut weight = 0.;
    for vertex_index in 0..state.node_num {
        let edge_index = state.nodes[vertex_index]
            .matched
            .expect("every vertex is matched after the main loop");
        let edge = &state.edges[edge_index];
        let other = edge.opposite_original(vertex_index);
        partner.push(other);
        if vertex_index < other {
            edges.push(edge.index);
            weight += edge.weight;
        }
    }
    edges.sort_unstable();
    PerfectMatching { partner, edges, weight }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::example_graphs::*;
    use more_asserts::*;
    use rand::SeedableRng;
    use test_case::test_case;

    /// absolute tolerance for certificate checks, relative to the largest weight
    fn test_tolerance(initializer: &SolverInitializer) -> Weight {
        let max_weight = initializer.weighted_edges.iter().map(|edge| edge.weight).fold(0., Weight::max);
        1e-6 * (1. + max_weight)
    }

    fn solve_with(initializer: &SolverInitializer, options: Options) -> MatchingResult<PerfectMatching> {
        let mut solver = SolverBlossomV::new_with_options(initializer, options);
        let result = solver.solve();
        if let Ok(matching) = result.as_ref() {
            assert!(matching.is_perfect_matching(initializer), "{matching:?}");
            solver.check_certificate(test_tolerance(initializer)).unwrap();
            let dual = solver.sum_dual_variables().unwrap();
            assert_le!((dual - matching.weight).abs(), 1e-6 * (1. + matching.weight));
        }
        result
    }

    /// solve under every combination of options and compare with the exhaustive reference
    fn cross_check_brute_force(initializer: &SolverInitializer) {
        let expected = brute_force_minimum_perfect_matching(initializer);
        for options in Options::all() {
            let result = solve_with(initializer, options);
            match (expected, result) {
                (Some(expected), Ok(matching)) => {
                    assert_le!((matching.weight - expected).abs(), 1e-6, "{options:?}");
                }
                (None, Err(MatchingError::NoPerfectMatching { .. })) => {}
                (expected, result) => panic!("expected {expected:?}, got {result:?} with {options:?}"),
            }
        }
    }

    #[test]
    fn solver_cycle_1() {
        // cargo test solver_cycle_1 -- --nocapture
        let initializer = cycle_graph(4, 1.);
        for options in Options::all() {
            let matching = solve_with(&initializer, options).unwrap();
            assert_eq!(matching.weight, 2.);
            assert_eq!(matching.edges.len(), 2);
        }
    }

    #[test]
    fn solver_complete_1() {
        // cargo test solver_complete_1 -- --nocapture
        let initializer = complete_graph(6, 1.);
        for options in Options::all() {
            let matching = solve_with(&initializer, options).unwrap();
            assert_eq!(matching.weight, 3.);
        }
    }

    #[test]
    fn solver_grid_1() {
        // cargo test solver_grid_1 -- --nocapture
        let initializer = grid_graph(4, 5, 2.);
        for options in Options::all() {
            let matching = solve_with(&initializer, options).unwrap();
            assert_eq!(matching.weight, 20.);
        }
    }

    #[test]
    fn solver_weighted_square_1() {
        // cargo test solver_weighted_square_1 -- --nocapture
        let initializer = SolverInitializer::new(
            4,
            vec![
                WeightedEdge::new(0, 1, 1.),
                WeightedEdge::new(1, 2, 5.),
                WeightedEdge::new(2, 3, 1.),
                WeightedEdge::new(3, 0, 5.),
            ],
        );
        let matching = solve_with(&initializer, Options::default()).unwrap();
        assert_eq!(matching.partner, vec![1, 0, 3, 2]);
        assert_eq!(matching.edges, vec![0, 2]);
        assert_eq!(matching.weight, 2.);
    }

    #[test]
    fn solver_empty_1() {
        // cargo test solver_empty_1 -- --nocapture
        let initializer = SolverInitializer::new(0, vec![]);
        let matching = solve_with(&initializer, Options::default()).unwrap();
        assert!(matching.partner.is_empty());
        assert_eq!(matching.weight, 0.);
    }

    #[test]
    fn solver_parallel_edges_1() {
        // cargo test solver_parallel_edges_1 -- --nocapture
        // the cheaper of two parallel edges is used, and self-loops are ignored
        let initializer = SolverInitializer::new(
            2,
            vec![
                WeightedEdge::new(0, 0, 0.),
                WeightedEdge::new(0, 1, 4.),
                WeightedEdge::new(1, 0, 3.),
            ],
        );
        for options in Options::all() {
            let matching = solve_with(&initializer, options).unwrap();
            assert_eq!(matching.edges, vec![2]);
            assert_eq!(matching.weight, 3.);
        }
    }

    #[test]
    fn solver_disjoint_triangles_1() {
        // cargo test solver_disjoint_triangles_1 -- --nocapture
        let initializer = disjoint_triangles(2, 1.);
        for options in Options::all() {
            let result = solve_with(&initializer, options);
            assert!(matches!(result, Err(MatchingError::NoPerfectMatching { .. })), "{options:?}");
        }
    }

    #[test_case(SolverInitializer::new(3, vec![WeightedEdge::new(0, 1, 1.), WeightedEdge::new(1, 2, 1.)]); "odd vertices")]
    #[test_case(SolverInitializer::new(4, vec![WeightedEdge::new(0, 1, 1.), WeightedEdge::new(1, 2, 1.)]); "isolated vertex")]
    #[test_case(SolverInitializer::new(2, vec![]); "no edges")]
    #[test_case(SolverInitializer::new(4, vec![WeightedEdge::new(0, 1, 1.), WeightedEdge::new(0, 2, 1.), WeightedEdge::new(0, 3, 1.)]); "star")]
    fn solver_infeasible_1(initializer: SolverInitializer) {
        // cargo test solver_infeasible_1 -- --nocapture
        for options in Options::all() {
            let result = solve_with(&initializer, options);
            assert!(matches!(result, Err(MatchingError::NoPerfectMatching { .. })), "{options:?}");
        }
    }

    #[test]
    fn solver_invalid_input_1() {
        // cargo test solver_invalid_input_1 -- --nocapture
        for weight in [-1., f64::NAN, f64::INFINITY] {
            let initializer = SolverInitializer::new(2, vec![WeightedEdge::new(0, 1, weight)]);
            let mut solver = SolverBlossomV::new(&initializer, json!({})).unwrap();
            assert!(matches!(solver.solve(), Err(MatchingError::InvalidWeight { .. })));
        }
        let initializer = SolverInitializer::new(2, vec![WeightedEdge::new(0, 1, 1.)]);
        assert!(matches!(
            SolverBlossomV::new(&initializer, json!({"initialization_type": "best"})),
            Err(MatchingError::InvalidConfig(_))
        ));
        let mut solver = SolverBlossomV::new(&initializer, json!({"initialization_type": "none"})).unwrap();
        assert_eq!(solver.options().initialization_type, InitializationType::Trivial);
        assert_eq!(solver.solve().unwrap().weight, 1.);
    }

    #[test]
    fn solver_idempotent_1() {
        // cargo test solver_idempotent_1 -- --nocapture
        let initializer = random_perfect_graph(16, 0.3, 10, 7);
        let mut solver = SolverBlossomV::new_with_options(&initializer, Options::default());
        let first = solver.solve().unwrap();
        let second = solver.solve().unwrap();
        assert_eq!(first, second);
        let mut fresh = SolverBlossomV::new_with_options(&initializer, Options::default());
        assert_eq!(fresh.solve().unwrap(), first);
    }

    #[test]
    fn solver_odd_cycles_1() {
        // cargo test solver_odd_cycles_1 -- --nocapture
        // two pentagons joined by a single expensive bridge: both must contract into blossoms first
        let mut weighted_edges = cycle_graph(5, 1.).weighted_edges;
        for edge in cycle_graph(5, 1.).weighted_edges {
            weighted_edges.push(WeightedEdge::new(edge.vertices.0 + 5, edge.vertices.1 + 5, edge.weight));
        }
        weighted_edges.push(WeightedEdge::new(2, 7, 10.));
        let initializer = SolverInitializer::new(10, weighted_edges);
        cross_check_brute_force(&initializer);
        let matching = solve_with(&initializer, Options::default()).unwrap();
        assert_eq!(matching.weight, 14.);
        assert_eq!(matching.partner[2], 7);
    }

    #[test]
    fn solver_nested_blossom_1() {
        // cargo test solver_nested_blossom_1 -- --nocapture
        // cheap triangles inside a larger odd structure, forcing blossoms inside blossoms and their expansion
        let initializer = SolverInitializer::new(
            10,
            vec![
                WeightedEdge::new(0, 1, 1.),
                WeightedEdge::new(1, 2, 1.),
                WeightedEdge::new(2, 0, 1.),
                WeightedEdge::new(2, 3, 2.),
                WeightedEdge::new(3, 4, 1.),
                WeightedEdge::new(4, 5, 1.),
                WeightedEdge::new(5, 3, 1.),
                WeightedEdge::new(5, 0, 2.),
                WeightedEdge::new(1, 6, 8.),
                WeightedEdge::new(4, 7, 9.),
                WeightedEdge::new(6, 7, 1.),
                WeightedEdge::new(6, 8, 3.),
                WeightedEdge::new(7, 9, 3.),
                WeightedEdge::new(8, 9, 6.),
            ],
        );
        cross_check_brute_force(&initializer);
    }

    #[test]
    fn solver_brute_force_1() {
        // cargo test solver_brute_force_1 -- --nocapture
        for seed in 0..60 {
            let vertex_num = 2 * (1 + seed as usize % 5);
            let initializer = random_graph(vertex_num, 0.5, 10, seed);
            cross_check_brute_force(&initializer);
        }
    }

    #[test]
    fn solver_brute_force_2() {
        // cargo test solver_brute_force_2 -- --nocapture
        // dense graphs with few distinct weights produce many ties and blossoms
        for seed in 0..40 {
            let initializer = random_perfect_graph(10, 0.7, 2, 1000 + seed);
            cross_check_brute_force(&initializer);
        }
    }

    #[test]
    fn solver_options_agree_1() {
        // cargo test solver_options_agree_1 -- --nocapture
        for seed in 0..10 {
            let initializer = random_perfect_graph(40, 0.15, 20, 2000 + seed);
            let reference = solve_with(&initializer, Options::default()).unwrap().weight;
            for options in Options::all() {
                let matching = solve_with(&initializer, options).unwrap();
                assert_le!((matching.weight - reference).abs(), 1e-6, "{options:?}");
            }
        }
    }

    #[test]
    fn solver_fractional_weights_1() {
        // cargo test solver_fractional_weights_1 -- --nocapture
        let mut initializer = random_perfect_graph(10, 0.6, 50, 3000);
        for edge in initializer.weighted_edges.iter_mut() {
            edge.weight = edge.weight / 7. + 0.125;
        }
        cross_check_brute_force(&initializer);
    }

    #[test]
    fn solver_large_weights_1() {
        // cargo test solver_large_weights_1 -- --nocapture
        // weights around 1e8 leave slacks of a few ulps that must still count as tight
        for seed in 0..10 {
            let mut initializer = random_perfect_graph(60, 0.1, 20, 4000 + seed);
            let mut rng = DeterministicRng::seed_from_u64(seed);
            for edge in initializer.weighted_edges.iter_mut() {
                edge.weight = rng.next_f64() * 1e8;
            }
            let reference = solve_with(&initializer, Options::default()).unwrap().weight;
            for options in Options::all() {
                let matching = solve_with(&initializer, options).unwrap();
                assert_le!((matching.weight - reference).abs(), 1e-6 * reference, "{options:?}");
            }
        }
    }

    /// every slack non-negative and every blossom dual non-negative, recomputed from scratch
    fn assert_dual_feasible(state: &State, tolerance: Weight) {
        for edge_index in 0..state.edge_num() {
            let slack = state.recompute_slack(edge_index);
            assert_ge!(slack, -tolerance, "edge {edge_index}");
        }
        for (node_index, node) in state.nodes.iter().enumerate() {
            if node.is_blossom && !node.is_removed {
                assert_ge!(state.true_dual(node_index), -tolerance, "blossom {node_index}");
            }
        }
    }

    #[test_case(DualUpdateStrategy::MultipleTreeFixedDelta; "fixed delta")]
    #[test_case(DualUpdateStrategy::MultipleTreeConnectedComponents; "connected components")]
    fn solver_dual_feasible_steps_1(dual_update_strategy: DualUpdateStrategy) {
        // cargo test solver_dual_feasible_steps_1 -- --nocapture
        let options = Options::new(InitializationType::Trivial, dual_update_strategy, false, false);
        let mut plus_minus_seen = 0;
        let mut minus_blossoms_seen = 0;
        let mut shrink_num = 0;
        for seed in 0..20 {
            let initializer = random_perfect_graph(30, 0.2, 10, 5000 + seed);
            let tolerance = test_tolerance(&initializer);
            let mut state = Initializer::initialize(&initializer, options).unwrap();
            assert_dual_feasible(&state, tolerance);
            let mut cycles = 0;
            while state.tree_num > 0 {
                primal_pass(&mut state);
                assert_dual_feasible(&state, tolerance);
                if state.tree_num == 0 {
                    break;
                }
                plus_minus_seen += state
                    .tree_edges
                    .iter()
                    .filter(|tree_edge| tree_edge.is_alive)
                    .filter(|tree_edge| tree_edge.plus_minus_edges.iter().any(|heap| !heap.is_empty()))
                    .count();
                minus_blossoms_seen += state
                    .nodes
                    .iter()
                    .filter(|node| node.is_blossom && !node.is_removed && node.is_minus())
                    .count();
                dual_step(&mut state).unwrap();
                assert_dual_feasible(&state, tolerance);
                cycles += 1;
                assert_lt!(cycles, 10_000, "the driver does not converge");
            }
            shrink_num += state.statistics.shrink_num;
        }
        assert_gt!(plus_minus_seen, 0);
        assert_gt!(minus_blossoms_seen + shrink_num, 0);
    }

    #[test]
    fn solver_petgraph_1() {
        // cargo test solver_petgraph_1 -- --nocapture
        let mut graph = petgraph::graph::UnGraph::<(), Weight>::new_undirected();
        let nodes: Vec<_> = (0..4).map(|_| graph.add_node(())).collect();
        graph.add_edge(nodes[0], nodes[1], 3.);
        graph.add_edge(nodes[1], nodes[2], 1.);
        graph.add_edge(nodes[2], nodes[3], 3.);
        graph.add_edge(nodes[3], nodes[0], 1.);
        let initializer = SolverInitializer::from(&graph);
        let matching = solve_with(&initializer, Options::default()).unwrap();
        assert_eq!(matching.edges, vec![1, 3]);
        assert_eq!(matching.partner, vec![3, 2, 1, 0]);
    }

    #[test]
    fn solver_profiler_report_1() {
        // cargo test solver_profiler_report_1 -- --nocapture
        let initializer = complete_graph(8, 1.);
        let options = Options::new(
            InitializationType::Trivial,
            DualUpdateStrategy::MultipleTreeFixedDelta,
            false,
            false,
        );
        let mut solver = SolverBlossomV::new_with_options(&initializer, options);
        assert!(solver.statistics().is_none());
        assert!(solver.check_certificate(1e-6).is_err());
        solver.solve().unwrap();
        let statistics = solver.statistics().unwrap();
        assert_eq!(statistics.augment_num, 4);
        assert_ge!(statistics.dual_update_num, 1);
        let report = solver.generate_profiler_report();
        assert_eq!(report["weight"], json!(4.));
        assert_eq!(report["statistics"]["augment_num"], json!(4));
        assert_eq!(report["options"]["initialization_type"], json!("trivial"));
    }
}
