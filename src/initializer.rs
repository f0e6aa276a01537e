//! Initializer
//!
//! Builds the [`State`] of a run from the input graph and seeds a feasible dual solution together with a
//! partial matching of tight edges, so that the main loop starts from fewer trees.
//!
//! The fractional strategy grows one alternating tree at a time using the same lazy `eps` machinery as the
//! main loop, but instead of contracting odd cycles it keeps them as half-integral "half blossoms": every
//! member is covered half by each of its two cycle edges. Half blossoms are linked through
//! `blossom_sibling` and are broken into ordinary matched pairs either when an augmenting path reaches
//! them or at the very end, where one member of each stays unmatched.
//!

use crate::error::*;
use crate::node::*;
use crate::options::*;
use crate::primal_updater::*;
use crate::state::*;
use crate::tree::*;
use crate::util::*;
use std::time::Instant;

pub struct Initializer;

impl Initializer {
    pub fn initialize(initializer: &SolverInitializer, options: Options) -> MatchingResult<State> {
        let begin = Instant::now();
        let mut state = State::new(initializer, options)?;
        match options.initialization_type {
            InitializationType::Trivial => {}
            InitializationType::Greedy => Self::init_greedy(&mut state),
            InitializationType::Fractional => {
                Self::init_greedy(&mut state);
                Self::init_fractional(&mut state);
            }
        }
        Self::allocate_trees(&mut state);
        Self::init_auxiliary_graph(&mut state);
        state.statistics.initialization_time = begin.elapsed().as_secs_f64();
        tracing::debug!(
            "initialized {:?}: {} vertices, {} edges, {} trees",
            options.initialization_type,
            state.node_num,
            state.edge_num(),
            state.tree_num
        );
        Ok(state)
    }

    fn is_free(state: &State, node_index: NodeIndex) -> bool {
        state.nodes[node_index].matched.is_none() && state.nodes[node_index].blossom_sibling.is_none()
    }

    /// raise every dual to half of its cheapest incident edge, then greedily raise each unmatched node
    /// to its smallest slack and match it through a resulting tight edge if the neighbor is unmatched
    fn init_greedy(state: &mut State) {
        for node in state.nodes.iter_mut().take(state.node_num) {
            node.dual = INFINITY;
        }
        for edge in state.edges.iter() {
            let [u, v] = edge.head_original;
            for vertex in [u, v] {
                if edge.slack < state.nodes[vertex].dual {
                    state.nodes[vertex].dual = edge.slack;
                }
            }
        }
        for node in state.nodes.iter_mut().take(state.node_num) {
            node.dual = if node.dual.is_finite() { node.dual / 2. } else { 0. };
        }
        for edge_index in 0..state.edges.len() {
            let [u, v] = state.edges[edge_index].head_original;
            state.edges[edge_index].slack -= state.nodes[u].dual + state.nodes[v].dual;
        }
        for node_index in 0..state.node_num {
            if state.nodes[node_index].matched.is_some() {
                continue;
            }
            let incident = state.incident_edges(node_index);
            let delta = incident
                .iter()
                .map(|&(edge_index, _)| state.edges[edge_index].slack)
                .fold(INFINITY, Weight::min);
            if !delta.is_finite() {
                continue;
            }
            state.nodes[node_index].dual += delta;
            for &(edge_index, _) in incident.iter() {
                state.edges[edge_index].slack -= delta;
            }
            let partner = incident.iter().find(|&&(edge_index, dir)| {
                let opposite = state.edges[edge_index].head[dir];
                state.edges[edge_index].slack <= state.tolerance && state.nodes[opposite].matched.is_none()
            });
            if let Some(&(edge_index, dir)) = partner {
                let opposite = state.edges[edge_index].head[dir];
                state.nodes[node_index].matched = Some(edge_index);
                state.nodes[opposite].matched = Some(edge_index);
            }
        }
    }

    fn init_fractional(state: &mut State) {
        for root in 0..state.node_num {
            if !Self::is_free(state, root) {
                continue;
            }
            let tree_index = state.trees.len();
            state.trees.push(Tree::new(tree_index, root));
            state.nodes[root].is_tree_root = true;
            state.set_label(root, Label::Plus, Some(tree_index));
            state.place_incident_edges(root);
            loop {
                if let Some(edge_index) = state.min_plus_infinity_edge(tree_index).filter(|&e| state.is_tight(e)) {
                    let [a, b] = state.edges[edge_index].head;
                    let (plus, other) = if state.nodes[a].is_plus() { (a, b) } else { (b, a) };
                    if state.nodes[other].matched.is_some() {
                        PrimalUpdater::new(state).grow(edge_index);
                        continue;
                    }
                    PrimalUpdater::new(state).flip_branch(plus);
                    state.nodes[plus].matched = Some(edge_index);
                    if state.nodes[other].blossom_sibling.is_some() {
                        Self::break_half_blossom(state, other);
                    }
                    state.nodes[other].matched = Some(edge_index);
                    break;
                }
                if let Some(edge_index) = state.min_plus_plus_edge(tree_index).filter(|&e| state.is_tight(e)) {
                    Self::form_half_blossom(state, edge_index);
                    break;
                }
                let delta = state.tree_local_bound(tree_index);
                if !delta.is_finite() {
                    // nothing reachable: the root stays unmatched for the main loop
                    break;
                }
                state.trees[tree_index].eps += delta.max(0.);
            }
            for node_index in state.tree_nodes(root) {
                state.set_label(node_index, Label::Infinity, None);
                state.nodes[node_index].clear_tree_links();
            }
        }
        state.trees.clear();
        for node_index in 0..state.node_num {
            if state.nodes[node_index].blossom_sibling.is_some() {
                Self::break_half_blossom(state, node_index);
            }
        }
    }

    /// a tight (+, +) edge inside the tree: the odd cycle becomes a half blossom and the path from the
    /// root to the cycle is flipped so that the root is covered
    fn form_half_blossom(state: &mut State, edge_index: EdgeIndex) {
        let ends = state.edges[edge_index].head;
        let root = state.find_tree_lca(ends[0], ends[1]);
        let path: Vec<(NodeIndex, usize)> = state.blossom_path(ends, root).collect();
        let mut previous: Option<NodeIndex> = None;
        for &(node_index, direction) in path.iter() {
            let sibling = match (direction, previous) {
                (0, None) => edge_index,
                (0, Some(child)) => state.nodes[child].parent_edge.expect("path child has a parent edge"),
                _ => state.nodes[node_index].parent_edge.expect("path node below the root has a parent edge"),
            };
            state.nodes[node_index].blossom_sibling = Some(sibling);
            previous = if direction == 0 { Some(node_index) } else { None };
        }
        PrimalUpdater::new(state).flip_branch(root);
        for &(node_index, _) in path.iter() {
            state.nodes[node_index].matched = None;
        }
    }

    /// `start` gets covered from outside the half blossom (or stays unmatched); the rest of the cycle
    /// is an even path matched along its sibling edges
    fn break_half_blossom(state: &mut State, start: NodeIndex) {
        let cycle = state.blossom_cycle(start);
        state.nodes[start].matched = None;
        for position in (1..cycle.len()).step_by(2) {
            let (first, sibling) = cycle[position];
            let (second, _) = cycle[position + 1];
            state.nodes[first].matched = Some(sibling);
            state.nodes[second].matched = Some(sibling);
        }
        for (node_index, _) in cycle {
            state.nodes[node_index].blossom_sibling = None;
        }
    }

    /// every unmatched node becomes the root of its own tree
    pub fn allocate_trees(state: &mut State) {
        for node_index in 0..state.node_num {
            if state.nodes[node_index].matched.is_none() {
                state.add_tree(node_index);
            }
        }
    }

    /// sort the edges around every root into the heaps of its tree and the tree edges between roots
    pub fn init_auxiliary_graph(state: &mut State) {
        for root in state.roots() {
            let tree_index = state.nodes[root].tree.expect("root belongs to its tree");
            state.set_current_edges(tree_index);
            state.place_incident_edges(root);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::example_graphs::*;
    use test_case::test_case;

    /// every matched edge is tight, every slack is non-negative and matched pairs are consistent
    fn assert_feasible_start(state: &State) {
        for edge_index in 0..state.edge_num() {
            assert!(state.recompute_slack(edge_index) >= -EPS, "negative slack on edge {edge_index}");
        }
        for node_index in 0..state.node_num {
            let node = &state.nodes[node_index];
            assert!(node.blossom_sibling.is_none());
            match node.matched {
                Some(edge_index) => {
                    assert!(state.recompute_slack(edge_index).abs() <= EPS);
                    let partner = state.edges[edge_index].opposite(node_index);
                    assert_eq!(state.nodes[partner].matched, Some(edge_index));
                    assert!(node.is_infinity());
                }
                None => {
                    assert!(node.is_plus() && node.is_tree_root);
                }
            }
        }
        assert_eq!(state.roots().len(), state.tree_num);
    }

    #[test_case(InitializationType::Trivial; "trivial")]
    #[test_case(InitializationType::Greedy; "greedy")]
    #[test_case(InitializationType::Fractional; "fractional")]
    fn initializer_feasible_start_1(initialization_type: InitializationType) {
        // cargo test initializer_feasible_start_1 -- --nocapture
        let options = Options {
            initialization_type,
            ..Options::default()
        };
        for seed in 0..20 {
            let initializer = random_graph(12, 0.4, 10, seed);
            let state = Initializer::initialize(&initializer, options).unwrap();
            assert_feasible_start(&state);
            if initialization_type == InitializationType::Trivial {
                assert_eq!(state.tree_num, 12);
            }
        }
    }

    #[test]
    fn initializer_greedy_1() {
        // cargo test initializer_greedy_1 -- --nocapture
        let options = Options {
            initialization_type: InitializationType::Greedy,
            ..Options::default()
        };
        let state = Initializer::initialize(&cycle_graph(4, 1.), options).unwrap();
        assert_eq!(state.tree_num, 0);
        assert_eq!(state.dual_objective(), 2.);
    }

    #[test]
    fn initializer_fractional_1() {
        // cargo test initializer_fractional_1 -- --nocapture
        // a triangle is a half blossom after the fractional phase, so exactly one member stays unmatched
        let options = Options {
            initialization_type: InitializationType::Fractional,
            ..Options::default()
        };
        let state = Initializer::initialize(&complete_graph(3, 2.), options).unwrap();
        assert_feasible_start(&state);
        assert_eq!(state.tree_num, 1);
        assert_eq!(state.dual_objective(), 3.);
        let state = Initializer::initialize(&disjoint_triangles(2, 2.), options).unwrap();
        assert_feasible_start(&state);
        assert_eq!(state.tree_num, 2);
    }

    #[test]
    fn initializer_invalid_weight_1() {
        // cargo test initializer_invalid_weight_1 -- --nocapture
        let initializer = SolverInitializer::new(2, vec![WeightedEdge::new(0, 1, -0.5)]);
        assert!(matches!(
            Initializer::initialize(&initializer, Options::default()),
            Err(MatchingError::InvalidWeight { .. })
        ));
    }
}
