//! Dual Updater
//!
//! Chooses how much the `eps` of each alive tree may grow without any true slack (or minus blossom dual)
//! becoming negative, and applies it. The constraints of a tree come from its own heaps and from the heaps
//! of its tree edges:
//!
//! - (+, inf) edge: `delta <= slack`
//! - (+, +) edge inside the tree: `2 delta <= slack`
//! - minus blossom: `delta <= dual`
//! - (+, +) edge to tree `T'`: `delta + delta' <= slack`
//! - (+, -) edge to tree `T'`: `delta - delta' <= slack`
//!

use crate::error::*;
use crate::options::*;
use crate::state::*;
use crate::util::*;
use std::collections::VecDeque;

pub struct DualUpdater<'s> {
    pub state: &'s mut State,
}

impl<'s> DualUpdater<'s> {
    pub fn new(state: &'s mut State) -> Self {
        Self { state }
    }

    /// trees that are still growing, in the order of the root list
    fn alive_trees(&self) -> Vec<TreeIndex> {
        self.state
            .roots()
            .into_iter()
            .filter_map(|root| self.state.nodes[root].tree)
            .collect()
    }

    /// the minimum true slack of a heap of edges, if any
    fn min_slack(&self, edge_index: Option<EdgeIndex>) -> Weight {
        edge_index.map_or(INFINITY, |edge_index| self.state.true_slack(edge_index))
    }

    /// apply one global dual update; returns the largest increase applied to any tree
    pub fn update_duals(&mut self, strategy: DualUpdateStrategy) -> MatchingResult<Weight> {
        let trees = self.alive_trees();
        match strategy {
            DualUpdateStrategy::MultipleTreeFixedDelta => self.compute_fixed_delta(&trees),
            DualUpdateStrategy::MultipleTreeConnectedComponents => self.compute_connected_components(&trees),
        }
        let mut max_delta: Weight = 0.;
        for &tree_index in trees.iter() {
            let delta = self.state.trees[tree_index].eps_delta;
            if !(delta <= NO_PERFECT_MATCHING_THRESHOLD) {
                tracing::warn!("tree {tree_index} can grow by {delta}, no perfect matching exists");
                return Err(MatchingError::NoPerfectMatching { delta });
            }
            max_delta = max_delta.max(delta);
        }
        for &tree_index in trees.iter() {
            let tree = &mut self.state.trees[tree_index];
            tree.eps += tree.eps_delta;
            tree.eps_delta = INFINITY;
            tree.component = None;
        }
        self.state.statistics.dual_update_num += 1;
        tracing::debug!("dual update {strategy:?} over {} trees, max delta {max_delta}", trees.len());
        Ok(max_delta)
    }

    /// one delta for every tree, bounded by the tightest constraint anywhere
    fn compute_fixed_delta(&mut self, trees: &[TreeIndex]) {
        let mut delta = INFINITY;
        for &tree_index in trees.iter() {
            delta = delta.min(self.state.tree_local_bound(tree_index));
            for (tree_edge_index, _) in self.state.tree_edges_of(tree_index) {
                let min_edge = self.state.tree_edges[tree_edge_index].plus_plus_edges.min();
                delta = delta.min(self.min_slack(min_edge) / 2.);
            }
        }
        let delta = delta.max(0.);
        for &tree_index in trees.iter() {
            self.state.trees[tree_index].eps_delta = delta;
        }
    }

    /// group trees linked by tight (+, -) edges, since they must grow together, then pick the delta of
    /// each component given the deltas already chosen for earlier components (later ones count as zero)
    fn compute_connected_components(&mut self, trees: &[TreeIndex]) {
        let mut components: Vec<Vec<TreeIndex>> = vec![];
        for &tree_index in trees.iter() {
            if self.state.trees[tree_index].component.is_some() {
                continue;
            }
            let component_index = components.len();
            let mut component = vec![];
            let mut queue = VecDeque::from([tree_index]);
            self.state.trees[tree_index].component = Some(component_index);
            while let Some(current) = queue.pop_front() {
                component.push(current);
                for (tree_edge_index, dir) in self.state.tree_edges_of(current) {
                    let opposite = self.state.tree_edges[tree_edge_index].head[dir];
                    if self.state.trees[opposite].component.is_some() {
                        continue;
                    }
                    let tree_edge = &self.state.tree_edges[tree_edge_index];
                    let is_linked = tree_edge
                        .plus_minus_edges
                        .iter()
                        .any(|heap| self.min_slack(heap.min()) <= self.state.tolerance);
                    if is_linked {
                        self.state.trees[opposite].component = Some(component_index);
                        queue.push_back(opposite);
                    }
                }
            }
            components.push(component);
        }
        for (component_index, component) in components.iter().enumerate() {
            let mut delta = INFINITY;
            for &tree_index in component.iter() {
                delta = delta.min(self.state.tree_local_bound(tree_index));
                for (tree_edge_index, dir) in self.state.tree_edges_of(tree_index) {
                    let tree_edge = &self.state.tree_edges[tree_edge_index];
                    let opposite = tree_edge.head[dir];
                    let opposite_tree = &self.state.trees[opposite];
                    let plus_plus = self.min_slack(tree_edge.plus_plus_edges.min());
                    // (+, -) edges whose plus endpoint is in this tree
                    let plus_minus = self.min_slack(tree_edge.plus_minus_edges[1 - dir].min());
                    if opposite_tree.component == Some(component_index) {
                        delta = delta.min(plus_plus / 2.);
                    } else if opposite_tree.component.map_or(false, |other| other < component_index) {
                        delta = delta.min(plus_plus - opposite_tree.eps_delta);
                        delta = delta.min(plus_minus + opposite_tree.eps_delta);
                    } else {
                        delta = delta.min(plus_plus).min(plus_minus);
                    }
                }
            }
            let delta = delta.max(0.);
            for &tree_index in component.iter() {
                self.state.trees[tree_index].eps_delta = delta;
            }
        }
    }

    /// grow a single tree as far as its constraints allow, with every other tree fixed;
    /// returns whether the tree made progress
    pub fn update_duals_single(&mut self, tree_index: TreeIndex) -> bool {
        let mut delta = self.state.tree_local_bound(tree_index);
        for (tree_edge_index, dir) in self.state.tree_edges_of(tree_index) {
            let tree_edge = &self.state.tree_edges[tree_edge_index];
            delta = delta.min(self.min_slack(tree_edge.plus_plus_edges.min()));
            delta = delta.min(self.min_slack(tree_edge.plus_minus_edges[1 - dir].min()));
        }
        if delta.is_finite() && delta > self.state.tolerance {
            self.state.trees[tree_index].eps += delta;
            true
        } else {
            false
        }
    }
}
