//! Solver State
//!
//! One arena owning every node, edge, tree and tree edge of a run. The primal and dual updaters borrow it
//! mutably in turn; nothing is shared or global.
//!
//! Dual variables and slacks are stored lazily: the true dual of an outer node is `dual + eps` if it is a
//! plus node and `dual - eps` if it is a minus node, where `eps` belongs to its tree. The true slack of an
//! edge subtracts the same correction of both current endpoints. [`State::set_label`] is the only place
//! where a node changes label or tree, and it rewrites the stored values so that true values are kept.
//!

use crate::edge::*;
use crate::error::*;
use crate::node::*;
use crate::options::*;
use crate::tree::*;
use crate::tree_edge::*;
use crate::util::*;
use derivative::Derivative;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Statistics {
    pub shrink_num: usize,
    pub expand_num: usize,
    pub grow_num: usize,
    pub augment_num: usize,
    pub dual_update_num: usize,
    /// in seconds
    pub initialization_time: f64,
    pub main_loop_time: f64,
    pub finish_time: f64,
}

#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct State {
    /// number of original vertices; the sentinel takes index `node_num` and blossoms follow
    pub node_num: NodeNum,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    #[derivative(Debug = "ignore")]
    pub trees: Vec<Tree>,
    #[derivative(Debug = "ignore")]
    pub tree_edges: Vec<TreeEdge>,
    /// number of alive trees, i.e. unmatched outer nodes
    pub tree_num: usize,
    /// number of blossoms currently contracted
    pub blossom_num: usize,
    /// slacks and duals within this distance from zero are tight; scales with the largest weight so that it
    /// never falls below the resolution of the dual values
    pub tolerance: Weight,
    pub statistics: Statistics,
    pub options: Options,
}

impl State {
    /// convert the input graph into the internal arena; self-loops are dropped since they never appear in a matching
    pub fn new(initializer: &SolverInitializer, options: Options) -> MatchingResult<Self> {
        initializer.sanity_check()?;
        let node_num = initializer.vertex_num;
        let max_weight = initializer
            .weighted_edges
            .iter()
            .map(|edge| edge.weight)
            .fold(0., Weight::max);
        let mut nodes: Vec<Node> = (0..node_num).map(Node::new).collect();
        let mut sentinel = Node::new(node_num);
        sentinel.is_outer = false;
        nodes.push(sentinel);
        let mut state = Self {
            node_num,
            nodes,
            edges: Vec::with_capacity(initializer.weighted_edges.len()),
            trees: vec![],
            tree_edges: vec![],
            tree_num: 0,
            blossom_num: 0,
            tolerance: EPS * (1. + max_weight),
            statistics: Statistics::default(),
            options,
        };
        for (index, weighted_edge) in initializer.weighted_edges.iter().enumerate() {
            if weighted_edge.is_self_loop() {
                continue;
            }
            let (from, to) = weighted_edge.vertices;
            let edge_index = state.edges.len();
            state.edges.push(Edge::new(index, from, to, weighted_edge.weight));
            state.attach_edge(edge_index, 0, from);
            state.attach_edge(edge_index, 1, to);
        }
        Ok(state)
    }

    pub fn edge_num(&self) -> usize {
        self.edges.len()
    }

    /// the amount by which the stored dual of an outer node lags behind its true dual
    pub fn contribution(&self, node_index: NodeIndex) -> Weight {
        let node = &self.nodes[node_index];
        match node.tree {
            Some(tree_index) => node.eps_contribution(self.trees[tree_index].eps),
            None => 0.,
        }
    }

    pub fn true_dual(&self, node_index: NodeIndex) -> Weight {
        self.nodes[node_index].dual + self.contribution(node_index)
    }

    pub fn true_slack(&self, edge_index: EdgeIndex) -> Weight {
        let [a, b] = self.edges[edge_index].head;
        self.edges[edge_index].slack - self.contribution(a) - self.contribution(b)
    }

    pub fn is_tight(&self, edge_index: EdgeIndex) -> bool {
        self.true_slack(edge_index) <= self.tolerance
    }

    /// move a node to another label and tree while keeping its true dual and the true slacks of its edges;
    /// incident edges leave their heaps and must be put back with [`State::place_incident_edges`]
    /// once the surrounding structure is consistent again
    pub fn set_label(&mut self, node_index: NodeIndex, label: Label, tree: Option<TreeIndex>) {
        let old_contribution = self.contribution(node_index);
        if let Some(tree_index) = self.nodes[node_index].minus_heap.take() {
            self.trees[tree_index].minus_blossoms.remove(node_index);
        }
        self.nodes[node_index].label = label;
        self.nodes[node_index].tree = tree;
        let new_contribution = self.contribution(node_index);
        self.nodes[node_index].dual += old_contribution - new_contribution;
        for (edge_index, _) in self.incident_edges(node_index) {
            self.remove_edge_from_heap(edge_index);
            self.edges[edge_index].slack += new_contribution - old_contribution;
        }
        if label == Label::Minus && self.nodes[node_index].is_blossom {
            let tree_index = tree.expect("a minus node always belongs to a tree");
            let dual = self.nodes[node_index].dual;
            self.trees[tree_index].minus_blossoms.insert(node_index, dual);
            self.nodes[node_index].minus_heap = Some(tree_index);
        }
    }

    pub fn remove_edge_from_heap(&mut self, edge_index: EdgeIndex) {
        let location = std::mem::replace(&mut self.edges[edge_index].heap, HeapLocation::None);
        match location {
            HeapLocation::None => {}
            HeapLocation::PlusInfinity(tree_index) => self.trees[tree_index].plus_infinity_edges.remove(edge_index),
            HeapLocation::PlusPlus(tree_index) => self.trees[tree_index].plus_plus_edges.remove(edge_index),
            HeapLocation::TreePlusPlus(tree_edge_index) => {
                self.tree_edges[tree_edge_index].plus_plus_edges.remove(edge_index)
            }
            HeapLocation::TreePlusMinus(tree_edge_index, dir) => {
                self.tree_edges[tree_edge_index].plus_minus_edges[dir].remove(edge_index)
            }
        }
    }

    fn insert_edge_into_heap(&mut self, edge_index: EdgeIndex, location: HeapLocation) {
        debug_assert_eq!(self.edges[edge_index].heap, HeapLocation::None);
        let key = self.edges[edge_index].slack;
        match location {
            HeapLocation::None => return,
            HeapLocation::PlusInfinity(tree_index) => self.trees[tree_index].plus_infinity_edges.insert(edge_index, key),
            HeapLocation::PlusPlus(tree_index) => self.trees[tree_index].plus_plus_edges.insert(edge_index, key),
            HeapLocation::TreePlusPlus(tree_edge_index) => {
                self.tree_edges[tree_edge_index].plus_plus_edges.insert(edge_index, key)
            }
            HeapLocation::TreePlusMinus(tree_edge_index, dir) => {
                self.tree_edges[tree_edge_index].plus_minus_edges[dir].insert(edge_index, key)
            }
        }
        self.edges[edge_index].heap = location;
    }

    /// put an edge into the heap matching the labels and trees of its current endpoints
    pub fn place_edge(&mut self, edge_index: EdgeIndex) {
        self.remove_edge_from_heap(edge_index);
        let [a, b] = self.edges[edge_index].head;
        if a == b || !self.nodes[a].is_outer || !self.nodes[b].is_outer {
            return;
        }
        let (label_a, tree_a) = (self.nodes[a].label, self.nodes[a].tree);
        let (label_b, tree_b) = (self.nodes[b].label, self.nodes[b].tree);
        let location = match (label_a, label_b, tree_a, tree_b) {
            (Label::Plus, Label::Infinity, Some(tree_a), _) => HeapLocation::PlusInfinity(tree_a),
            (Label::Infinity, Label::Plus, _, Some(tree_b)) => HeapLocation::PlusInfinity(tree_b),
            (Label::Plus, Label::Plus, Some(tree_a), Some(tree_b)) => {
                if tree_a == tree_b {
                    HeapLocation::PlusPlus(tree_a)
                } else {
                    HeapLocation::TreePlusPlus(self.tree_edge_between(tree_a, tree_b))
                }
            }
            (Label::Plus, Label::Minus, Some(plus_tree), Some(minus_tree))
            | (Label::Minus, Label::Plus, Some(minus_tree), Some(plus_tree))
                if plus_tree != minus_tree =>
            {
                let tree_edge_index = self.tree_edge_between(plus_tree, minus_tree);
                let dir = 1 - self.tree_edges[tree_edge_index].direction_from(plus_tree);
                HeapLocation::TreePlusMinus(tree_edge_index, dir)
            }
            _ => HeapLocation::None,
        };
        self.insert_edge_into_heap(edge_index, location);
    }

    pub fn place_incident_edges(&mut self, node_index: NodeIndex) {
        for (edge_index, _) in self.incident_edges(node_index) {
            self.place_edge(edge_index);
        }
    }

    /// sum of all dual variables, which lower-bounds the weight of any perfect matching
    pub fn dual_objective(&self) -> Weight {
        self.nodes
            .iter()
            .enumerate()
            .filter(|&(node_index, node)| node_index != self.node_num && !node.is_removed)
            .map(|(node_index, _)| self.true_dual(node_index))
            .sum()
    }

    fn blossom_ancestors(&self, vertex_index: VertexIndex) -> Vec<NodeIndex> {
        let mut ancestors = vec![];
        let mut cursor = self.nodes[vertex_index].blossom_parent;
        while let Some(blossom) = cursor {
            ancestors.push(blossom);
            cursor = self.nodes[blossom].blossom_parent;
        }
        ancestors
    }

    /// slack of an edge computed from scratch: weight minus the duals of both endpoints and of every
    /// blossom that contains exactly one of them
    pub fn recompute_slack(&self, edge_index: EdgeIndex) -> Weight {
        let edge = &self.edges[edge_index];
        let [u, v] = edge.head_original;
        let ancestors_u = self.blossom_ancestors(u);
        let ancestors_v = self.blossom_ancestors(v);
        let mut slack = edge.weight - self.true_dual(u) - self.true_dual(v);
        for blossom in ancestors_u.iter().filter(|blossom| !ancestors_v.contains(blossom)) {
            slack -= self.true_dual(*blossom);
        }
        for blossom in ancestors_v.iter().filter(|blossom| !ancestors_u.contains(blossom)) {
            slack -= self.true_dual(*blossom);
        }
        slack
    }

    /// check dual feasibility, complementary slackness and strong duality of a solved state
    pub fn check_certificate(&self, matched_edges: &[EdgeIndex], tolerance: Weight) -> MatchingResult<()> {
        for edge_index in 0..self.edges.len() {
            let slack = self.recompute_slack(edge_index);
            if slack < -tolerance {
                return Err(MatchingError::InvalidCertificate(format!(
                    "edge {} has negative slack {slack}",
                    self.edges[edge_index].index
                )));
            }
        }
        for &edge_index in matched_edges.iter() {
            let slack = self.recompute_slack(edge_index);
            if slack.abs() > tolerance {
                return Err(MatchingError::InvalidCertificate(format!(
                    "matched edge {} is not tight, slack {slack}",
                    self.edges[edge_index].index
                )));
            }
        }
        for (node_index, node) in self.nodes.iter().enumerate() {
            if node.is_blossom && !node.is_removed && self.true_dual(node_index) < -tolerance {
                return Err(MatchingError::InvalidCertificate(format!(
                    "blossom {node_index} has negative dual {}",
                    self.true_dual(node_index)
                )));
            }
        }
        let weight: Weight = matched_edges.iter().map(|&edge_index| self.edges[edge_index].weight).sum();
        let dual_objective = self.dual_objective();
        if (weight - dual_objective).abs() > tolerance * (1. + weight.abs()) {
            return Err(MatchingError::InvalidCertificate(format!(
                "matching weight {weight} differs from dual objective {dual_objective}"
            )));
        }
        Ok(())
    }
}
