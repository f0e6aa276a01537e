//! Tree Edge
//!
//! An auxiliary edge of the "tree graph": it connects two alternating trees that share at least one
//! (+, +) or (+, -) graph edge. It sits in the tree-edge list `first[dir]` of tree `head[1 - dir]`.
//!

use crate::state::*;
use crate::tree::MinHeap;
use crate::util::*;
use derivative::Derivative;

#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct TreeEdge {
    pub head: [TreeIndex; 2],
    pub prev: [Option<TreeEdgeIndex>; 2],
    pub next: [Option<TreeEdgeIndex>; 2],
    /// (+, +) edges between the two trees, candidates for augment
    #[derivative(Debug = "ignore")]
    pub plus_plus_edges: MinHeap,
    /// `plus_minus_edges[dir]` holds (+, -) edges whose plus endpoint belongs to tree `head[dir]`
    #[derivative(Debug = "ignore")]
    pub plus_minus_edges: [MinHeap; 2],
    pub is_alive: bool,
}

impl TreeEdge {
    pub fn new(from: TreeIndex, to: TreeIndex) -> Self {
        Self {
            head: [to, from],
            prev: [None, None],
            next: [None, None],
            plus_plus_edges: MinHeap::new(),
            plus_minus_edges: [MinHeap::new(), MinHeap::new()],
            is_alive: true,
        }
    }

    /// the direction `dir` such that `head[dir]` is the tree opposite to `tree_index`
    pub fn direction_from(&self, tree_index: TreeIndex) -> usize {
        if self.head[1] == tree_index {
            0
        } else {
            1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.plus_plus_edges.is_empty() && self.plus_minus_edges.iter().all(MinHeap::is_empty)
    }
}

impl State {
    fn attach_tree_edge(&mut self, tree_edge_index: TreeEdgeIndex, dir: usize) {
        let tree_index = self.tree_edges[tree_edge_index].head[1 - dir];
        let first = self.trees[tree_index].first[dir];
        self.tree_edges[tree_edge_index].prev[dir] = None;
        self.tree_edges[tree_edge_index].next[dir] = first;
        if let Some(first) = first {
            self.tree_edges[first].prev[dir] = Some(tree_edge_index);
        }
        self.trees[tree_index].first[dir] = Some(tree_edge_index);
    }

    fn detach_tree_edge(&mut self, tree_edge_index: TreeEdgeIndex, dir: usize) {
        let tree_index = self.tree_edges[tree_edge_index].head[1 - dir];
        let prev = self.tree_edges[tree_edge_index].prev[dir].take();
        let next = self.tree_edges[tree_edge_index].next[dir].take();
        match prev {
            Some(prev) => self.tree_edges[prev].next[dir] = next,
            None => self.trees[tree_index].first[dir] = next,
        }
        if let Some(next) = next {
            self.tree_edges[next].prev[dir] = prev;
        }
    }

    pub fn add_tree_edge(&mut self, from: TreeIndex, to: TreeIndex) -> TreeEdgeIndex {
        debug_assert_ne!(from, to);
        let tree_edge_index = self.tree_edges.len();
        self.tree_edges.push(TreeEdge::new(from, to));
        self.attach_tree_edge(tree_edge_index, 0);
        self.attach_tree_edge(tree_edge_index, 1);
        tree_edge_index
    }

    pub fn remove_tree_edge(&mut self, tree_edge_index: TreeEdgeIndex) {
        debug_assert!(self.tree_edges[tree_edge_index].is_empty(), "removing a non-empty tree edge");
        self.detach_tree_edge(tree_edge_index, 0);
        self.detach_tree_edge(tree_edge_index, 1);
        self.tree_edges[tree_edge_index].is_alive = false;
    }

    /// tree edges incident to a tree, with the direction towards the opposite tree
    pub fn tree_edges_of(&self, tree_index: TreeIndex) -> Vec<(TreeEdgeIndex, usize)> {
        let mut tree_edges = vec![];
        for dir in 0..2 {
            let mut tree_edge = self.trees[tree_index].first[dir];
            while let Some(tree_edge_index) = tree_edge {
                tree_edges.push((tree_edge_index, dir));
                tree_edge = self.tree_edges[tree_edge_index].next[dir];
            }
        }
        tree_edges
    }

    /// point `current_edge` of every neighbor tree at the tree edge shared with `tree_index`
    pub fn set_current_edges(&mut self, tree_index: TreeIndex) {
        for (tree_edge_index, dir) in self.tree_edges_of(tree_index) {
            let opposite = self.tree_edges[tree_edge_index].head[dir];
            self.trees[opposite].current_edge = Some(tree_edge_index);
        }
    }

    pub fn clear_current_edges(&mut self, tree_index: TreeIndex) {
        for (tree_edge_index, dir) in self.tree_edges_of(tree_index) {
            let opposite = self.tree_edges[tree_edge_index].head[dir];
            self.trees[opposite].current_edge = None;
        }
    }

    /// the tree edge between two distinct trees, created on first use
    pub fn tree_edge_between(&mut self, tree_index: TreeIndex, opposite: TreeIndex) -> TreeEdgeIndex {
        if let Some(tree_edge_index) = self.trees[opposite].current_edge {
            let tree_edge = &self.tree_edges[tree_edge_index];
            let heads = tree_edge.head;
            if tree_edge.is_alive && (heads == [opposite, tree_index] || heads == [tree_index, opposite]) {
                return tree_edge_index;
            }
        }
        let found = self
            .tree_edges_of(tree_index)
            .into_iter()
            .find(|&(tree_edge_index, dir)| self.tree_edges[tree_edge_index].head[dir] == opposite);
        let tree_edge_index = match found {
            Some((tree_edge_index, _)) => tree_edge_index,
            None => self.add_tree_edge(tree_index, opposite),
        };
        self.trees[opposite].current_edge = Some(tree_edge_index);
        tree_edge_index
    }
}
