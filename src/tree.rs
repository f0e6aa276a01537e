//! Alternating Tree
//!
//! Each tree accumulates a lazy dual increase `eps` instead of touching every member; boundary edges and
//! minus blossoms are kept in addressable min-heaps keyed by their stored (not yet corrected) values,
//! which preserves the order because every element of one heap is corrected by the same amount.
//!

use crate::node::Label;
use crate::ordered_float::OrderedFloat;
use crate::state::*;
use crate::util::*;
use derivative::Derivative;
use priority_queue::PriorityQueue;
use std::cmp::Reverse;

/// addressable min-heap over arena indices
#[derive(Debug, Clone, Default)]
pub struct MinHeap {
    queue: PriorityQueue<usize, Reverse<OrderedFloat>>,
}

impl MinHeap {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn insert(&mut self, index: usize, key: Weight) {
        let previous = self.queue.push(index, Reverse(OrderedFloat::new(key)));
        debug_assert!(previous.is_none(), "{index} inserted twice");
    }
    pub fn remove(&mut self, index: usize) {
        let removed = self.queue.remove(&index);
        debug_assert!(removed.is_some(), "{index} is not in the heap");
    }
    /// the index with the smallest key
    pub fn min(&self) -> Option<usize> {
        self.queue.peek().map(|(index, _)| *index)
    }
    pub fn len(&self) -> usize {
        self.queue.len()
    }
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct Tree {
    pub index: TreeIndex,
    pub root: NodeIndex,
    /// dual increase not yet written into the members
    pub eps: Weight,
    #[derivative(Debug = "ignore")]
    pub plus_infinity_edges: MinHeap,
    #[derivative(Debug = "ignore")]
    pub plus_plus_edges: MinHeap,
    #[derivative(Debug = "ignore")]
    pub minus_blossoms: MinHeap,
    /// heads of the two tree-edge lists: `first[dir]` holds tree edges whose `head[dir]` is the opposite tree
    pub first: [Option<TreeEdgeIndex>; 2],
    /// scratch: the tree edge from the tree being processed, valid only if its heads match
    pub current_edge: Option<TreeEdgeIndex>,
    pub is_alive: bool,
    /// scratch: the dual increase chosen by the current dual update
    pub eps_delta: Weight,
    /// scratch: component of the current connected-components dual update
    pub component: Option<usize>,
}

impl Tree {
    pub fn new(index: TreeIndex, root: NodeIndex) -> Self {
        Self {
            index,
            root,
            eps: 0.,
            plus_infinity_edges: MinHeap::new(),
            plus_plus_edges: MinHeap::new(),
            minus_blossoms: MinHeap::new(),
            first: [None, None],
            current_edge: None,
            is_alive: true,
            eps_delta: INFINITY,
            component: None,
        }
    }
}

impl State {
    /// start a new tree rooted at an unmatched outer node
    pub fn add_tree(&mut self, root: NodeIndex) -> TreeIndex {
        debug_assert!(self.nodes[root].matched.is_none() && self.nodes[root].is_outer);
        let tree_index = self.trees.len();
        self.trees.push(Tree::new(tree_index, root));
        self.nodes[root].clear_tree_links();
        self.nodes[root].is_tree_root = true;
        self.set_label(root, Label::Plus, Some(tree_index));
        self.add_root(root);
        self.tree_num += 1;
        tree_index
    }

    /// forget a tree after all its members left it; its tree edges must be empty by then
    pub fn remove_tree(&mut self, tree_index: TreeIndex) {
        for (tree_edge_index, _) in self.tree_edges_of(tree_index) {
            self.remove_tree_edge(tree_edge_index);
        }
        let tree = &mut self.trees[tree_index];
        debug_assert!(tree.plus_infinity_edges.is_empty() && tree.plus_plus_edges.is_empty());
        debug_assert!(tree.minus_blossoms.is_empty());
        tree.is_alive = false;
        tree.current_edge = None;
        self.tree_num -= 1;
    }

    pub fn min_plus_infinity_edge(&self, tree_index: TreeIndex) -> Option<EdgeIndex> {
        self.trees[tree_index].plus_infinity_edges.min()
    }

    pub fn min_plus_plus_edge(&self, tree_index: TreeIndex) -> Option<EdgeIndex> {
        self.trees[tree_index].plus_plus_edges.min()
    }

    pub fn min_minus_blossom(&self, tree_index: TreeIndex) -> Option<NodeIndex> {
        self.trees[tree_index].minus_blossoms.min()
    }

    /// the largest increase of this tree's `eps` allowed by its own boundary, ignoring other trees
    pub fn tree_local_bound(&self, tree_index: TreeIndex) -> Weight {
        let mut bound = INFINITY;
        if let Some(edge_index) = self.min_plus_infinity_edge(tree_index) {
            bound = bound.min(self.true_slack(edge_index));
        }
        if let Some(edge_index) = self.min_plus_plus_edge(tree_index) {
            bound = bound.min(self.true_slack(edge_index) / 2.);
        }
        if let Some(node_index) = self.min_minus_blossom(tree_index) {
            bound = bound.min(self.true_dual(node_index));
        }
        bound
    }
}
