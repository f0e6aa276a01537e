//! Node
//!
//! A node is either an original vertex or a contracted blossom. Nodes never own each other: every link
//! (matched edge, tree parent, children, blossom siblings) is an index into the arena of [`State`].
//!

use crate::state::*;
use crate::util::*;
use serde::{Deserialize, Serialize};

/// the label of an outer node with respect to the alternating forest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    /// even distance from the root of its tree, dual grows with the tree
    Plus,
    /// odd distance from the root of its tree, dual shrinks with the tree
    Minus,
    /// not in any tree (matched node, or inner node of a blossom), dual is exact
    Infinity,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub index: NodeIndex,
    /// heads of the two incidence lists: `first[dir]` holds edges whose `head[dir]` is the opposite node
    pub first: [Option<EdgeIndex>; 2],
    pub label: Label,
    /// dual variable, to be corrected by the `eps` of the tree according to the label
    pub dual: Weight,
    pub matched: Option<EdgeIndex>,
    /// root of an alternating tree; for an inner node, marks the base of its blossom at contraction time
    pub is_tree_root: bool,
    pub is_blossom: bool,
    /// false while the node is contracted into a blossom
    pub is_outer: bool,
    /// an expanded blossom whose slot in the arena is no longer used
    pub is_removed: bool,
    /// scratch flag for nearest common ancestor search
    pub is_marked: bool,
    pub tree: Option<TreeIndex>,
    /// the tree edge to the parent: the matched edge for a plus node, the grown edge for a minus node
    pub parent_edge: Option<EdgeIndex>,
    pub first_tree_child: Option<NodeIndex>,
    pub tree_sibling_prev: Option<NodeIndex>,
    pub tree_sibling_next: Option<NodeIndex>,
    pub blossom_parent: Option<NodeIndex>,
    /// the edge to the next member in the circular list of the enclosing blossom
    pub blossom_sibling: Option<EdgeIndex>,
    /// the tree whose minus-blossom heap currently holds this node
    pub minus_heap: Option<TreeIndex>,
}

impl Node {
    pub fn new(index: NodeIndex) -> Self {
        Self {
            index,
            first: [None, None],
            label: Label::Infinity,
            dual: 0.,
            matched: None,
            is_tree_root: false,
            is_blossom: false,
            is_outer: true,
            is_removed: false,
            is_marked: false,
            tree: None,
            parent_edge: None,
            first_tree_child: None,
            tree_sibling_prev: None,
            tree_sibling_next: None,
            blossom_parent: None,
            blossom_sibling: None,
            minus_heap: None,
        }
    }

    pub fn new_blossom(index: NodeIndex) -> Self {
        Self {
            is_blossom: true,
            ..Self::new(index)
        }
    }

    pub fn is_plus(&self) -> bool {
        self.label == Label::Plus
    }

    pub fn is_minus(&self) -> bool {
        self.label == Label::Minus
    }

    pub fn is_infinity(&self) -> bool {
        self.label == Label::Infinity
    }

    /// how much the stored dual lags behind the true dual, given the `eps` of its tree
    pub fn eps_contribution(&self, eps: Weight) -> Weight {
        match self.label {
            Label::Plus => eps,
            Label::Minus => -eps,
            Label::Infinity => 0.,
        }
    }

    /// drop every alternating-tree link; the label is handled by [`State::set_label`]
    pub fn clear_tree_links(&mut self) {
        self.is_tree_root = false;
        self.parent_edge = None;
        self.first_tree_child = None;
        self.tree_sibling_prev = None;
        self.tree_sibling_next = None;
    }
}

impl State {
    /// the anchor node whose sibling list enumerates all tree roots
    pub fn sentinel(&self) -> NodeIndex {
        self.node_num
    }

    pub fn tree_parent(&self, node_index: NodeIndex) -> Option<NodeIndex> {
        self.nodes[node_index]
            .parent_edge
            .map(|edge_index| self.edges[edge_index].opposite(node_index))
    }

    pub fn add_tree_child(&mut self, parent: NodeIndex, child: NodeIndex) {
        let first = self.nodes[parent].first_tree_child;
        self.nodes[child].tree_sibling_prev = None;
        self.nodes[child].tree_sibling_next = first;
        if let Some(first) = first {
            self.nodes[first].tree_sibling_prev = Some(child);
        }
        self.nodes[parent].first_tree_child = Some(child);
    }

    /// let `new` take the place of `old` in the child list of `parent`
    pub fn replace_tree_child(&mut self, parent: NodeIndex, old: NodeIndex, new: NodeIndex) {
        let prev = self.nodes[old].tree_sibling_prev.take();
        let next = self.nodes[old].tree_sibling_next.take();
        self.nodes[new].tree_sibling_prev = prev;
        self.nodes[new].tree_sibling_next = next;
        match prev {
            Some(prev) => self.nodes[prev].tree_sibling_next = Some(new),
            None => self.nodes[parent].first_tree_child = Some(new),
        }
        if let Some(next) = next {
            self.nodes[next].tree_sibling_prev = Some(new);
        }
    }

    pub fn tree_children(&self, node_index: NodeIndex) -> Vec<NodeIndex> {
        let mut children = vec![];
        let mut child = self.nodes[node_index].first_tree_child;
        while let Some(child_index) = child {
            children.push(child_index);
            child = self.nodes[child_index].tree_sibling_next;
        }
        children
    }

    /// all nodes of the tree rooted at `root`, parents before children
    pub fn tree_nodes(&self, root: NodeIndex) -> Vec<NodeIndex> {
        let mut nodes = vec![root];
        let mut cursor = 0;
        while cursor < nodes.len() {
            let children = self.tree_children(nodes[cursor]);
            nodes.extend(children);
            cursor += 1;
        }
        nodes
    }

    pub fn add_root(&mut self, root: NodeIndex) {
        let sentinel = self.sentinel();
        let tail = self.nodes[sentinel].tree_sibling_prev;
        self.nodes[root].tree_sibling_prev = tail;
        self.nodes[root].tree_sibling_next = None;
        match tail {
            Some(tail) => self.nodes[tail].tree_sibling_next = Some(root),
            None => self.nodes[sentinel].tree_sibling_next = Some(root),
        }
        self.nodes[sentinel].tree_sibling_prev = Some(root);
    }

    pub fn remove_root(&mut self, root: NodeIndex) {
        let sentinel = self.sentinel();
        let prev = self.nodes[root].tree_sibling_prev.take();
        let next = self.nodes[root].tree_sibling_next.take();
        match prev {
            Some(prev) => self.nodes[prev].tree_sibling_next = next,
            None => self.nodes[sentinel].tree_sibling_next = next,
        }
        match next {
            Some(next) => self.nodes[next].tree_sibling_prev = prev,
            None => self.nodes[sentinel].tree_sibling_prev = prev,
        }
    }

    pub fn replace_root(&mut self, old: NodeIndex, new: NodeIndex) {
        let sentinel = self.sentinel();
        let prev = self.nodes[old].tree_sibling_prev.take();
        let next = self.nodes[old].tree_sibling_next.take();
        self.nodes[new].tree_sibling_prev = prev;
        self.nodes[new].tree_sibling_next = next;
        match prev {
            Some(prev) => self.nodes[prev].tree_sibling_next = Some(new),
            None => self.nodes[sentinel].tree_sibling_next = Some(new),
        }
        match next {
            Some(next) => self.nodes[next].tree_sibling_prev = Some(new),
            None => self.nodes[sentinel].tree_sibling_prev = Some(new),
        }
    }

    pub fn roots(&self) -> Vec<NodeIndex> {
        let mut roots = vec![];
        let mut root = self.nodes[self.sentinel()].tree_sibling_next;
        while let Some(root_index) = root {
            roots.push(root_index);
            root = self.nodes[root_index].tree_sibling_next;
        }
        roots
    }

    /// nearest common ancestor of two nodes in the same tree
    pub fn find_tree_lca(&mut self, a: NodeIndex, b: NodeIndex) -> NodeIndex {
        let mut path = vec![];
        let mut cursor = Some(a);
        while let Some(node_index) = cursor {
            self.nodes[node_index].is_marked = true;
            path.push(node_index);
            cursor = self.tree_parent(node_index);
        }
        let mut lca = b;
        while !self.nodes[lca].is_marked {
            lca = self
                .tree_parent(lca)
                .expect("both endpoints of an in-tree edge must share the tree root");
        }
        for node_index in path {
            self.nodes[node_index].is_marked = false;
        }
        lca
    }

    /// the direct member of `blossom` that contains `node_index`, if any
    pub fn blossom_child_containing(&self, node_index: NodeIndex, blossom: NodeIndex) -> Option<NodeIndex> {
        let mut cursor = node_index;
        while let Some(parent) = self.nodes[cursor].blossom_parent {
            if parent == blossom {
                return Some(cursor);
            }
            cursor = parent;
        }
        None
    }

    /// the members of a blossom in the order of the circular sibling list, starting from `start`,
    /// each paired with the sibling edge leading to the next member
    pub fn blossom_cycle(&self, start: NodeIndex) -> Vec<(NodeIndex, EdgeIndex)> {
        let mut cycle = vec![];
        let mut node_index = start;
        loop {
            let sibling = self.nodes[node_index]
                .blossom_sibling
                .expect("blossom members form a closed cycle");
            cycle.push((node_index, sibling));
            node_index = self.edges[sibling].opposite(node_index);
            if node_index == start {
                return cycle;
            }
        }
    }

    pub fn blossom_path(&self, ends: [NodeIndex; 2], root: NodeIndex) -> BlossomPathIterator<'_> {
        BlossomPathIterator {
            state: self,
            ends,
            root,
            cursor: Some(ends[0]),
            direction: 0,
        }
    }
}

/// walks from both endpoints of the (+, +) edge closing an odd cycle up to their common ancestor;
/// the ancestor is yielded exactly once, in direction 0
pub struct BlossomPathIterator<'s> {
    state: &'s State,
    ends: [NodeIndex; 2],
    root: NodeIndex,
    cursor: Option<NodeIndex>,
    direction: usize,
}

impl Iterator for BlossomPathIterator<'_> {
    type Item = (NodeIndex, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let node_index = self.cursor?;
        if node_index == self.root {
            if self.direction == 1 {
                self.cursor = None;
                return None;
            }
            self.direction = 1;
            self.cursor = Some(self.ends[1]);
            return Some((node_index, 0));
        }
        self.cursor = self.state.tree_parent(node_index);
        Some((node_index, self.direction))
    }
}
