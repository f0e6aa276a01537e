//! Primal Updater
//!
//! The four structural operations of Blossom V, each consuming one tight edge (or one zero-dual minus
//! blossom) and leaving every edge in the heap that matches its new endpoint labels.
//!

use crate::node::*;
use crate::state::*;
use crate::util::*;

pub struct PrimalUpdater<'s> {
    pub state: &'s mut State,
}

impl<'s> PrimalUpdater<'s> {
    pub fn new(state: &'s mut State) -> Self {
        Self { state }
    }

    /// the plus endpoint of a (+, inf) edge grows the tree by the infinity endpoint and its partner
    pub fn grow(&mut self, edge_index: EdgeIndex) {
        let state = &mut *self.state;
        let [a, b] = state.edges[edge_index].head;
        let (parent, minus) = if state.nodes[a].is_plus() { (a, b) } else { (b, a) };
        debug_assert!(state.nodes[minus].is_infinity() && state.nodes[minus].is_outer);
        let tree_index = state.nodes[parent].tree.expect("plus node belongs to a tree");
        let matched = state.nodes[minus]
            .matched
            .expect("an outer node outside of every tree is matched");
        let plus = state.edges[matched].opposite(minus);
        tracing::trace!("grow {parent} -> {minus} -> {plus} in tree {tree_index}");
        state.nodes[minus].parent_edge = Some(edge_index);
        state.add_tree_child(parent, minus);
        state.set_label(minus, Label::Minus, Some(tree_index));
        state.nodes[plus].parent_edge = Some(matched);
        state.add_tree_child(minus, plus);
        state.set_label(plus, Label::Plus, Some(tree_index));
        state.place_incident_edges(minus);
        state.place_incident_edges(plus);
    }

    /// re-match along the tree path from a plus node to its root so that the root becomes matched and
    /// the old matched edge of the plus node is released; the caller sets the new matched edge of the node
    pub fn flip_branch(&mut self, node_index: NodeIndex) {
        let state = &mut *self.state;
        let mut plus = node_index;
        while !state.nodes[plus].is_tree_root {
            let minus = state.tree_parent(plus).expect("non-root plus node has a minus parent");
            let edge_index = state.nodes[minus].parent_edge.expect("minus node has a plus parent");
            let parent = state.edges[edge_index].opposite(minus);
            state.nodes[minus].matched = Some(edge_index);
            state.nodes[parent].matched = Some(edge_index);
            plus = parent;
        }
    }

    /// a tight (+, +) edge between two trees: flip both branches and dissolve both trees
    pub fn augment(&mut self, edge_index: EdgeIndex) {
        let [a, b] = self.state.edges[edge_index].head;
        let tree_a = self.state.nodes[a].tree.expect("plus node belongs to a tree");
        let tree_b = self.state.nodes[b].tree.expect("plus node belongs to a tree");
        debug_assert_ne!(tree_a, tree_b);
        tracing::trace!("augment {a} <-> {b} between trees {tree_a} and {tree_b}");
        self.flip_branch(a);
        self.flip_branch(b);
        let state = &mut *self.state;
        state.nodes[a].matched = Some(edge_index);
        state.nodes[b].matched = Some(edge_index);
        let mut members = vec![];
        for tree_index in [tree_a, tree_b] {
            let root = state.trees[tree_index].root;
            members.extend(state.tree_nodes(root));
            state.remove_root(root);
        }
        for &node_index in members.iter() {
            state.set_label(node_index, Label::Infinity, None);
            state.nodes[node_index].clear_tree_links();
        }
        for &node_index in members.iter() {
            state.place_incident_edges(node_index);
        }
        state.remove_tree(tree_a);
        state.remove_tree(tree_b);
    }

    /// a tight (+, +) edge inside a tree closes an odd cycle, which is contracted into a new plus blossom
    pub fn shrink(&mut self, edge_index: EdgeIndex) -> NodeIndex {
        let state = &mut *self.state;
        let ends = state.edges[edge_index].head;
        let tree_index = state.nodes[ends[0]].tree.expect("plus node belongs to a tree");
        let root = state.find_tree_lca(ends[0], ends[1]);
        let path: Vec<(NodeIndex, usize)> = state.blossom_path(ends, root).collect();
        let blossom = state.nodes.len();
        tracing::trace!("shrink {} nodes into blossom {blossom} in tree {tree_index}", path.len());
        state.nodes.push(Node::new_blossom(blossom));
        // the blossom takes the place of its base in the tree
        state.nodes[blossom].parent_edge = state.nodes[root].parent_edge;
        state.nodes[blossom].matched = state.nodes[root].matched;
        if state.nodes[root].is_tree_root {
            state.nodes[blossom].is_tree_root = true;
            state.replace_root(root, blossom);
            state.trees[tree_index].root = blossom;
        } else {
            let parent = state.tree_parent(root).expect("non-root node has a parent");
            state.replace_tree_child(parent, root, blossom);
        }
        for &(node_index, _) in path.iter() {
            state.nodes[node_index].blossom_parent = Some(blossom);
        }
        let mut outside_children = vec![];
        for &(node_index, _) in path.iter() {
            for child in state.tree_children(node_index) {
                if state.nodes[child].blossom_parent != Some(blossom) {
                    outside_children.push(child);
                }
            }
        }
        // link the members into a circular list: root, down to ends[0], across the edge, up from ends[1]
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
        for &(node_index, _) in path.iter() {
            state.set_label(node_index, Label::Infinity, None);
            state.nodes[node_index].clear_tree_links();
            state.nodes[node_index].is_outer = false;
        }
        state.nodes[root].is_tree_root = true;
        for &(node_index, _) in path.iter() {
            for (incident, dir) in state.incident_edges(node_index) {
                let opposite = state.edges[incident].head[dir];
                if state.nodes[opposite].blossom_parent != Some(blossom) {
                    state.move_edge(incident, dir, blossom);
                }
            }
        }
        for child in outside_children {
            state.add_tree_child(blossom, child);
        }
        state.set_label(blossom, Label::Plus, Some(tree_index));
        state.place_incident_edges(blossom);
        state.blossom_num += 1;
        blossom
    }

    /// a minus blossom whose dual dropped to zero is dissolved: the even path from its entry member to its
    /// base stays in the tree, the remaining members leave the tree as matched pairs
    pub fn expand(&mut self, blossom: NodeIndex) {
        let state = &mut *self.state;
        debug_assert!(state.nodes[blossom].is_minus() && state.nodes[blossom].is_blossom);
        let tree_index = state.nodes[blossom].tree.expect("minus node belongs to a tree");
        let parent_edge = state.nodes[blossom].parent_edge.expect("minus node has a parent edge");
        let matched = state.nodes[blossom].matched.expect("minus node is matched");
        let parent = state.edges[parent_edge].opposite(blossom);
        let child = state.edges[matched].opposite(blossom);
        tracing::trace!("expand blossom {blossom} in tree {tree_index}");
        state.set_label(blossom, Label::Infinity, None);
        let blossom_dual = state.nodes[blossom].dual;
        for (edge_index, dir) in state.incident_edges(blossom) {
            let inner = state.edges[edge_index].head_original[1 - dir];
            let member = state
                .blossom_child_containing(inner, blossom)
                .expect("boundary edge ends inside the blossom");
            state.edges[edge_index].slack += blossom_dual;
            state.move_edge(edge_index, dir, member);
        }
        let entry = state.edges[parent_edge].opposite(parent);
        let base = state.edges[matched].opposite(child);
        let cycle = state.blossom_cycle(base);
        let length = cycle.len();
        for &(node_index, _) in cycle.iter() {
            let node = &mut state.nodes[node_index];
            node.blossom_parent = None;
            node.blossom_sibling = None;
            node.is_outer = true;
            node.clear_tree_links();
        }
        // re-match the members around the new base
        state.nodes[base].matched = Some(matched);
        for position in (1..length).step_by(2) {
            let (first, sibling) = cycle[position];
            let (second, _) = cycle[position + 1];
            state.nodes[first].matched = Some(sibling);
            state.nodes[second].matched = Some(sibling);
        }
        // even-length path from the entry member to the base, with the edge from the previous node
        let entry_position = cycle
            .iter()
            .position(|&(node_index, _)| node_index == entry)
            .expect("entry member is on the cycle");
        let mut path: Vec<(NodeIndex, EdgeIndex)> = vec![(entry, parent_edge)];
        if entry_position % 2 == 0 {
            // walking backwards, the sibling edge of each node leads to the previous one on the path
            for position in (0..entry_position).rev() {
                path.push(cycle[position]);
            }
        } else {
            for position in entry_position..length {
                let (_, sibling) = cycle[position];
                let (next, _) = cycle[(position + 1) % length];
                path.push((next, sibling));
            }
        }
        state.replace_tree_child(parent, blossom, entry);
        for position in 0..path.len() {
            let (node_index, edge_index) = path[position];
            state.nodes[node_index].parent_edge = Some(edge_index);
            if position > 0 {
                state.add_tree_child(path[position - 1].0, node_index);
            }
            let label = if position % 2 == 0 { Label::Minus } else { Label::Plus };
            state.set_label(node_index, label, Some(tree_index));
        }
        state.add_tree_child(base, child);
        let node = &mut state.nodes[blossom];
        node.is_removed = true;
        node.is_outer = false;
        node.matched = None;
        node.clear_tree_links();
        state.blossom_num -= 1;
        for &(node_index, _) in cycle.iter() {
            state.place_incident_edges(node_index);
        }
    }

    /// once every node is matched, propagate the matched edge of each blossom down to its members so
    /// that every original vertex knows its partner; blossom structure and duals are left intact
    pub fn finish(&mut self) {
        let state = &mut *self.state;
        let mut stack: Vec<NodeIndex> = (state.node_num + 1..state.nodes.len())
            .filter(|&node_index| {
                let node = &state.nodes[node_index];
                node.is_blossom && node.is_outer && !node.is_removed
            })
            .collect();
        while let Some(blossom) = stack.pop() {
            let matched = state.nodes[blossom].matched.expect("every outer node is matched at the end");
            let [u, v] = state.edges[matched].head_original;
            let base = state
                .blossom_child_containing(u, blossom)
                .or_else(|| state.blossom_child_containing(v, blossom))
                .expect("the matched edge of a blossom has an endpoint inside");
            let cycle = state.blossom_cycle(base);
            state.nodes[base].matched = Some(matched);
            for position in (1..cycle.len()).step_by(2) {
                let (first, sibling) = cycle[position];
                let (second, _) = cycle[position + 1];
                state.nodes[first].matched = Some(sibling);
                state.nodes[second].matched = Some(sibling);
            }
            stack.extend(
                cycle
                    .iter()
                    .map(|&(node_index, _)| node_index)
                    .filter(|&node_index| state.nodes[node_index].is_blossom),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::HeapLocation;
    use crate::initializer::*;
    use crate::options::*;

    /// zero-weight graph where every edge is tight, with the given pairs pre-matched
    fn tight_state(vertex_num: VertexNum, edges: &[(VertexIndex, VertexIndex)], matched: &[EdgeIndex]) -> State {
        let weighted_edges = edges.iter().map(|&(u, v)| WeightedEdge::new(u, v, 0.)).collect();
        let initializer = SolverInitializer::new(vertex_num, weighted_edges);
        let mut state = State::new(&initializer, Options::default()).unwrap();
        for &edge_index in matched.iter() {
            let [u, v] = state.edges[edge_index].head;
            state.nodes[u].matched = Some(edge_index);
            state.nodes[v].matched = Some(edge_index);
        }
        Initializer::allocate_trees(&mut state);
        Initializer::init_auxiliary_graph(&mut state);
        state
    }

    #[test]
    fn primal_updater_grow_augment_1() {
        // cargo test primal_updater_grow_augment_1 -- --nocapture
        let mut state = tight_state(4, &[(0, 1), (1, 2), (2, 3)], &[1]);
        assert_eq!(state.tree_num, 2);
        assert_eq!(state.edges[0].heap, HeapLocation::PlusInfinity(0));
        PrimalUpdater::new(&mut state).grow(0);
        assert!(state.nodes[1].is_minus() && state.nodes[2].is_plus());
        assert_eq!(state.tree_parent(2), Some(1));
        let tree_edges = state.tree_edges_of(0);
        assert_eq!(tree_edges.len(), 1);
        assert_eq!(state.tree_edges[tree_edges[0].0].plus_plus_edges.min(), Some(2));
        PrimalUpdater::new(&mut state).augment(2);
        assert_eq!(state.tree_num, 0);
        assert!(state.roots().is_empty());
        assert_eq!(state.nodes[0].matched, Some(0));
        assert_eq!(state.nodes[1].matched, Some(0));
        assert_eq!(state.nodes[2].matched, Some(2));
        assert_eq!(state.nodes[3].matched, Some(2));
        for node in state.nodes.iter().take(4) {
            assert!(node.is_infinity() && node.tree.is_none() && node.parent_edge.is_none());
        }
        assert!(state.edges.iter().all(|edge| edge.heap == HeapLocation::None));
    }

    #[test]
    fn primal_updater_shrink_expand_1() {
        // cargo test primal_updater_shrink_expand_1 -- --nocapture
        // triangle 0 1 2 with 1 = 2 matched, and two more free vertices 3 (next to 0) and 4 (next to 1)
        let mut state = tight_state(5, &[(0, 1), (1, 2), (2, 0), (0, 3), (1, 4)], &[1]);
        assert_eq!(state.tree_num, 3);
        PrimalUpdater::new(&mut state).grow(0);
        assert_eq!(state.min_plus_plus_edge(0), Some(2));
        let blossom = PrimalUpdater::new(&mut state).shrink(2);
        assert_eq!(blossom, 6);
        assert_eq!(state.blossom_num, 1);
        assert_eq!(state.trees[0].root, blossom);
        assert_eq!(state.roots(), vec![blossom, 3, 4]);
        assert!(state.nodes[blossom].is_plus() && state.nodes[blossom].is_tree_root);
        for member in 0..3 {
            assert_eq!(state.nodes[member].blossom_parent, Some(blossom));
            assert!(!state.nodes[member].is_outer);
        }
        let cycle: Vec<NodeIndex> = state.blossom_cycle(0).into_iter().map(|(node, _)| node).collect();
        assert_eq!(cycle, vec![0, 2, 1]);
        assert_eq!(state.edges[3].head, [3, blossom]);
        // the blossom is matched to 3, then grown into by the tree of 4 as a minus blossom of zero dual
        PrimalUpdater::new(&mut state).augment(3);
        assert_eq!(state.tree_num, 1);
        assert_eq!(state.edges[4].heap, HeapLocation::PlusInfinity(2));
        PrimalUpdater::new(&mut state).grow(4);
        assert!(state.nodes[blossom].is_minus());
        assert_eq!(state.min_minus_blossom(2), Some(blossom));
        assert_eq!(state.true_dual(blossom), 0.);
        PrimalUpdater::new(&mut state).expand(blossom);
        assert!(state.nodes[blossom].is_removed);
        assert_eq!(state.blossom_num, 0);
        assert_eq!(state.tree_nodes(4), vec![4, 1, 2, 0, 3]);
        let labels: Vec<Label> = [1, 2, 0, 3].iter().map(|&node| state.nodes[node].label).collect();
        assert_eq!(labels, vec![Label::Minus, Label::Plus, Label::Minus, Label::Plus]);
        assert_eq!(state.nodes[1].matched, Some(1));
        assert_eq!(state.nodes[2].matched, Some(1));
        assert_eq!(state.nodes[0].matched, Some(3));
        for member in 0..3 {
            assert!(state.nodes[member].is_outer && state.nodes[member].blossom_parent.is_none());
        }
        assert!(state.trees[2].plus_infinity_edges.is_empty());
        assert!(state.trees[2].plus_plus_edges.is_empty());
        assert!(state.trees[2].minus_blossoms.is_empty());
    }

    #[test]
    fn primal_updater_finish_1() {
        // cargo test primal_updater_finish_1 -- --nocapture
        // a contracted triangle matched to a fourth vertex passes the matching down to its members
        let mut state = tight_state(4, &[(0, 1), (1, 2), (2, 0), (0, 3)], &[1]);
        PrimalUpdater::new(&mut state).grow(0);
        let blossom = PrimalUpdater::new(&mut state).shrink(2);
        PrimalUpdater::new(&mut state).augment(3);
        assert_eq!(state.tree_num, 0);
        assert_eq!(state.nodes[blossom].matched, Some(3));
        PrimalUpdater::new(&mut state).finish();
        assert_eq!(state.nodes[0].matched, Some(3));
        assert_eq!(state.nodes[3].matched, Some(3));
        assert_eq!(state.nodes[1].matched, Some(1));
        assert_eq!(state.nodes[2].matched, Some(1));
        assert_eq!(state.nodes[0].blossom_parent, Some(blossom));
    }
}
