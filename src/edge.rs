//! Edge
//!
//! An undirected edge stored with a direction: `head[0]` and `head[1]` are its current endpoints (outermost
//! nodes containing the original endpoints, or inner nodes if the edge lies inside a blossom). The edge
//! sits in the incidence list `first[dir]` of node `head[1 - dir]`.
//!

use crate::state::*;
use crate::util::*;

/// which heap currently holds the edge; an edge is in at most one heap at any time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapLocation {
    None,
    /// (+, inf) edge of a tree, candidate for grow
    PlusInfinity(TreeIndex),
    /// (+, +) edge inside a tree, candidate for shrink
    PlusPlus(TreeIndex),
    /// (+, +) edge between two trees, candidate for augment
    TreePlusPlus(TreeEdgeIndex),
    /// (+, -) edge between two trees whose plus endpoint is in tree `head[dir]` of the tree edge
    TreePlusMinus(TreeEdgeIndex, usize),
}

#[derive(Debug, Clone)]
pub struct Edge {
    /// index of the edge in the input graph
    pub index: EdgeIndex,
    pub weight: Weight,
    /// slack, to be corrected by the `eps` of the trees of both current endpoints
    pub slack: Weight,
    pub head: [NodeIndex; 2],
    pub head_original: [VertexIndex; 2],
    pub prev: [Option<EdgeIndex>; 2],
    pub next: [Option<EdgeIndex>; 2],
    pub heap: HeapLocation,
}

impl Edge {
    pub fn new(index: EdgeIndex, from: VertexIndex, to: VertexIndex, weight: Weight) -> Self {
        Self {
            index,
            weight,
            slack: weight,
            head: [to, from],
            head_original: [to, from],
            prev: [None, None],
            next: [None, None],
            heap: HeapLocation::None,
        }
    }

    pub fn opposite(&self, node_index: NodeIndex) -> NodeIndex {
        if self.head[0] == node_index {
            self.head[1]
        } else {
            debug_assert_eq!(self.head[1], node_index, "{node_index} is not an endpoint of {self:?}");
            self.head[0]
        }
    }

    /// the direction `dir` such that `head[dir]` is the endpoint opposite to `node_index`
    pub fn direction_from(&self, node_index: NodeIndex) -> usize {
        if self.head[1] == node_index {
            0
        } else {
            debug_assert_eq!(self.head[0], node_index, "{node_index} is not an endpoint of {self:?}");
            1
        }
    }

    pub fn opposite_original(&self, vertex_index: VertexIndex) -> VertexIndex {
        if self.head_original[0] == vertex_index {
            self.head_original[1]
        } else {
            self.head_original[0]
        }
    }
}

impl State {
    /// put the edge into the incidence list `first[dir]` of `node_index`, which becomes `head[1 - dir]`
    pub fn attach_edge(&mut self, edge_index: EdgeIndex, dir: usize, node_index: NodeIndex) {
        let first = self.nodes[node_index].first[dir];
        let edge = &mut self.edges[edge_index];
        edge.head[1 - dir] = node_index;
        edge.prev[dir] = None;
        edge.next[dir] = first;
        if let Some(first) = first {
            self.edges[first].prev[dir] = Some(edge_index);
        }
        self.nodes[node_index].first[dir] = Some(edge_index);
    }

    pub fn detach_edge(&mut self, edge_index: EdgeIndex, dir: usize) {
        let node_index = self.edges[edge_index].head[1 - dir];
        let prev = self.edges[edge_index].prev[dir].take();
        let next = self.edges[edge_index].next[dir].take();
        match prev {
            Some(prev) => self.edges[prev].next[dir] = next,
            None => self.nodes[node_index].first[dir] = next,
        }
        if let Some(next) = next {
            self.edges[next].prev[dir] = prev;
        }
    }

    pub fn move_edge(&mut self, edge_index: EdgeIndex, dir: usize, node_index: NodeIndex) {
        self.detach_edge(edge_index, dir);
        self.attach_edge(edge_index, dir, node_index);
    }

    /// edges whose current endpoint is `node_index`, with the direction towards the opposite endpoint
    pub fn incident_edges(&self, node_index: NodeIndex) -> Vec<(EdgeIndex, usize)> {
        let mut edges = vec![];
        for dir in 0..2 {
            let mut edge = self.nodes[node_index].first[dir];
            while let Some(edge_index) = edge {
                edges.push((edge_index, dir));
                edge = self.edges[edge_index].next[dir];
            }
        }
        edges
    }
}
