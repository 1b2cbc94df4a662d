//! Undirected conflict graph with per-node colour slots.

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A node of the conflict graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    /// Assigned slot in `1..=kmax`, `None` while uncoloured
    pub color: Option<u32>,
}

/// Undirected graph over a petgraph `UnGraph`, addressed by node id.
///
/// Nodes are never removed, so a node's position (`NodeIndex::index`) is its
/// insertion order, which exports and tie-breaking rely on. Duplicate edges
/// collapse into one and self-loops are ignored.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    name: String,
    kmax: Option<u32>,
    conflicts_count: Option<usize>,
    graph: UnGraph<Node, ()>,
    id_to_index: HashMap<String, NodeIndex>,
}

impl Graph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the colour budget.
    pub fn with_kmax(mut self, kmax: u32) -> Self {
        self.kmax = Some(kmax);
        self
    }

    /// Provenance label (source file name for loaded graphs).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn kmax(&self) -> Option<u32> {
        self.kmax
    }

    pub fn set_kmax(&mut self, kmax: u32) {
        self.kmax = Some(kmax);
    }

    /// Conflicts left by the last completed colouring run.
    pub fn conflicts_count(&self) -> Option<usize> {
        self.conflicts_count
    }

    pub(crate) fn set_conflicts_count(&mut self, count: usize) {
        self.conflicts_count = Some(count);
    }

    /// Underlying petgraph graph, for the `petgraph::algo` routines.
    pub fn as_petgraph(&self) -> &UnGraph<Node, ()> {
        &self.graph
    }

    fn add_or_get_node(&mut self, id: &str) -> NodeIndex {
        if let Some(&index) = self.id_to_index.get(id) {
            return index;
        }
        let index = self.graph.add_node(Node {
            id: id.to_string(),
            color: None,
        });
        self.id_to_index.insert(id.to_string(), index);
        index
    }

    /// Add a node if missing and return its position.
    pub fn add_node(&mut self, id: &str) -> usize {
        self.add_or_get_node(id).index()
    }

    /// Add an undirected edge, creating missing endpoints.
    ///
    /// Returns `false` when the edge already exists or is a self-loop.
    pub fn add_edge(&mut self, a: &str, b: &str) -> bool {
        let a = self.add_or_get_node(a);
        let b = self.add_or_get_node(b);
        if a == b || self.graph.find_edge(a, b).is_some() {
            return false;
        }
        self.graph.add_edge(a, b, ());
        true
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.graph.node_indices().map(move |index| &self.graph[index])
    }

    pub fn node(&self, idx: usize) -> &Node {
        &self.graph[NodeIndex::new(idx)]
    }

    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.id_to_index.get(id).map(|index| index.index())
    }

    pub fn neighbors(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph
            .neighbors(NodeIndex::new(idx))
            .map(|index| index.index())
    }

    pub fn degree(&self, idx: usize) -> usize {
        self.graph.edges(NodeIndex::new(idx)).count()
    }

    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        match (self.id_to_index.get(a), self.id_to_index.get(b)) {
            (Some(&a), Some(&b)) => self.graph.find_edge(a, b).is_some(),
            _ => false,
        }
    }

    /// Edges as position pairs, in insertion order.
    pub fn edge_indices(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.graph
            .edge_references()
            .map(|edge| (edge.source().index(), edge.target().index()))
    }

    /// Edges as id pairs, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.graph.edge_references().map(move |edge| {
            (
                self.graph[edge.source()].id.as_str(),
                self.graph[edge.target()].id.as_str(),
            )
        })
    }

    pub fn color(&self, idx: usize) -> Option<u32> {
        self.graph[NodeIndex::new(idx)].color
    }

    pub fn color_of(&self, id: &str) -> Option<u32> {
        self.id_to_index
            .get(id)
            .and_then(|&index| self.graph[index].color)
    }

    pub fn set_color(&mut self, idx: usize, color: Option<u32>) {
        self.graph[NodeIndex::new(idx)].color = color;
    }

    /// Mark every node uncoloured and forget the previous conflict count.
    pub fn reset_colors(&mut self) {
        for node in self.graph.node_weights_mut() {
            node.color = None;
        }
        self.conflicts_count = None;
    }

    pub fn is_fully_colored(&self) -> bool {
        self.nodes().all(|node| node.color.is_some())
    }

    /// Recount edges whose endpoints share a colour.
    pub fn count_conflicts(&self) -> usize {
        self.graph
            .edge_references()
            .filter(|edge| {
                let color = self.graph[edge.source()].color;
                color.is_some() && color == self.graph[edge.target()].color
            })
            .count()
    }
}
