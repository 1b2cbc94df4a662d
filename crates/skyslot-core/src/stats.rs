//! Structural statistics of a conflict graph.

use petgraph::algo::{connected_components, dijkstra};
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

use crate::graph::Graph;

/// Snapshot of the statistics exported for a processed graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    pub file_name: String,
    pub node_count: usize,
    pub edge_count: usize,
    pub average_degree: f64,
    pub connected_components: usize,
    /// `None` when the graph is disconnected (infinite diameter)
    pub diameter: Option<f64>,
    /// `None` until a colouring run completed
    pub conflicts: Option<usize>,
}

impl GraphStats {
    pub fn compute(graph: &Graph) -> Self {
        Self {
            file_name: graph.name().to_string(),
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            average_degree: average_degree(graph),
            connected_components: connected_components_count(graph),
            diameter: diameter(graph),
            conflicts: graph.conflicts_count(),
        }
    }
}

/// Mean node degree, `2·|E| / |V|`. Zero for an empty graph.
pub fn average_degree(graph: &Graph) -> f64 {
    if graph.is_empty() {
        return 0.0;
    }
    (2 * graph.edge_count()) as f64 / graph.node_count() as f64
}

/// Number of connected components.
pub fn connected_components_count(graph: &Graph) -> usize {
    connected_components(graph.as_petgraph())
}

/// Greatest hop distance from `source` to any node it can reach, plus the
/// number of nodes reached (including `source`).
pub fn eccentricity(graph: &Graph, source: usize) -> (usize, usize) {
    let hops = dijkstra(graph.as_petgraph(), NodeIndex::new(source), None, |_| 1usize);
    let farthest = hops.values().copied().max().unwrap_or(0);
    (farthest, hops.len())
}

/// Unweighted diameter, `None` when some node cannot reach another.
pub fn diameter(graph: &Graph) -> Option<f64> {
    let n = graph.node_count();
    let mut max_eccentricity = 0;
    for idx in 0..n {
        let (ecc, reached) = eccentricity(graph, idx);
        if reached < n {
            return None;
        }
        max_eccentricity = max_eccentricity.max(ecc);
    }
    Some(max_eccentricity as f64)
}
