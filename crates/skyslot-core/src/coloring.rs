//! Slot colouring heuristics.
//!
//! Three interchangeable heuristics (Welsh–Powell, DSATUR, Recursive Largest
//! First) share one contract: every node of the graph ends with a colour in
//! `1..=kmax`. Nodes a heuristic cannot colour legally are finished by a
//! conflict-minimising pass, and the number of conflicts it had to accept is
//! returned.
//!
//! Tie-breaking is fixed so runs are reproducible:
//! - Welsh–Powell: stable sort by descending degree (insertion order on ties).
//! - DSATUR: saturation desc, degree desc, insertion order.
//! - RLF: first remaining node with the highest degree inside the remaining
//!   subgraph.

use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ColoringError;
use crate::graph::Graph;

/// Colouring heuristic, listed in tie-break priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    WelshPowell,
    Dsatur,
    RecursiveLargestFirst,
}

impl Algorithm {
    /// All heuristics in priority order.
    pub const ALL: [Algorithm; 3] = [
        Algorithm::WelshPowell,
        Algorithm::Dsatur,
        Algorithm::RecursiveLargestFirst,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::WelshPowell => "welsh-powell",
            Algorithm::Dsatur => "dsatur",
            Algorithm::RecursiveLargestFirst => "rlf",
        }
    }

    /// Colour `graph` with at most `kmax` colours and return the conflict count.
    pub fn color(self, graph: &mut Graph, kmax: u32) -> Result<usize, ColoringError> {
        self.color_cancellable(graph, kmax, &CancelFlag::new())
    }

    /// Colour `graph` using its own kmax.
    pub fn color_with_graph_kmax(self, graph: &mut Graph) -> Result<usize, ColoringError> {
        let kmax = graph.kmax().ok_or(ColoringError::MissingKmax)?;
        self.color(graph, kmax)
    }

    /// Like [`Algorithm::color`], aborting with [`ColoringError::Cancelled`]
    /// once `cancel` is raised. A cancelled graph is left partially coloured.
    pub fn color_cancellable(
        self,
        graph: &mut Graph,
        kmax: u32,
        cancel: &CancelFlag,
    ) -> Result<usize, ColoringError> {
        if kmax < 1 {
            return Err(ColoringError::InvalidKmax(kmax));
        }
        graph.reset_colors();

        let order = match self {
            Algorithm::WelshPowell => welsh_powell_pass(graph, kmax, cancel)?,
            Algorithm::Dsatur => dsatur_pass(graph, kmax, cancel)?,
            Algorithm::RecursiveLargestFirst => rlf_pass(graph, kmax, cancel)?,
        };

        let conflicts = resolve_uncolored(graph, kmax, &order, cancel)?;
        graph.set_conflicts_count(conflicts);
        tracing::debug!(
            algorithm = self.name(),
            graph = graph.name(),
            kmax,
            conflicts,
            "colouring complete"
        );
        Ok(conflicts)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "welsh-powell" | "welshpowell" | "wp" => Ok(Algorithm::WelshPowell),
            "dsatur" => Ok(Algorithm::Dsatur),
            "rlf" | "recursive-largest-first" => Ok(Algorithm::RecursiveLargestFirst),
            other => Err(format!("unknown colouring algorithm: {other}")),
        }
    }
}

/// Welsh–Powell colouring. See [`Algorithm::color`].
pub fn welsh_powell(graph: &mut Graph, kmax: u32) -> Result<usize, ColoringError> {
    Algorithm::WelshPowell.color(graph, kmax)
}

/// DSATUR colouring. See [`Algorithm::color`].
pub fn dsatur(graph: &mut Graph, kmax: u32) -> Result<usize, ColoringError> {
    Algorithm::Dsatur.color(graph, kmax)
}

/// Recursive Largest First colouring. See [`Algorithm::color`].
pub fn recursive_largest_first(graph: &mut Graph, kmax: u32) -> Result<usize, ColoringError> {
    Algorithm::RecursiveLargestFirst.color(graph, kmax)
}

/// Cooperative cancellation shared between a worker and its supervisor.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn check(&self) -> Result<(), ColoringError> {
        if self.is_cancelled() {
            Err(ColoringError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Returns the node order used by the fallback pass.
fn welsh_powell_pass(
    graph: &mut Graph,
    kmax: u32,
    cancel: &CancelFlag,
) -> Result<Vec<usize>, ColoringError> {
    let mut order: Vec<usize> = (0..graph.node_count()).collect();
    order.sort_by_key(|&idx| Reverse(graph.degree(idx)));

    let mut colored = 0;
    for color in 1..=kmax {
        if colored == order.len() {
            break;
        }
        cancel.check()?;
        for &idx in &order {
            if graph.color(idx).is_some() {
                continue;
            }
            let free = graph
                .neighbors(idx)
                .all(|nb| graph.color(nb) != Some(color));
            if free {
                graph.set_color(idx, Some(color));
                colored += 1;
            }
        }
    }

    Ok(order)
}

type DsaturKey = (Reverse<usize>, Reverse<usize>, usize);

fn dsatur_pass(
    graph: &mut Graph,
    kmax: u32,
    cancel: &CancelFlag,
) -> Result<Vec<usize>, ColoringError> {
    let n = graph.node_count();
    let key = |saturation: usize, degree: usize, idx: usize| -> DsaturKey {
        (Reverse(saturation), Reverse(degree), idx)
    };

    let mut neighbor_colors: Vec<HashSet<u32>> = vec![HashSet::new(); n];
    let mut queued = vec![true; n];
    let mut queue: BTreeSet<DsaturKey> =
        (0..n).map(|idx| key(0, graph.degree(idx), idx)).collect();

    while let Some((_, _, idx)) = queue.pop_first() {
        cancel.check()?;
        queued[idx] = false;

        // Left uncoloured for the fallback pass when every slot is taken.
        let Some(color) = (1..=kmax).find(|c| !neighbor_colors[idx].contains(c)) else {
            continue;
        };
        graph.set_color(idx, Some(color));

        // Re-key waiting neighbours whose saturation grew.
        for nb in graph.neighbors(idx) {
            if !queued[nb] {
                continue;
            }
            let old = key(neighbor_colors[nb].len(), graph.degree(nb), nb);
            if neighbor_colors[nb].insert(color) {
                queue.remove(&old);
                queue.insert(key(neighbor_colors[nb].len(), graph.degree(nb), nb));
            }
        }
    }

    Ok((0..n).collect())
}

fn rlf_pass(
    graph: &mut Graph,
    kmax: u32,
    cancel: &CancelFlag,
) -> Result<Vec<usize>, ColoringError> {
    let n = graph.node_count();
    let mut remaining: Vec<usize> = (0..n).collect();
    let mut in_remaining = vec![true; n];

    let mut color = 1;
    while color <= kmax && !remaining.is_empty() {
        cancel.check()?;

        let mut seed_pos = 0;
        let mut seed_degree = None;
        for (pos, &idx) in remaining.iter().enumerate() {
            let degree = graph
                .neighbors(idx)
                .filter(|&nb| in_remaining[nb])
                .count();
            if seed_degree.map_or(true, |best| degree > best) {
                seed_pos = pos;
                seed_degree = Some(degree);
            }
        }

        let seed = remaining.remove(seed_pos);
        let mut blocked = vec![false; n];
        let mut class = vec![seed];
        for nb in graph.neighbors(seed) {
            blocked[nb] = true;
        }

        let mut rest = Vec::with_capacity(remaining.len());
        for idx in remaining {
            if blocked[idx] {
                rest.push(idx);
                continue;
            }
            for nb in graph.neighbors(idx) {
                blocked[nb] = true;
            }
            class.push(idx);
        }
        remaining = rest;

        for idx in class {
            in_remaining[idx] = false;
            graph.set_color(idx, Some(color));
        }
        color += 1;
    }

    Ok((0..n).collect())
}

/// Give every uncoloured node the colour shared by the fewest neighbours.
///
/// Ties go to the lowest colour. Returns the number of conflicts accepted,
/// which equals the number of monochromatic edges once all nodes are coloured.
fn resolve_uncolored(
    graph: &mut Graph,
    kmax: u32,
    order: &[usize],
    cancel: &CancelFlag,
) -> Result<usize, ColoringError> {
    let mut total = 0;
    for &idx in order {
        if graph.color(idx).is_some() {
            continue;
        }
        cancel.check()?;

        let mut used: HashMap<u32, usize> = HashMap::new();
        for nb in graph.neighbors(idx) {
            if let Some(color) = graph.color(nb) {
                *used.entry(color).or_default() += 1;
            }
        }

        // Among 1..=degree+1 at least one colour is free whenever kmax allows it.
        let last = kmax.min(u32::try_from(graph.degree(idx) + 1).unwrap_or(u32::MAX));
        let mut best = (usize::MAX, 1);
        for color in 1..=last {
            let conflicts = used.get(&color).copied().unwrap_or(0);
            if conflicts < best.0 {
                best = (conflicts, color);
            }
        }

        total += best.0;
        graph.set_color(idx, Some(best.1));
    }
    Ok(total)
}
