//! Heuristic selection for the command line.

use clap::ValueEnum;
use skyslot_core::{Algorithm, ColoringError, Graph};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmChoice {
    WelshPowell,
    Dsatur,
    Rlf,
    /// Run every heuristic and keep the fewest conflicts
    Best,
}

impl AlgorithmChoice {
    pub fn algorithm(self) -> Option<Algorithm> {
        match self {
            AlgorithmChoice::WelshPowell => Some(Algorithm::WelshPowell),
            AlgorithmChoice::Dsatur => Some(Algorithm::Dsatur),
            AlgorithmChoice::Rlf => Some(Algorithm::RecursiveLargestFirst),
            AlgorithmChoice::Best => None,
        }
    }
}

/// Colour `graph` in place and report the heuristic whose result was kept.
///
/// `Best` colours a copy per heuristic and keeps the first with the fewest
/// conflicts.
pub fn color_with_choice(
    graph: &mut Graph,
    choice: AlgorithmChoice,
    kmax: u32,
) -> Result<(Algorithm, usize), ColoringError> {
    if let Some(algorithm) = choice.algorithm() {
        let conflicts = algorithm.color(graph, kmax)?;
        return Ok((algorithm, conflicts));
    }

    let [first, rest @ ..] = Algorithm::ALL;
    let mut best_graph = graph.clone();
    let mut best = (first, first.color(&mut best_graph, kmax)?);
    tracing::debug!(algorithm = first.name(), conflicts = best.1, "candidate colouring");

    for algorithm in rest {
        let mut candidate = graph.clone();
        let conflicts = algorithm.color(&mut candidate, kmax)?;
        tracing::debug!(algorithm = algorithm.name(), conflicts, "candidate colouring");
        if conflicts < best.1 {
            best = (algorithm, conflicts);
            best_graph = candidate;
        }
    }

    *graph = best_graph;
    Ok(best)
}

/// Smallest kmax guaranteeing a conflict-free greedy colouring: max degree + 1.
pub fn default_kmax(graph: &Graph) -> u32 {
    let max_degree = (0..graph.node_count())
        .map(|idx| graph.degree(idx))
        .max()
        .unwrap_or(0);
    u32::try_from(max_degree + 1).unwrap_or(u32::MAX)
}
