//! Colour a graph file and optionally export the colouring and statistics.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use skyslot_cli::{color_with_choice, init_tracing, AlgorithmChoice};
use skyslot_core::{export_coloring, export_stats, load_graph_from_path, GraphStats};

/// Colour a conflict graph
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Graph file (kmax, node count, edge lines)
    #[arg(long)]
    graph: PathBuf,

    /// Heuristic to run
    #[arg(long, value_enum, default_value_t = AlgorithmChoice::Best)]
    algorithm: AlgorithmChoice,

    /// Override the kmax read from the graph file
    #[arg(long)]
    kmax: Option<u32>,

    /// Write `id; colour` lines here
    #[arg(long)]
    coloring: Option<PathBuf>,

    /// Write the statistics row here
    #[arg(long)]
    stats: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_tracing()?;
    let args = Args::parse();

    let mut graph = load_graph_from_path(&args.graph)
        .with_context(|| format!("loading graph from {}", args.graph.display()))?;
    if let Some(kmax) = args.kmax {
        graph.set_kmax(kmax);
    }
    let kmax = graph
        .kmax()
        .context("graph file carries no kmax and none was given")?;

    let (algorithm, conflicts) =
        color_with_choice(&mut graph, args.algorithm, kmax).context("colouring graph")?;
    println!("{}: {} conflict(s) with {} (kmax {})", graph.name(), conflicts, algorithm, kmax);

    if let Some(path) = &args.coloring {
        export_coloring(&graph, path)
            .with_context(|| format!("writing colouring to {}", path.display()))?;
    }
    if let Some(path) = &args.stats {
        export_stats(&GraphStats::compute(&graph), path)
            .with_context(|| format!("writing statistics to {}", path.display()))?;
    }
    Ok(())
}
