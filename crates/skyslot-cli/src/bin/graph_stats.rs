//! Print structural statistics of a graph file.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use skyslot_cli::init_tracing;
use skyslot_core::{load_graph_from_path, write_stats, GraphStats};

/// Show graph statistics
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Graph file (kmax, node count, edge lines)
    #[arg(long)]
    graph: PathBuf,

    /// Print JSON instead of the semicolon row
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    init_tracing()?;
    let args = Args::parse();

    let graph = load_graph_from_path(&args.graph)
        .with_context(|| format!("loading graph from {}", args.graph.display()))?;
    let stats = GraphStats::compute(&graph);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        write_stats(&stats, std::io::stdout().lock()).context("writing statistics")?;
    }
    Ok(())
}
