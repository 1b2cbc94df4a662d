//! Build a conflict graph file from airport and flight sources.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use skyslot_cli::{default_kmax, init_tracing};
use skyslot_core::{
    export_graph, load_airports_from_path, load_flights_from_path, ConflictGraphBuilder,
    DEFAULT_DEADLINE_MINUTES,
};

/// Build a flight conflict graph
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Airport source (semicolon separated, 10 fields)
    #[arg(long)]
    airports: PathBuf,

    /// Flight source (semicolon separated, 6 fields)
    #[arg(long)]
    flights: PathBuf,

    /// Minimum ETA gap in minutes between crossing flights
    #[arg(long, default_value_t = DEFAULT_DEADLINE_MINUTES)]
    deadline: i64,

    /// Colour budget written to the graph file (default: max degree + 1)
    #[arg(long)]
    kmax: Option<u32>,

    /// Output graph file
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    init_tracing()?;
    let args = Args::parse();

    let airports = load_airports_from_path(&args.airports)
        .with_context(|| format!("loading airports from {}", args.airports.display()))?;
    let flights = load_flights_from_path(&args.flights)
        .with_context(|| format!("loading flights from {}", args.flights.display()))?;

    let mut graph = ConflictGraphBuilder::new(args.deadline)
        .build(&airports, &flights)
        .context("building conflict graph")?;
    let kmax = args.kmax.unwrap_or_else(|| default_kmax(&graph));
    graph.set_kmax(kmax);

    export_graph(&graph, &args.out)
        .with_context(|| format!("writing graph to {}", args.out.display()))?;

    println!(
        "{} flights, {} conflicts, kmax {} -> {}",
        graph.node_count(),
        graph.edge_count(),
        kmax,
        args.out.display()
    );
    Ok(())
}
