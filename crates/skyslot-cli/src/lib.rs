//! Skyslot CLI - command line tools over the core crate.
//!
//! Binaries:
//! - build_graph: flight schedule to conflict graph file
//! - color_graph: colour a graph file with one heuristic or the best of all
//! - graph_stats: structural statistics of a graph file

pub mod coloring;

pub use coloring::{color_with_choice, default_kmax, AlgorithmChoice};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Levels added on top of `RUST_LOG`, so core warnings (skipped records)
/// reach stderr by default.
pub const LOG_DIRECTIVES: [&str; 2] = ["skyslot_cli=info", "skyslot_core=info"];

/// `RUST_LOG` filter extended with [`LOG_DIRECTIVES`].
pub fn env_filter() -> anyhow::Result<EnvFilter> {
    let mut filter = EnvFilter::from_default_env();
    for directive in LOG_DIRECTIVES {
        filter = filter.add_directive(directive.parse()?);
    }
    Ok(filter)
}

/// Install the fmt subscriber, honouring `RUST_LOG`.
pub fn init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(env_filter()?)
        .init();
    Ok(())
}
