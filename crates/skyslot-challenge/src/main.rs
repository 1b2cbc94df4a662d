//! Skyslot challenge runner.
//!
//! Colours every evaluation graph with each heuristic and keeps the best.

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skyslot_challenge::{env_filter, solve_challenge, Config};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(env_filter()?)
        .init();

    let config = Config::from_env();
    tracing::info!(
        graphs = config.graph_count,
        graph_dir = %config.graph_dir.display(),
        output_dir = %config.output_dir.display(),
        timeout_secs = config.attempt_timeout.as_secs(),
        "Starting colouring challenge"
    );

    let summary = solve_challenge(&config)
        .await
        .context("challenge aborted")?;

    for (file_name, algorithm, conflicts) in &summary.solved {
        tracing::info!("{file_name}: {conflicts} conflict(s) with {algorithm}");
    }
    for (file_name, err) in &summary.failed {
        tracing::warn!("{file_name}: {err}");
    }

    if summary.solved.is_empty() && !summary.failed.is_empty() {
        anyhow::bail!("no graph could be coloured");
    }
    Ok(())
}
