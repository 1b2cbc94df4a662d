//! Batch colouring challenge over a directory of evaluation graphs.

pub mod challenge;
pub mod config;
pub mod error;

pub use challenge::{
    run_attempt, select_best, solve_challenge, Attempt, ChallengeOutcome, ChallengeRunner,
    ChallengeSummary, ColoringJob,
};
pub use config::Config;
pub use error::{AttemptFailure, ChallengeError};

use tracing_subscriber::EnvFilter;

/// Levels added on top of `RUST_LOG`. The core crate logs skipped records and
/// loaded graphs.
pub const LOG_DIRECTIVES: [&str; 2] = ["skyslot_challenge=info", "skyslot_core=info"];

/// `RUST_LOG` filter extended with [`LOG_DIRECTIVES`].
pub fn env_filter() -> anyhow::Result<EnvFilter> {
    let mut filter = EnvFilter::from_default_env();
    for directive in LOG_DIRECTIVES {
        filter = filter.add_directive(directive.parse()?);
    }
    Ok(filter)
}
