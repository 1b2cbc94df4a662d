//! Challenge runner errors.

use std::time::Duration;

use skyslot_core::{ColoringError, ExportError, SourceError};
use thiserror::Error;

/// Why a single heuristic attempt produced no result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptFailure {
    #[error("timed out after {0:?}")]
    TimedOut(Duration),
    #[error(transparent)]
    Coloring(#[from] ColoringError),
    #[error("worker aborted: {0}")]
    Aborted(String),
    #[error("no attempt was scheduled")]
    NotScheduled,
}

#[derive(Debug, Error)]
pub enum ChallengeError {
    #[error("graph {graph} has no kmax")]
    MissingKmax { graph: String },
    #[error("every attempt on {graph} failed, last: {source}")]
    AllAttemptsFailed {
        graph: String,
        #[source]
        source: AttemptFailure,
    },
    #[error(transparent)]
    Load(#[from] SourceError),
    #[error(transparent)]
    Export(#[from] ExportError),
}
