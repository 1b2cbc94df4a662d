//! Competitive colouring of evaluation graphs.
//!
//! Every graph is cloned once per heuristic and each clone is coloured on a
//! blocking worker under a wall-clock deadline. An attempt that overruns is
//! cancelled and left out; among the finished attempts the lowest conflict
//! count wins, ties going to the earlier heuristic in [`Algorithm::ALL`].

use std::time::Duration;

use skyslot_core::{
    export_coloring, export_conflict_summary, load_graph_from_path, Algorithm, CancelFlag,
    ColoringError, ExportError, Graph,
};
use tokio::task::JoinSet;

use crate::config::Config;
use crate::error::{AttemptFailure, ChallengeError};

/// Work executed by one attempt on its own copy of the graph.
pub type ColoringJob =
    Box<dyn FnOnce(&mut Graph, &CancelFlag) -> Result<usize, ColoringError> + Send + 'static>;

/// Best colouring found for one source graph.
#[derive(Debug, Clone)]
pub struct ChallengeOutcome {
    pub source_file_name: String,
    pub algorithm: Algorithm,
    pub graph: Graph,
    pub conflict_count: usize,
}

/// Result of one heuristic on one graph.
#[derive(Debug)]
pub struct Attempt {
    pub algorithm: Algorithm,
    pub result: Result<(Graph, usize), AttemptFailure>,
}

#[derive(Debug, Clone)]
pub struct ChallengeRunner {
    pub attempt_timeout: Duration,
}

impl Default for ChallengeRunner {
    fn default() -> Self {
        Self {
            attempt_timeout: Duration::from_secs(25),
        }
    }
}

impl ChallengeRunner {
    pub fn new(attempt_timeout: Duration) -> Self {
        Self { attempt_timeout }
    }

    /// Colour every graph in turn. One result per input graph, in order.
    pub async fn run(&self, graphs: Vec<Graph>) -> Vec<Result<ChallengeOutcome, ChallengeError>> {
        let mut results = Vec::with_capacity(graphs.len());
        for graph in graphs {
            results.push(self.solve(&graph).await);
        }
        results
    }

    /// Race all heuristics on `graph` with the kmax it was loaded with.
    pub async fn solve(&self, graph: &Graph) -> Result<ChallengeOutcome, ChallengeError> {
        let kmax = graph.kmax().ok_or_else(|| ChallengeError::MissingKmax {
            graph: graph.name().to_string(),
        })?;

        let jobs = Algorithm::ALL
            .into_iter()
            .map(|algorithm| {
                let job: ColoringJob = Box::new(move |g: &mut Graph, cancel: &CancelFlag| {
                    algorithm.color_cancellable(g, kmax, cancel)
                });
                (algorithm, job)
            })
            .collect();

        self.solve_with(graph, jobs).await
    }

    /// Race arbitrary jobs on `graph`. `jobs` must be in priority order.
    pub async fn solve_with(
        &self,
        graph: &Graph,
        jobs: Vec<(Algorithm, ColoringJob)>,
    ) -> Result<ChallengeOutcome, ChallengeError> {
        let mut set = JoinSet::new();
        for (position, (algorithm, job)) in jobs.into_iter().enumerate() {
            let copy = graph.clone();
            let timeout = self.attempt_timeout;
            set.spawn(async move {
                (position, run_attempt(algorithm, copy, job, timeout).await)
            });
        }

        let mut attempts: Vec<Option<Attempt>> = (0..set.len()).map(|_| None).collect();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((position, attempt)) => attempts[position] = Some(attempt),
                Err(err) => tracing::error!(graph = graph.name(), "attempt task failed: {err}"),
            }
        }

        let (algorithm, best, conflict_count) = select_best(attempts.into_iter().flatten())
            .map_err(|source| ChallengeError::AllAttemptsFailed {
                graph: graph.name().to_string(),
                source,
            })?;

        tracing::info!(
            graph = graph.name(),
            algorithm = algorithm.name(),
            conflicts = conflict_count,
            "best colouring selected"
        );

        Ok(ChallengeOutcome {
            source_file_name: graph.name().to_string(),
            algorithm,
            graph: best,
            conflict_count,
        })
    }
}

/// Run `job` on a blocking worker, raising its cancel flag on timeout.
///
/// A timed-out worker keeps running until it next polls the flag; its graph is
/// dropped with it.
pub async fn run_attempt(
    algorithm: Algorithm,
    mut graph: Graph,
    job: ColoringJob,
    timeout: Duration,
) -> Attempt {
    let cancel = CancelFlag::new();
    let worker_cancel = cancel.clone();
    let handle = tokio::task::spawn_blocking(move || {
        job(&mut graph, &worker_cancel).map(|conflicts| (graph, conflicts))
    });

    let result = match tokio::time::timeout(timeout, handle).await {
        Ok(Ok(Ok(done))) => Ok(done),
        Ok(Ok(Err(err))) => Err(AttemptFailure::Coloring(err)),
        Ok(Err(join_err)) => Err(AttemptFailure::Aborted(join_err.to_string())),
        Err(_) => {
            cancel.cancel();
            Err(AttemptFailure::TimedOut(timeout))
        }
    };

    match &result {
        Ok((_, conflicts)) => {
            tracing::debug!(algorithm = algorithm.name(), conflicts, "attempt finished")
        }
        Err(AttemptFailure::TimedOut(_)) => {
            tracing::warn!(algorithm = algorithm.name(), ?timeout, "attempt timed out")
        }
        Err(err) => tracing::warn!(algorithm = algorithm.name(), "attempt failed: {err}"),
    }

    Attempt { algorithm, result }
}

/// Keep the first attempt with the strictly lowest conflict count.
///
/// Fails with the last failure seen when no attempt finished.
pub fn select_best(
    attempts: impl IntoIterator<Item = Attempt>,
) -> Result<(Algorithm, Graph, usize), AttemptFailure> {
    let mut best: Option<(Algorithm, Graph, usize)> = None;
    let mut last_failure = AttemptFailure::NotScheduled;

    for attempt in attempts {
        match attempt.result {
            Ok((graph, conflicts)) => {
                if best.as_ref().map_or(true, |(_, _, current)| conflicts < *current) {
                    best = Some((attempt.algorithm, graph, conflicts));
                }
            }
            Err(failure) => last_failure = failure,
        }
    }

    best.ok_or(last_failure)
}

/// Per-graph record of a batch run.
#[derive(Debug, Default)]
pub struct ChallengeSummary {
    /// `(file name, winning heuristic, conflicts)` for each solved graph
    pub solved: Vec<(String, Algorithm, usize)>,
    pub failed: Vec<(String, ChallengeError)>,
}

impl ChallengeSummary {
    pub fn conflict_rows(&self) -> Vec<(&str, usize)> {
        self.solved
            .iter()
            .map(|(name, _, conflicts)| (name.as_str(), *conflicts))
            .collect()
    }
}

/// Load `graph_count` evaluation graphs, colour each, and write one colouring
/// per solved graph plus the conflict summary.
///
/// Graphs that fail to load or that no heuristic finishes are recorded in the
/// summary and skipped. Export failures abort the batch.
pub async fn solve_challenge(config: &Config) -> Result<ChallengeSummary, ChallengeError> {
    std::fs::create_dir_all(&config.output_dir).map_err(|source| ExportError::Io {
        path: config.output_dir.clone(),
        source,
    })?;

    let runner = ChallengeRunner::new(config.attempt_timeout);
    let mut summary = ChallengeSummary::default();

    for index in 0..config.graph_count {
        let path = config.graph_path(index);
        let file_name = config.graph_file_name(index);

        let outcome = match load_graph_from_path(&path) {
            Ok(graph) => runner.solve(&graph).await,
            Err(err) => Err(ChallengeError::Load(err)),
        };

        match outcome {
            Ok(outcome) => {
                export_coloring(&outcome.graph, config.coloring_path(index))?;
                summary.solved.push((
                    outcome.source_file_name,
                    outcome.algorithm,
                    outcome.conflict_count,
                ));
            }
            Err(err) => {
                tracing::error!(graph = %file_name, "graph skipped: {err}");
                summary.failed.push((file_name, err));
            }
        }
    }

    export_conflict_summary(&summary.conflict_rows(), config.summary_path())?;
    tracing::info!(
        solved = summary.solved.len(),
        failed = summary.failed.len(),
        "challenge complete"
    );
    Ok(summary)
}
