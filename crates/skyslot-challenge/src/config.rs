//! Challenge configuration from environment.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding `{graph_prefix}{i}.txt`
    pub graph_dir: PathBuf,
    /// Directory receiving colourings and the summary
    pub output_dir: PathBuf,
    pub graph_count: usize,
    pub graph_prefix: String,
    pub coloring_prefix: String,
    pub summary_file: String,
    /// Wall-clock budget of each heuristic on each graph
    pub attempt_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            graph_dir: PathBuf::from("graphs"),
            output_dir: PathBuf::from("out"),
            graph_count: 20,
            graph_prefix: "graph-eval".to_string(),
            coloring_prefix: "colo-eval".to_string(),
            summary_file: "coloration-summary.csv".to_string(),
            attempt_timeout: Duration::from_secs(25),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            graph_dir: env::var("SKYSLOT_GRAPH_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.graph_dir),
            output_dir: env::var("SKYSLOT_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            graph_count: env::var("SKYSLOT_GRAPH_COUNT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.graph_count),
            graph_prefix: env::var("SKYSLOT_GRAPH_PREFIX").unwrap_or(defaults.graph_prefix),
            coloring_prefix: env::var("SKYSLOT_COLORING_PREFIX")
                .unwrap_or(defaults.coloring_prefix),
            summary_file: env::var("SKYSLOT_SUMMARY_FILE").unwrap_or(defaults.summary_file),
            attempt_timeout: env::var("SKYSLOT_ATTEMPT_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.attempt_timeout),
        }
    }

    pub fn graph_file_name(&self, index: usize) -> String {
        format!("{}{}.txt", self.graph_prefix, index)
    }

    pub fn graph_path(&self, index: usize) -> PathBuf {
        self.graph_dir.join(self.graph_file_name(index))
    }

    pub fn coloring_path(&self, index: usize) -> PathBuf {
        self.output_dir
            .join(format!("{}{}.txt", self.coloring_prefix, index))
    }

    pub fn summary_path(&self) -> PathBuf {
        self.output_dir.join(&self.summary_file)
    }
}
