//! Thresholds used when deciding whether two flights conflict.

use serde::{Deserialize, Serialize};

/// Default maximum gap between two arrivals at a crossing point.
pub const DEFAULT_DEADLINE_MINUTES: i64 = 15;

/// Configuration for conflict graph construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictRules {
    /// Flights reaching a crossing point less than this many minutes apart conflict
    pub deadline_minutes: i64,
}

impl Default for ConflictRules {
    fn default() -> Self {
        Self {
            deadline_minutes: DEFAULT_DEADLINE_MINUTES,
        }
    }
}
