//! JSON output for scripting.
//!
//! Each grouping pass becomes one [`RunReport`]; [`JsonOutput`] wraps all
//! runs of an invocation into a single document.
//!
//! # Format
//!
//! ```json
//! {
//!   "root": "images",
//!   "runs": [
//!     {
//!       "strategy": "baseline",
//!       "runtime_secs": 0.0123,
//!       "stats": { "total_files": 5, "groups": 3, ... },
//!       "summary": {
//!         "most_duplicates": { "index": 0, "representative": "...", "copies": [...], "reclaimable_bytes": 300 },
//!         "most_space": { ... }
//!       }
//!     }
//!   ]
//! }
//! ```

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::Summary;
use crate::duplicates::{GroupingStats, Strategy};

/// Result of one grouping pass.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Strategy used for grouping
    pub strategy: Strategy,
    /// Wall-clock time for listing, grouping and reporting, in seconds
    pub runtime_secs: f64,
    /// Counters from the grouping pass
    pub stats: GroupingStats,
    /// Report summaries; `null` when no files were found
    pub summary: Option<Summary>,
}

impl RunReport {
    /// Create a report for one pass.
    #[must_use]
    pub fn new(
        strategy: Strategy,
        runtime: Duration,
        stats: GroupingStats,
        summary: Option<Summary>,
    ) -> Self {
        Self {
            strategy,
            runtime_secs: runtime.as_secs_f64(),
            stats,
            summary,
        }
    }
}

/// JSON document covering every run of one invocation.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Scanned root directory
    pub root: PathBuf,
    /// One entry per strategy, in execution order
    pub runs: Vec<RunReport>,
}

impl JsonOutput {
    /// Create an empty document for `root`.
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            runs: Vec::new(),
        }
    }

    /// Append a run.
    pub fn push(&mut self, run: RunReport) {
        self.runs.push(run);
    }

    /// Serialize to compact JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
