use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Outcome of running the update command in one repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateStatus {
    /// Command exited with status 0
    Updated,
    /// Command ran and exited non-zero, or could not be spawned
    Failed,
    /// Directory does not exist
    Missing,
    /// Command exceeded the configured timeout and was killed
    TimedOut,
}

impl UpdateStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, UpdateStatus::Updated)
    }
}

impl fmt::Display for UpdateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UpdateStatus::Updated => "UPDATED",
            UpdateStatus::Failed => "FAILED",
            UpdateStatus::Missing => "MISSING",
            UpdateStatus::TimedOut => "TIMED OUT",
        };
        write!(f, "{}", label)
    }
}

/// Captured result for a single repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoUpdate {
    pub path: PathBuf,
    pub command: String,
    pub status: UpdateStatus,
    /// None when the process never ran or was killed
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
}

impl RepoUpdate {
    /// Result for a repository that could not be run at all
    pub fn not_run(
        path: PathBuf,
        command: String,
        status: UpdateStatus,
        message: String,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            path,
            command,
            status,
            exit_code: None,
            stdout: String::new(),
            stderr: message,
            started_at,
            duration_ms: 0,
        }
    }
}

/// Totals over one pass of the update loop
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    pub total: usize,
    pub updated: usize,
    pub failed: usize,
    pub missing: usize,
    pub timed_out: usize,
}

impl UpdateSummary {
    pub fn from_results(results: &[RepoUpdate]) -> Self {
        let mut summary = Self {
            total: results.len(),
            ..Self::default()
        };
        for result in results {
            match result.status {
                UpdateStatus::Updated => summary.updated += 1,
                UpdateStatus::Failed => summary.failed += 1,
                UpdateStatus::Missing => summary.missing += 1,
                UpdateStatus::TimedOut => summary.timed_out += 1,
            }
        }
        summary
    }

    pub fn all_succeeded(&self) -> bool {
        self.updated == self.total
    }
}

impl fmt::Display for UpdateSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Repositories: {} total, {} updated, {} failed, {} missing, {} timed out",
            self.total, self.updated, self.failed, self.missing, self.timed_out
        )
    }
}
