use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of running a submission against one case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Success,
    Failed,
    Timeout,
}

impl ExecutionStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Timeout => "timeout",
        }
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record of running a submission against a case, independent of scoring.
///
/// At most one exists per `(submission_id, case_id)` pair; a duplicate is an
/// upstream data-integrity bug, not a supported state. Results are not
/// independently revisioned, so they carry no resource metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub submission_id: String,
    pub case_id: String,
    /// Wall-clock time in seconds.
    pub wall_time: f64,
    /// CPU time in seconds.
    pub cpu_time: f64,
    /// Peak memory in megabytes.
    pub memory: f64,
    pub status: ExecutionStatus,
    pub log_url: Option<String>,
    pub artifact_url: Option<String>,
}

/// Record of scoring a submission's output on a case with one evaluation
/// code. At most one exists per `(submission_id, case_id, eval_code_id)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub submission_id: String,
    pub case_id: String,
    /// Resource ID of the evaluation code that produced the score.
    pub eval_code_id: String,
    /// Score in `[0, 1]`.
    pub score: f64,
    pub evaluated_at: DateTime<Utc>,
}
