use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use common::case::Case;
use common::resource::Resource;
use common::results::{EvaluationResult, ExecutionResult};
use common::submission::{Submission, SubmissionStatus};

use crate::join::{ColumnKey, ResultIndex};
use crate::metric::MetricDescriptor;

/// One row of a user's submission history.
///
/// Unlike the leaderboard there is no per-user reduction: every submission
/// gets a row, and no rank is computed. Display order is the caller's
/// concern; rows come back in input order (seed data is chronologically
/// ascending).
#[derive(Clone, Debug, Serialize)]
pub struct SubmissionRow {
    pub submission_id: String,
    pub submitter: String,
    pub submission_time: DateTime<Utc>,
    pub status: SubmissionStatus,
    /// Per-(case, metric) values resolved through the join engine.
    pub cells: BTreeMap<ColumnKey, f64>,
    /// Raw execution result per case, keyed by case ID. Feeds the
    /// status-badge column, which the scalar cell interface cannot express.
    pub executions: BTreeMap<String, ExecutionResult>,
}

/// Build one row per submission over the given case and metric columns.
///
/// The caller restricts `submissions` to the user whose history is shown
/// and pre-filters `cases` and `metrics` to the selected columns.
pub fn compute_submission_rows(
    submissions: &[&Resource<Submission>],
    executions: &[ExecutionResult],
    evaluations: &[EvaluationResult],
    cases: &[&Resource<Case>],
    metrics: &[MetricDescriptor],
) -> Vec<SubmissionRow> {
    let index = ResultIndex::new(executions, evaluations);

    submissions
        .iter()
        .map(|submission| {
            let mut cells = BTreeMap::new();
            let mut per_case_executions = BTreeMap::new();
            for case in cases {
                for metric in metrics {
                    if let Some(value) = index.resolve(submission.id(), case.id(), &metric.id) {
                        cells.insert(ColumnKey::new(case.id(), metric.id.clone()), value);
                    }
                }
                if let Some(result) = index.execution(submission.id(), case.id()) {
                    per_case_executions.insert(case.id().to_string(), result.clone());
                }
            }
            SubmissionRow {
                submission_id: submission.id().to_string(),
                submitter: submission.data.submitter.clone(),
                submission_time: submission.data.submission_time,
                status: submission.data.status,
                cells,
                executions: per_case_executions,
            }
        })
        .collect()
}
