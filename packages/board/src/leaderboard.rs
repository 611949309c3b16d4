use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use common::case::{Case, CaseType};
use common::code::CodeType;
use common::resource::Resource;
use common::submission::Submission;

use crate::data::ProgramData;
use crate::join::{ColumnKey, ResultIndex};
use crate::metric::{MetricDescriptor, MetricKind, build_metric_catalog};
use crate::selection::Selection;

/// Filter parameters for one leaderboard computation, owned by the
/// presentation layer and passed in on every recomputation.
#[derive(Clone, Debug)]
pub struct LeaderboardQuery {
    pub case_type: CaseType,
    pub case_selection: Selection,
    pub metric_selection: Selection,
}

impl LeaderboardQuery {
    /// Unfiltered leaderboard for one case type.
    pub fn for_case_type(case_type: CaseType) -> Self {
        Self {
            case_type,
            case_selection: Selection::All,
            metric_selection: Selection::All,
        }
    }
}

/// One ranked row: a user's most recent submission.
#[derive(Clone, Debug, Serialize)]
pub struct LeaderboardRow {
    /// 1-based position after sorting. Equal scores get consecutive ranks,
    /// never a shared rank.
    pub rank: u32,
    pub user: String,
    /// Resource ID of the submission backing this row.
    pub submission_id: String,
    /// Display name of the submitted algorithm, or the raw `algo_id` when
    /// no matching code exists.
    pub algorithm: String,
    pub submission_time: DateTime<Utc>,
    /// Ranking scalar: the cell of the first selected case and the first
    /// score-kind metric. `None` sorts after every defined score.
    pub final_score: Option<f64>,
    /// Sparse per-(case, metric) cells. A case's cells are present only
    /// when the submission has an execution result for that case: a score
    /// cannot exist without an execution having run.
    pub cells: BTreeMap<ColumnKey, f64>,
}

/// Leaderboard output: ranked rows plus the case and metric columns
/// actually present after filtering (which can legitimately be narrower
/// than requested).
#[derive(Clone, Debug, Serialize)]
pub struct Leaderboard {
    pub rows: Vec<LeaderboardRow>,
    pub cases: Vec<Resource<Case>>,
    pub metrics: Vec<MetricDescriptor>,
}

/// Reduce the program's submissions to one ranked row per submitter.
pub fn compute_leaderboard(data: &ProgramData<'_>, query: &LeaderboardQuery) -> Leaderboard {
    let index = ResultIndex::new(data.executions, data.evaluations);

    let cases = data.program_cases(query.case_type, &query.case_selection);
    let metrics: Vec<MetricDescriptor> =
        build_metric_catalog(data.program_codes(CodeType::Evaluation).into_iter())
            .into_iter()
            .filter(|m| query.metric_selection.contains(m.id.as_str()))
            .collect();

    // Ranking scalar column: first selected case, first score-kind metric.
    // Not an aggregate over all cells.
    let score_column = cases.first().and_then(|case| {
        metrics
            .iter()
            .find(|m| m.kind == MetricKind::Score)
            .map(|m| ColumnKey::new(case.id(), m.id.clone()))
    });

    let algo_names: HashMap<&str, &str> = data
        .program_codes(CodeType::Algo)
        .into_iter()
        .map(|c| (c.id(), c.data.name.as_str()))
        .collect();

    let mut rows: Vec<LeaderboardRow> = latest_per_submitter(&data.program_submissions())
        .into_iter()
        .map(|submission| {
            let mut cells = BTreeMap::new();
            for case in &cases {
                // Execution gates evaluation: no execution record for the
                // case, no cells for the case.
                if index.execution(submission.id(), case.id()).is_none() {
                    continue;
                }
                for metric in &metrics {
                    if let Some(value) = index.resolve(submission.id(), case.id(), &metric.id) {
                        cells.insert(ColumnKey::new(case.id(), metric.id.clone()), value);
                    }
                }
            }
            let final_score = score_column.as_ref().and_then(|key| cells.get(key).copied());
            let algorithm = algo_names
                .get(submission.data.algo_id.as_str())
                .map(|name| (*name).to_string())
                .unwrap_or_else(|| submission.data.algo_id.clone());
            LeaderboardRow {
                rank: 0,
                user: submission.data.submitter.clone(),
                submission_id: submission.id().to_string(),
                algorithm,
                submission_time: submission.data.submission_time,
                final_score,
                cells,
            }
        })
        .collect();

    rows.sort_by(compare_rows);
    for (position, row) in rows.iter_mut().enumerate() {
        row.rank = position as u32 + 1;
    }

    debug!(
        program = %data.program.id(),
        case_type = %query.case_type,
        rows = rows.len(),
        "computed leaderboard"
    );

    Leaderboard {
        rows,
        cases: cases.into_iter().cloned().collect(),
        metrics,
    }
}

/// Each submitter's most recent submission, in first-appearance order.
///
/// Ties on `submission_time` are broken by the greater resource ID, so the
/// winner does not depend on input order.
fn latest_per_submitter<'a>(
    submissions: &[&'a Resource<Submission>],
) -> Vec<&'a Resource<Submission>> {
    let mut order: Vec<&'a str> = Vec::new();
    let mut latest: HashMap<&'a str, &'a Resource<Submission>> = HashMap::new();
    for &submission in submissions {
        let submitter = submission.data.submitter.as_str();
        match latest.entry(submitter) {
            Entry::Vacant(entry) => {
                order.push(submitter);
                entry.insert(submission);
            }
            Entry::Occupied(mut entry) => {
                let current = *entry.get();
                let newer = (submission.data.submission_time, submission.id())
                    > (current.data.submission_time, current.id());
                if newer {
                    entry.insert(submission);
                }
            }
        }
    }
    order.into_iter().map(|submitter| latest[submitter]).collect()
}

/// Defined scores descending before undefined ones; ties and the undefined
/// group by newest submission first; resource ID last so the order is total
/// and re-runs are byte-identical.
fn compare_rows(a: &LeaderboardRow, b: &LeaderboardRow) -> Ordering {
    let by_score = match (a.final_score, b.final_score) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_score
        .then_with(|| b.submission_time.cmp(&a.submission_time))
        .then_with(|| a.submission_id.cmp(&b.submission_id))
}
