use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

use common::results::{EvaluationResult, ExecutionResult};

use crate::metric::MetricId;

/// Address of one dynamic row cell: a `(case, metric)` pair.
///
/// Serializes as the flat `"{case_id}_{metric_id}"` key the rendering layer
/// uses for its dynamic columns.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnKey {
    pub case_id: String,
    pub metric_id: MetricId,
}

impl ColumnKey {
    pub fn new(case_id: impl Into<String>, metric_id: MetricId) -> Self {
        Self {
            case_id: case_id.into(),
            metric_id,
        }
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.case_id, self.metric_id)
    }
}

impl Serialize for ColumnKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Hash indexes over execution and evaluation results, built once per
/// aggregation pass so each cell lookup is O(1) instead of a linear scan.
///
/// At most one execution result exists per `(submission, case)` and one
/// evaluation result per `(submission, case, eval code)`. On duplicate
/// input, an upstream data-integrity bug, the first occurrence stays
/// authoritative.
pub struct ResultIndex<'a> {
    executions: HashMap<(&'a str, &'a str), &'a ExecutionResult>,
    evaluations: HashMap<(&'a str, &'a str, &'a str), &'a EvaluationResult>,
}

impl<'a> ResultIndex<'a> {
    pub fn new(executions: &'a [ExecutionResult], evaluations: &'a [EvaluationResult]) -> Self {
        let mut exec_index = HashMap::with_capacity(executions.len());
        for result in executions {
            exec_index
                .entry((result.submission_id.as_str(), result.case_id.as_str()))
                .or_insert(result);
        }
        let mut eval_index = HashMap::with_capacity(evaluations.len());
        for result in evaluations {
            eval_index
                .entry((
                    result.submission_id.as_str(),
                    result.case_id.as_str(),
                    result.eval_code_id.as_str(),
                ))
                .or_insert(result);
        }
        Self {
            executions: exec_index,
            evaluations: eval_index,
        }
    }

    /// The execution result for a `(submission, case)` pair, if any.
    pub fn execution(&self, submission_id: &str, case_id: &str) -> Option<&'a ExecutionResult> {
        self.executions.get(&(submission_id, case_id)).copied()
    }

    /// Resolve the scalar value of one metric for a `(submission, case)`
    /// pair.
    ///
    /// `None` means the value is not available yet (never executed, or never
    /// evaluated with that code). Consumers render it as a placeholder,
    /// never as zero.
    pub fn resolve(&self, submission_id: &str, case_id: &str, metric: &MetricId) -> Option<f64> {
        match metric {
            MetricId::Score(eval_code_id) => self
                .evaluations
                .get(&(submission_id, case_id, eval_code_id.as_str()))
                .map(|r| r.score),
            MetricId::WallTime => self.execution(submission_id, case_id).map(|r| r.wall_time),
            MetricId::CpuTime => self.execution(submission_id, case_id).map(|r| r.cpu_time),
            MetricId::Memory => self.execution(submission_id, case_id).map(|r| r.memory),
        }
    }
}
