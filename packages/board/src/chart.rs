use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use common::error::AppError;
use common::resource::Resource;
use common::results::{EvaluationResult, ExecutionResult};
use common::submission::Submission;

use crate::join::ResultIndex;
use crate::metric::{MetricId, MetricKind};

/// Chart flavors supported by the projector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// One metric over submission order.
    Trend,
    /// Two metrics against each other.
    Scatter,
    /// Scatter plus a non-dominated frontier.
    Pareto,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trend => "trend",
            Self::Scatter => "scatter",
            Self::Pareto => "pareto",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trend" => Ok(Self::Trend),
            "scatter" => Ok(Self::Scatter),
            "pareto" => Ok(Self::Pareto),
            other => Err(AppError::Validation(format!(
                "Invalid chart kind '{other}'. Valid values: trend, scatter, pareto"
            ))),
        }
    }
}

/// Axis parameters for one chart computation. The chart is always scoped to
/// a single case.
#[derive(Clone, Debug)]
pub struct ChartQuery {
    pub kind: ChartKind,
    pub case_id: String,
    /// X-axis metric. Ignored for trend charts, whose x is the 1-based
    /// submission index.
    pub metric_x: MetricId,
    /// Y-axis metric; also the trend value.
    pub metric_y: MetricId,
}

/// One plotted point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

/// Projector output. `frontier` is empty unless the query asked for a
/// Pareto chart.
#[derive(Clone, Debug, Serialize)]
pub struct ChartSeries {
    pub points: Vec<DataPoint>,
    /// Non-dominated subset in ascending-x order, ready for line rendering
    /// without re-sorting.
    pub frontier: Vec<DataPoint>,
}

/// Direction in which the frontier improves along the y axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Objective {
    Maximize,
    Minimize,
}

impl Objective {
    /// Scores improve upward; execution metrics (time, memory) improve
    /// downward.
    pub fn for_metric(kind: MetricKind) -> Self {
        match kind {
            MetricKind::Score => Self::Maximize,
            MetricKind::Execution => Self::Minimize,
        }
    }
}

/// Project submissions into a chart series for one case.
///
/// Points with a missing axis value are excluded, never plotted as zero;
/// trend points keep the index of their original submission-order position
/// even when earlier points are excluded.
pub fn project_chart_series(
    submissions: &[&Resource<Submission>],
    executions: &[ExecutionResult],
    evaluations: &[EvaluationResult],
    query: &ChartQuery,
) -> ChartSeries {
    let index = ResultIndex::new(executions, evaluations);

    let points: Vec<DataPoint> = match query.kind {
        ChartKind::Trend => submissions
            .iter()
            .enumerate()
            .filter_map(|(position, submission)| {
                index
                    .resolve(submission.id(), &query.case_id, &query.metric_y)
                    .map(|value| DataPoint {
                        x: (position + 1) as f64,
                        y: value,
                    })
            })
            .collect(),
        ChartKind::Scatter | ChartKind::Pareto => submissions
            .iter()
            .filter_map(|submission| {
                let x = index.resolve(submission.id(), &query.case_id, &query.metric_x)?;
                let y = index.resolve(submission.id(), &query.case_id, &query.metric_y)?;
                Some(DataPoint { x, y })
            })
            .collect(),
    };

    let frontier = match query.kind {
        ChartKind::Pareto => {
            pareto_frontier(&points, Objective::for_metric(query.metric_y.kind()))
        }
        _ => Vec::new(),
    };

    ChartSeries { points, frontier }
}

/// Extract the Pareto frontier: scan points in ascending-x order and keep
/// each point whose y strictly improves on the best seen so far. Points
/// that merely equal the running best are dominated and excluded.
pub fn pareto_frontier(points: &[DataPoint], objective: Objective) -> Vec<DataPoint> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x));

    let mut frontier = Vec::new();
    let mut best: Option<f64> = None;
    for point in sorted {
        let improves = match (objective, best) {
            (_, None) => true,
            (Objective::Maximize, Some(best)) => point.y > best,
            (Objective::Minimize, Some(best)) => point.y < best,
        };
        if improves {
            best = Some(point.y);
            frontier.push(point);
        }
    }
    frontier
}
