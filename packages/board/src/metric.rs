use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use common::code::Code;
use common::resource::Resource;

/// Fixed synthetic ID of the wall-time execution metric.
pub const WALL_TIME_ID: &str = "wall_time";
/// Fixed synthetic ID of the CPU-time execution metric.
pub const CPU_TIME_ID: &str = "cpu_time";
/// Fixed synthetic ID of the memory execution metric.
pub const MEMORY_ID: &str = "memory";

/// Identifier of a metric column or chart axis.
///
/// Score metrics are keyed by the resource ID of the evaluation code that
/// produces them; the three execution metrics have fixed synthetic IDs that
/// are never persisted. Both kinds are treated uniformly by every view.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetricId {
    /// Score produced by the evaluation code with this resource ID.
    Score(String),
    WallTime,
    CpuTime,
    Memory,
}

/// Whether a metric comes from an evaluation code or from execution
/// telemetry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Score,
    Execution,
}

impl MetricId {
    pub fn kind(&self) -> MetricKind {
        match self {
            Self::Score(_) => MetricKind::Score,
            _ => MetricKind::Execution,
        }
    }

    /// Wire representation: the eval code ID for score metrics, the fixed
    /// synthetic ID otherwise.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Score(id) => id,
            Self::WallTime => WALL_TIME_ID,
            Self::CpuTime => CPU_TIME_ID,
            Self::Memory => MEMORY_ID,
        }
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricId {
    type Err = std::convert::Infallible;

    /// Any ID that is not one of the three fixed execution-metric IDs is
    /// read as an eval code ID.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            WALL_TIME_ID => Self::WallTime,
            CPU_TIME_ID => Self::CpuTime,
            MEMORY_ID => Self::Memory,
            other => Self::Score(other.to_string()),
        })
    }
}

impl Serialize for MetricId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MetricId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// Uniform descriptor consumed by table columns and chart axes alike.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MetricDescriptor {
    pub id: MetricId,
    pub name: String,
    pub kind: MetricKind,
}

/// The three fixed execution metrics, in catalog order.
pub fn execution_metrics() -> [MetricDescriptor; 3] {
    [
        MetricDescriptor {
            id: MetricId::WallTime,
            name: "Wall time (s)".into(),
            kind: MetricKind::Execution,
        },
        MetricDescriptor {
            id: MetricId::CpuTime,
            name: "CPU time (s)".into(),
            kind: MetricKind::Execution,
        },
        MetricDescriptor {
            id: MetricId::Memory,
            name: "Memory (MB)".into(),
            kind: MetricKind::Execution,
        },
    ]
}

/// Build the metric catalog for a program: one score metric per evaluation
/// code, in input order, followed by the three fixed execution metrics.
/// The ordering is load-bearing: column layout and the leaderboard's
/// ranking scalar both depend on it.
pub fn build_metric_catalog<'a, I>(eval_codes: I) -> Vec<MetricDescriptor>
where
    I: IntoIterator<Item = &'a Resource<Code>>,
{
    let mut catalog: Vec<MetricDescriptor> = eval_codes
        .into_iter()
        .map(|code| MetricDescriptor {
            id: MetricId::Score(code.meta.resource_id.clone()),
            name: code.data.name.clone(),
            kind: MetricKind::Score,
        })
        .collect();
    catalog.extend(execution_metrics());
    catalog
}
