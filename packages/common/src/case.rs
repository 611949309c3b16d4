use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Visibility tier of a case within a program.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseType {
    /// Inputs and expected outputs are public.
    #[serde(rename = "open data")]
    OpenData,
    /// Inputs are public, expected outputs are hidden.
    #[serde(rename = "open exam")]
    OpenExam,
    /// Fully hidden evaluation case.
    #[serde(rename = "close exam")]
    CloseExam,
}

impl CaseType {
    /// All case types, in display order.
    pub const ALL: &'static [CaseType] = &[Self::OpenData, Self::OpenExam, Self::CloseExam];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenData => "open data",
            Self::OpenExam => "open exam",
            Self::CloseExam => "close exam",
        }
    }
}

impl fmt::Display for CaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open data" => Ok(Self::OpenData),
            "open exam" => Ok(Self::OpenExam),
            "close exam" => Ok(Self::CloseExam),
            other => Err(AppError::Validation(format!(
                "Invalid case type '{other}'. Valid values: open data, open exam, close exam"
            ))),
        }
    }
}

/// A named test instance within a program.
///
/// Immutable once created; referenced by resource ID from [`Program`]
/// (`case_ids`) and from execution/evaluation results (`case_id`).
///
/// [`Program`]: crate::program::Program
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Case {
    /// Revision of the dataset this case draws its data from.
    pub dataset_revision_id: String,
    pub case_type: CaseType,
    pub name: String,
    pub description: String,
}
