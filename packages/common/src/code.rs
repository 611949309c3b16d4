use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Role of a code resource within a program.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeType {
    /// Competitor-authored algorithm, referenced by submissions.
    Algo,
    /// Scoring code; each evaluation code defines one score metric.
    Evaluation,
    /// Organizer-provided example code.
    Sample,
}

impl CodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Algo => "algo",
            Self::Evaluation => "evaluation",
            Self::Sample => "sample",
        }
    }
}

impl fmt::Display for CodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CodeType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "algo" => Ok(Self::Algo),
            "evaluation" => Ok(Self::Evaluation),
            "sample" => Ok(Self::Sample),
            other => Err(AppError::Validation(format!(
                "Invalid code type '{other}'. Valid values: algo, evaluation, sample"
            ))),
        }
    }
}

/// A versioned piece of code attached to a program.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Code {
    pub name: String,
    pub description: String,
    /// Repository the code lives in.
    pub gitlab_url: String,
    /// Commit the current revision points at.
    pub commit_hash: String,
    pub code_type: CodeType,
}
