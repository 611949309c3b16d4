use serde::{Deserialize, Serialize};

/// A competition: the root aggregate scoping which cases and codes belong
/// together. Members are referenced by resource ID; the ID order here
/// drives column ordering in every derived view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub name: String,
    pub description: String,
    pub case_ids: Vec<String>,
    pub code_ids: Vec<String>,
}
