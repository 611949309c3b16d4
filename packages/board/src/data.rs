use common::case::{Case, CaseType};
use common::code::{Code, CodeType};
use common::program::Program;
use common::resource::Resource;
use common::results::{EvaluationResult, ExecutionResult};
use common::submission::Submission;

use crate::selection::Selection;

/// Read-only view over the collections a program's derived views are
/// computed from.
///
/// Borrowed from the store for the duration of one aggregation call;
/// aggregators own only their transient outputs and never mutate the
/// collections. Member lookups scan linearly: program case/code lists are
/// short, and only result lookups are hot enough to warrant an index
/// (see [`ResultIndex`](crate::join::ResultIndex)).
#[derive(Clone, Copy)]
pub struct ProgramData<'a> {
    pub program: &'a Resource<Program>,
    pub cases: &'a [Resource<Case>],
    pub codes: &'a [Resource<Code>],
    pub submissions: &'a [Resource<Submission>],
    pub executions: &'a [ExecutionResult],
    pub evaluations: &'a [EvaluationResult],
}

impl<'a> ProgramData<'a> {
    /// Codes of one type belonging to the program, in `code_ids` order.
    /// IDs matching no known code are skipped.
    pub fn program_codes(&self, code_type: CodeType) -> Vec<&'a Resource<Code>> {
        self.program
            .data
            .code_ids
            .iter()
            .filter_map(|id| self.codes.iter().find(|c| c.meta.resource_id == *id))
            .filter(|c| c.data.code_type == code_type)
            .collect()
    }

    /// Cases of the program with the given case type, in `case_ids` order,
    /// restricted by `selection`.
    pub fn program_cases(&self, case_type: CaseType, selection: &Selection) -> Vec<&'a Resource<Case>> {
        self.all_program_cases(selection)
            .into_iter()
            .filter(|c| c.data.case_type == case_type)
            .collect()
    }

    /// Cases of the program across all case types, in `case_ids` order,
    /// restricted by `selection`.
    pub fn all_program_cases(&self, selection: &Selection) -> Vec<&'a Resource<Case>> {
        self.program
            .data
            .case_ids
            .iter()
            .filter(|id| selection.contains(id))
            .filter_map(|id| self.cases.iter().find(|c| c.meta.resource_id == *id))
            .collect()
    }

    /// Submissions made to the program, in collection order.
    pub fn program_submissions(&self) -> Vec<&'a Resource<Submission>> {
        self.submissions
            .iter()
            .filter(|s| s.data.program_id == self.program.meta.resource_id)
            .collect()
    }
}
