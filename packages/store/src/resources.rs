use board::data::ProgramData;
use common::case::Case;
use common::code::Code;
use common::dataset::Dataset;
use common::program::Program;
use common::resource::Resource;
use common::results::{EvaluationResult, ExecutionResult};
use common::submission::Submission;

/// Owner of all resource collections for one browsing session.
///
/// Collections are populated once (by seeding here, or by an upstream write
/// API in a real deployment) and are read-only afterwards. Aggregators
/// borrow [`ProgramData`] views and never mutate; results are bare structs
/// because they are not independently revisioned.
#[derive(Clone, Debug, Default)]
pub struct ResourceStore {
    pub programs: Vec<Resource<Program>>,
    pub cases: Vec<Resource<Case>>,
    pub codes: Vec<Resource<Code>>,
    pub submissions: Vec<Resource<Submission>>,
    pub executions: Vec<ExecutionResult>,
    pub evaluations: Vec<EvaluationResult>,
    pub datasets: Vec<Resource<Dataset>>,
}

impl ResourceStore {
    /// Look up a program by resource ID.
    pub fn program(&self, id: &str) -> Option<&Resource<Program>> {
        self.programs.iter().find(|p| p.meta.resource_id == id)
    }

    /// Look up a dataset by resource ID.
    pub fn dataset(&self, id: &str) -> Option<&Resource<Dataset>> {
        self.datasets.iter().find(|d| d.meta.resource_id == id)
    }

    /// The borrowed view the aggregation engine computes from, or `None`
    /// when the program does not exist.
    pub fn program_data(&self, program_id: &str) -> Option<ProgramData<'_>> {
        Some(ProgramData {
            program: self.program(program_id)?,
            cases: &self.cases,
            codes: &self.codes,
            submissions: &self.submissions,
            executions: &self.executions,
            evaluations: &self.evaluations,
        })
    }
}
