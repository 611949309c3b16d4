//! End-to-end tests for the aggregation engine over small fixture programs.

use chrono::{DateTime, TimeZone, Utc};

use board::chart::{ChartKind, ChartQuery, project_chart_series};
use board::data::ProgramData;
use board::history::compute_submission_rows;
use board::join::ColumnKey;
use board::leaderboard::{LeaderboardQuery, compute_leaderboard};
use board::metric::{MetricId, build_metric_catalog};
use board::selection::Selection;
use common::case::{Case, CaseType};
use common::code::{Code, CodeType};
use common::program::Program;
use common::resource::{Resource, ResourceMeta};
use common::results::{EvaluationResult, ExecutionResult, ExecutionStatus};
use common::submission::{Submission, SubmissionStatus};

fn meta(resource_id: &str, time: DateTime<Utc>) -> ResourceMeta {
    ResourceMeta {
        creator: "admin".into(),
        created_time: time,
        updater: "admin".into(),
        updated_time: time,
        resource_id: resource_id.into(),
        revision_id: format!("{resource_id}-r1"),
    }
}

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, hour, 0, 0).unwrap()
}

/// A small owned program with builder methods; `data()` yields the borrowed
/// view the engine consumes.
struct Fixture {
    program: Resource<Program>,
    cases: Vec<Resource<Case>>,
    codes: Vec<Resource<Code>>,
    submissions: Vec<Resource<Submission>>,
    executions: Vec<ExecutionResult>,
    evaluations: Vec<EvaluationResult>,
}

impl Fixture {
    fn new() -> Self {
        Self {
            program: Resource {
                meta: meta("P1", at(0)),
                data: Program {
                    name: "test program".into(),
                    description: String::new(),
                    case_ids: Vec::new(),
                    code_ids: Vec::new(),
                },
            },
            cases: Vec::new(),
            codes: Vec::new(),
            submissions: Vec::new(),
            executions: Vec::new(),
            evaluations: Vec::new(),
        }
    }

    fn case(mut self, id: &str, case_type: CaseType) -> Self {
        self.program.data.case_ids.push(id.into());
        self.cases.push(Resource {
            meta: meta(id, at(0)),
            data: Case {
                dataset_revision_id: "D1-r1".into(),
                case_type,
                name: id.into(),
                description: String::new(),
            },
        });
        self
    }

    fn code(mut self, id: &str, name: &str, code_type: CodeType) -> Self {
        self.program.data.code_ids.push(id.into());
        self.codes.push(Resource {
            meta: meta(id, at(0)),
            data: Code {
                name: name.into(),
                description: String::new(),
                gitlab_url: String::new(),
                commit_hash: "deadbeef".into(),
                code_type,
            },
        });
        self
    }

    fn submission(mut self, id: &str, submitter: &str, algo_id: &str, hour: u32) -> Self {
        self.submissions.push(Resource {
            meta: meta(id, at(hour)),
            data: Submission {
                program_id: "P1".into(),
                algo_id: algo_id.into(),
                submitter: submitter.into(),
                submission_time: at(hour),
                status: SubmissionStatus::Success,
            },
        });
        self
    }

    fn execution(mut self, submission_id: &str, case_id: &str, wall_time: f64) -> Self {
        self.executions.push(ExecutionResult {
            submission_id: submission_id.into(),
            case_id: case_id.into(),
            wall_time,
            cpu_time: wall_time * 0.8,
            memory: 256.0,
            status: ExecutionStatus::Success,
            log_url: None,
            artifact_url: None,
        });
        self
    }

    fn evaluation(
        mut self,
        submission_id: &str,
        case_id: &str,
        eval_code_id: &str,
        score: f64,
    ) -> Self {
        self.evaluations.push(EvaluationResult {
            submission_id: submission_id.into(),
            case_id: case_id.into(),
            eval_code_id: eval_code_id.into(),
            score,
            evaluated_at: at(23),
        });
        self
    }

    fn data(&self) -> ProgramData<'_> {
        ProgramData {
            program: &self.program,
            cases: &self.cases,
            codes: &self.codes,
            submissions: &self.submissions,
            executions: &self.executions,
            evaluations: &self.evaluations,
        }
    }
}

/// Two users, one case, one metric: ranks follow the score.
fn two_user_fixture() -> Fixture {
    Fixture::new()
        .case("C1", CaseType::OpenData)
        .code("E1", "Accuracy", CodeType::Evaluation)
        .code("A1", "alice-net", CodeType::Algo)
        .code("A2", "bob-tree", CodeType::Algo)
        .submission("S1", "alice", "A1", 9)
        .submission("S2", "bob", "A2", 10)
        .execution("S1", "C1", 2.0)
        .execution("S2", "C1", 3.0)
        .evaluation("S1", "C1", "E1", 0.8)
        .evaluation("S2", "C1", "E1", 0.6)
}

#[test]
fn test_two_user_final_score_ranking() {
    let fixture = two_user_fixture();
    let query = LeaderboardQuery {
        case_type: CaseType::OpenData,
        case_selection: Selection::from_ids(["C1"]),
        metric_selection: Selection::from_ids(["E1"]),
    };
    let board = compute_leaderboard(&fixture.data(), &query);

    assert_eq!(board.rows.len(), 2);
    assert_eq!(board.rows[0].rank, 1);
    assert_eq!(board.rows[0].user, "alice");
    assert_eq!(board.rows[0].final_score, Some(0.8));
    assert_eq!(board.rows[0].algorithm, "alice-net");
    assert_eq!(board.rows[1].rank, 2);
    assert_eq!(board.rows[1].user, "bob");
    assert_eq!(board.rows[1].final_score, Some(0.6));
}

#[test]
fn test_most_recent_submission_wins_regardless_of_order() {
    let base = || {
        Fixture::new()
            .case("C1", CaseType::OpenData)
            .code("E1", "Accuracy", CodeType::Evaluation)
            .code("A1", "first-try", CodeType::Algo)
            .code("A2", "second-try", CodeType::Algo)
            .execution("S1", "C1", 2.0)
            .execution("S2", "C1", 2.0)
            .evaluation("S1", "C1", "E1", 0.9)
            .evaluation("S2", "C1", "E1", 0.4)
    };
    let ascending = base().submission("S1", "alice", "A1", 9).submission("S2", "alice", "A2", 17);
    let descending = base().submission("S2", "alice", "A2", 17).submission("S1", "alice", "A1", 9);

    let query = LeaderboardQuery::for_case_type(CaseType::OpenData);
    for fixture in [ascending, descending] {
        let board = compute_leaderboard(&fixture.data(), &query);
        assert_eq!(board.rows.len(), 1);
        // The later (worse-scoring) submission is the one on the board.
        assert_eq!(board.rows[0].submission_id, "S2");
        assert_eq!(board.rows[0].algorithm, "second-try");
        assert_eq!(board.rows[0].submission_time, at(17));
        assert_eq!(board.rows[0].final_score, Some(0.4));
    }
}

#[test]
fn test_rank_monotonicity_and_undefined_scores_last() {
    let fixture = Fixture::new()
        .case("C1", CaseType::OpenData)
        .code("E1", "Accuracy", CodeType::Evaluation)
        .submission("S1", "alice", "A1", 9)
        .submission("S2", "bob", "A2", 10)
        .submission("S3", "carol", "A3", 11)
        .submission("S4", "dave", "A4", 12)
        .execution("S1", "C1", 2.0)
        .execution("S2", "C1", 2.0)
        .evaluation("S1", "C1", "E1", 0.7)
        .evaluation("S2", "C1", "E1", 0.7);
    // carol and dave never ran on C1: no final score.

    let board = compute_leaderboard(
        &fixture.data(),
        &LeaderboardQuery::for_case_type(CaseType::OpenData),
    );

    assert_eq!(board.rows.len(), 4);
    for pair in board.rows.windows(2) {
        assert!(pair[0].rank < pair[1].rank);
        if let (Some(a), Some(b)) = (pair[0].final_score, pair[1].final_score) {
            assert!(a >= b);
        }
        // No defined score may follow an undefined one.
        assert!(!(pair[0].final_score.is_none() && pair[1].final_score.is_some()));
    }
    assert_eq!(board.rows.iter().map(|r| r.rank).collect::<Vec<_>>(), [1, 2, 3, 4]);
    // Equal 0.7 scores tie-break on newer submission; the undefined group
    // also orders newest first.
    assert_eq!(board.rows[0].user, "bob");
    assert_eq!(board.rows[1].user, "alice");
    assert_eq!(board.rows[2].user, "dave");
    assert_eq!(board.rows[3].user, "carol");
}

#[test]
fn test_empty_selection_equals_explicit_full_selection() {
    let fixture = two_user_fixture();
    let implicit = compute_leaderboard(
        &fixture.data(),
        &LeaderboardQuery::for_case_type(CaseType::OpenData),
    );
    let explicit = compute_leaderboard(
        &fixture.data(),
        &LeaderboardQuery {
            case_type: CaseType::OpenData,
            case_selection: Selection::from_ids(["C1"]),
            metric_selection: Selection::from_ids([
                "E1",
                "wall_time",
                "cpu_time",
                "memory",
            ]),
        },
    );

    assert_eq!(
        serde_json::to_value(&implicit).unwrap(),
        serde_json::to_value(&explicit).unwrap()
    );
}

#[test]
fn test_unmatched_selection_ids_have_no_effect() {
    let fixture = two_user_fixture();
    let board = compute_leaderboard(
        &fixture.data(),
        &LeaderboardQuery {
            case_type: CaseType::OpenData,
            case_selection: Selection::from_ids(["C1", "no-such-case"]),
            metric_selection: Selection::All,
        },
    );
    assert_eq!(board.cases.len(), 1);
    assert_eq!(board.rows.len(), 2);
}

#[test]
fn test_missing_execution_gates_evaluation() {
    // An evaluation result exists but no execution record for the case.
    let fixture = Fixture::new()
        .case("C1", CaseType::OpenData)
        .code("E1", "Accuracy", CodeType::Evaluation)
        .submission("S1", "alice", "A1", 9)
        .evaluation("S1", "C1", "E1", 0.99);

    let board = compute_leaderboard(
        &fixture.data(),
        &LeaderboardQuery::for_case_type(CaseType::OpenData),
    );

    assert_eq!(board.rows.len(), 1);
    let key = ColumnKey::new("C1", MetricId::Score("E1".into()));
    assert!(!board.rows[0].cells.contains_key(&key));
    assert_eq!(board.rows[0].final_score, None);
}

#[test]
fn test_unknown_algo_id_falls_back_to_raw_id() {
    let fixture = Fixture::new()
        .case("C1", CaseType::OpenData)
        .code("E1", "Accuracy", CodeType::Evaluation)
        .submission("S1", "alice", "ghost-algo", 9);

    let board = compute_leaderboard(
        &fixture.data(),
        &LeaderboardQuery::for_case_type(CaseType::OpenData),
    );
    assert_eq!(board.rows[0].algorithm, "ghost-algo");
}

#[test]
fn test_leaderboard_is_deterministic() {
    let fixture = two_user_fixture();
    let query = LeaderboardQuery::for_case_type(CaseType::OpenData);
    let first = serde_json::to_string(&compute_leaderboard(&fixture.data(), &query)).unwrap();
    let second = serde_json::to_string(&compute_leaderboard(&fixture.data(), &query)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_empty_submissions_yield_empty_rows() {
    let fixture = Fixture::new()
        .case("C1", CaseType::OpenData)
        .code("E1", "Accuracy", CodeType::Evaluation);
    let board = compute_leaderboard(
        &fixture.data(),
        &LeaderboardQuery::for_case_type(CaseType::OpenData),
    );
    assert!(board.rows.is_empty());
    assert_eq!(board.cases.len(), 1);
}

#[test]
fn test_case_type_with_no_cases_yields_empty_echo_list() {
    let fixture = two_user_fixture();
    let board = compute_leaderboard(
        &fixture.data(),
        &LeaderboardQuery::for_case_type(CaseType::CloseExam),
    );
    assert!(board.cases.is_empty());
    assert_eq!(board.rows.len(), 2);
    assert!(board.rows.iter().all(|r| r.final_score.is_none()));
}

#[test]
fn test_leaderboard_cells_serialize_under_flat_keys() {
    let fixture = two_user_fixture();
    let board = compute_leaderboard(
        &fixture.data(),
        &LeaderboardQuery::for_case_type(CaseType::OpenData),
    );
    let json = serde_json::to_value(&board).unwrap();
    let cells = &json["rows"][0]["cells"];
    assert_eq!(cells["C1_E1"], 0.8);
    assert_eq!(cells["C1_wall_time"], 2.0);
}

#[test]
fn test_history_keeps_one_row_per_submission() {
    let fixture = Fixture::new()
        .case("C1", CaseType::OpenData)
        .code("E1", "Accuracy", CodeType::Evaluation)
        .submission("S1", "alice", "A1", 9)
        .submission("S2", "alice", "A1", 17)
        .execution("S1", "C1", 2.0)
        .evaluation("S1", "C1", "E1", 0.8)
        // S2 was evaluated but its execution record is missing: history
        // cells are not gated, so the score still shows.
        .evaluation("S2", "C1", "E1", 0.9);
    let data = fixture.data();

    let submissions = data.program_submissions();
    let cases = data.all_program_cases(&Selection::All);
    let metrics = build_metric_catalog(data.program_codes(CodeType::Evaluation).into_iter());

    let rows = compute_submission_rows(
        &submissions,
        data.executions,
        data.evaluations,
        &cases,
        &metrics,
    );

    assert_eq!(rows.len(), 2);
    let score_key = ColumnKey::new("C1", MetricId::Score("E1".into()));
    assert_eq!(rows[0].cells.get(&score_key), Some(&0.8));
    assert_eq!(rows[1].cells.get(&score_key), Some(&0.9));
    // Raw execution payload rides along for the status badge.
    assert_eq!(
        rows[0].executions.get("C1").map(|e| e.status),
        Some(ExecutionStatus::Success)
    );
    assert!(rows[1].executions.get("C1").is_none());
}

#[test]
fn test_trend_chart_excludes_missing_and_keeps_indices() {
    let fixture = Fixture::new()
        .case("C1", CaseType::OpenData)
        .code("E1", "Accuracy", CodeType::Evaluation)
        .submission("S1", "alice", "A1", 9)
        .submission("S2", "alice", "A1", 10)
        .submission("S3", "alice", "A1", 11)
        .execution("S1", "C1", 2.0)
        .execution("S3", "C1", 2.0)
        .evaluation("S1", "C1", "E1", 0.5)
        .evaluation("S3", "C1", "E1", 0.7);
    let data = fixture.data();

    let series = project_chart_series(
        &data.program_submissions(),
        data.executions,
        data.evaluations,
        &ChartQuery {
            kind: ChartKind::Trend,
            case_id: "C1".into(),
            metric_x: MetricId::WallTime,
            metric_y: MetricId::Score("E1".into()),
        },
    );

    assert_eq!(series.points.len(), 2);
    assert_eq!(series.points[0].x, 1.0);
    assert_eq!(series.points[0].y, 0.5);
    // Submission 2 has no value; submission 3 keeps index 3.
    assert_eq!(series.points[1].x, 3.0);
    assert_eq!(series.points[1].y, 0.7);
    assert!(series.frontier.is_empty());
}

#[test]
fn test_scatter_excludes_points_missing_either_axis() {
    let fixture = Fixture::new()
        .case("C1", CaseType::OpenData)
        .code("E1", "Accuracy", CodeType::Evaluation)
        .submission("S1", "alice", "A1", 9)
        .submission("S2", "alice", "A1", 10)
        .execution("S1", "C1", 2.0)
        .execution("S2", "C1", 4.0)
        .evaluation("S1", "C1", "E1", 0.5);
    // S2 executed but was never scored: no y value.
    let data = fixture.data();

    let series = project_chart_series(
        &data.program_submissions(),
        data.executions,
        data.evaluations,
        &ChartQuery {
            kind: ChartKind::Scatter,
            case_id: "C1".into(),
            metric_x: MetricId::WallTime,
            metric_y: MetricId::Score("E1".into()),
        },
    );

    assert_eq!(series.points.len(), 1);
    assert_eq!(series.points[0].x, 2.0);
    assert_eq!(series.points[0].y, 0.5);
}

#[test]
fn test_pareto_chart_populates_frontier() {
    let fixture = Fixture::new()
        .case("C1", CaseType::OpenData)
        .code("E1", "Accuracy", CodeType::Evaluation)
        .submission("S1", "alice", "A1", 9)
        .submission("S2", "bob", "A2", 10)
        .submission("S3", "carol", "A3", 11)
        .execution("S1", "C1", 1.0)
        .execution("S2", "C1", 2.0)
        .execution("S3", "C1", 3.0)
        .evaluation("S1", "C1", "E1", 0.5)
        .evaluation("S2", "C1", "E1", 0.3)
        .evaluation("S3", "C1", "E1", 0.9);
    let data = fixture.data();

    let series = project_chart_series(
        &data.program_submissions(),
        data.executions,
        data.evaluations,
        &ChartQuery {
            kind: ChartKind::Pareto,
            case_id: "C1".into(),
            metric_x: MetricId::WallTime,
            metric_y: MetricId::Score("E1".into()),
        },
    );

    assert_eq!(series.points.len(), 3);
    assert_eq!(series.frontier.len(), 2);
    assert_eq!(series.frontier[0].y, 0.5);
    assert_eq!(series.frontier[1].y, 0.9);
}
