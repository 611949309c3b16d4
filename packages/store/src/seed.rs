use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use uuid::Uuid;

use common::case::{Case, CaseType};
use common::code::{Code, CodeType};
use common::config::SeedConfig;
use common::dataset::Dataset;
use common::program::Program;
use common::resource::{Resource, ResourceMeta};
use common::results::{EvaluationResult, ExecutionResult, ExecutionStatus};
use common::submission::{Submission, SubmissionStatus};

use crate::resources::ResourceStore;

/// Mock competitors submitting to the seeded program.
const USERS: &[&str] = &["alice", "bob", "carol", "dave", "erin", "frank"];

/// Seeded cases, spread across the three visibility tiers.
const CASES: &[(&str, CaseType)] = &[
    ("case-daily-sanity", CaseType::OpenData),
    ("case-city-traffic", CaseType::OpenData),
    ("case-retail-forecast", CaseType::OpenData),
    ("case-holdout-a", CaseType::OpenExam),
    ("case-holdout-b", CaseType::OpenExam),
    ("case-hidden-final", CaseType::CloseExam),
    ("case-hidden-stress", CaseType::CloseExam),
];

/// Evaluation codes seeded into the program; each defines one score metric.
const EVAL_CODES: &[(&str, &str)] = &[
    ("eval-accuracy", "Accuracy"),
    ("eval-macro-f1", "Macro F1"),
];

/// Root datasets; each gets one derived revision in the lineage tree.
const DATASETS: &[&str] = &["sensor-grid", "city-traffic", "retail-orders"];

/// Resource ID of the seeded program.
pub const PROGRAM_ID: &str = "program-spring-challenge";

// 2026-01-05T09:00:00Z
const BASE_TIMESTAMP: i64 = 1_767_603_600;

/// Build a fully populated store from nothing but the seed configuration.
/// Same configuration, same collections, byte for byte.
pub fn seed_store(config: &SeedConfig) -> ResourceStore {
    let mut rng = StdRng::seed_from_u64(config.rng_seed);
    let base = DateTime::from_timestamp(BASE_TIMESTAMP, 0).unwrap_or_default();

    let mut store = ResourceStore::default();

    // Datasets: one root per name plus one derived revision linking back to
    // the root's revision.
    for (position, name) in DATASETS.iter().enumerate() {
        let created = base - Duration::days(30 - position as i64);
        let root = Resource {
            meta: meta(&mut rng, "admin", created, format!("dataset-{name}")),
            data: Dataset {
                name: (*name).to_string(),
                description: format!("Raw {name} collection"),
                origin_revision_id: None,
                tags: vec!["raw".into()],
            },
        };
        let derived = Resource {
            meta: meta(
                &mut rng,
                "admin",
                created + Duration::days(2),
                format!("dataset-{name}-cleaned"),
            ),
            data: Dataset {
                name: format!("{name} (cleaned)"),
                description: format!("Cleaned and normalized {name}"),
                origin_revision_id: Some(root.meta.revision_id.clone()),
                tags: vec!["cleaned".into()],
            },
        };
        store.datasets.push(root);
        store.datasets.push(derived);
    }

    // Cases draw from the derived dataset revisions, round-robin.
    for (position, (id, case_type)) in CASES.iter().enumerate() {
        let dataset = &store.datasets[(position % DATASETS.len()) * 2 + 1];
        let dataset_revision_id = dataset.meta.revision_id.clone();
        store.cases.push(Resource {
            meta: meta(&mut rng, "admin", base - Duration::days(14), (*id).to_string()),
            data: Case {
                dataset_revision_id,
                case_type: *case_type,
                name: id.trim_start_matches("case-").replace('-', " "),
                description: format!("{case_type} case over {}", dataset.data.name),
            },
        });
    }

    // Codes: one sample, the evaluation codes, one algo code per user.
    store.codes.push(code(
        &mut rng,
        "admin",
        base - Duration::days(14),
        "code-starter-kit",
        "Starter kit",
        CodeType::Sample,
    ));
    for (id, name) in EVAL_CODES {
        store.codes.push(code(
            &mut rng,
            "admin",
            base - Duration::days(14),
            id,
            name,
            CodeType::Evaluation,
        ));
    }
    for user in USERS {
        store.codes.push(code(
            &mut rng,
            user,
            base - Duration::days(7),
            &format!("algo-{user}"),
            &format!("{user}-model"),
            CodeType::Algo,
        ));
    }

    store.programs.push(Resource {
        meta: meta(&mut rng, "admin", base - Duration::days(14), PROGRAM_ID.to_string()),
        data: Program {
            name: "Spring Data Challenge 2026".into(),
            description: "Forecasting challenge over the spring sensor datasets".into(),
            case_ids: store.cases.iter().map(|c| c.id().to_string()).collect(),
            code_ids: store.codes.iter().map(|c| c.id().to_string()).collect(),
        },
    });

    // Submissions with their executions and evaluations, chronologically
    // ascending per round.
    for round in 0..config.submissions_per_user {
        for (user_index, user) in USERS.iter().enumerate() {
            let submission_id = format!("sub-{user}-{round:02}");
            let submitted = base
                + Duration::hours(6 * round as i64)
                + Duration::minutes(7 * user_index as i64);

            let mut any_failed = false;
            for case in &store.cases {
                // A slice of pairs has not been executed yet.
                if rng.random_bool(0.1) {
                    continue;
                }
                let status = match rng.random_range(0..100) {
                    0..=84 => ExecutionStatus::Success,
                    85..=94 => ExecutionStatus::Failed,
                    _ => ExecutionStatus::Timeout,
                };
                any_failed |= !status.is_success();

                let wall_time = rng.random_range(0.5..30.0);
                let execution = ExecutionResult {
                    submission_id: submission_id.clone(),
                    case_id: case.id().to_string(),
                    wall_time,
                    cpu_time: wall_time * rng.random_range(0.6..0.95),
                    memory: rng.random_range(128.0..4096.0),
                    status,
                    log_url: Some(format!("mock://logs/{submission_id}/{}", case.id())),
                    artifact_url: status
                        .is_success()
                        .then(|| format!("mock://artifacts/{submission_id}/{}", case.id())),
                };

                if status.is_success() {
                    for (eval_id, _) in EVAL_CODES {
                        let skill = 0.35 + user_index as f64 * 0.08 + round as f64 * 0.03;
                        let score = (skill + rng.random_range(-0.05..0.05)).clamp(0.0, 0.99);
                        store.evaluations.push(EvaluationResult {
                            submission_id: submission_id.clone(),
                            case_id: case.id().to_string(),
                            eval_code_id: (*eval_id).to_string(),
                            score,
                            evaluated_at: submitted + Duration::minutes(30),
                        });
                    }
                }
                store.executions.push(execution);
            }

            let status = if any_failed {
                SubmissionStatus::Failed
            } else {
                SubmissionStatus::Success
            };
            store.submissions.push(Resource {
                meta: meta(&mut rng, user, submitted, submission_id),
                data: Submission {
                    program_id: PROGRAM_ID.to_string(),
                    algo_id: format!("algo-{user}"),
                    submitter: (*user).to_string(),
                    submission_time: submitted,
                    status,
                },
            });
        }
    }

    info!(
        "Seeded {} datasets, {} cases, {} codes, 1 program",
        store.datasets.len(),
        store.cases.len(),
        store.codes.len(),
    );
    info!(
        "Seeded {} submissions with {} executions and {} evaluations",
        store.submissions.len(),
        store.executions.len(),
        store.evaluations.len(),
    );

    store
}

fn meta(rng: &mut StdRng, creator: &str, created: DateTime<Utc>, resource_id: String) -> ResourceMeta {
    ResourceMeta {
        creator: creator.into(),
        created_time: created,
        updater: creator.into(),
        updated_time: created,
        resource_id,
        revision_id: Uuid::from_bytes(rng.random()).to_string(),
    }
}

fn code(
    rng: &mut StdRng,
    creator: &str,
    created: DateTime<Utc>,
    id: &str,
    name: &str,
    code_type: CodeType,
) -> Resource<Code> {
    Resource {
        meta: meta(rng, creator, created, id.to_string()),
        data: Code {
            name: name.into(),
            description: format!("{code_type} code {name}"),
            gitlab_url: format!("https://gitlab.example.com/challenge/{id}"),
            commit_hash: Uuid::from_bytes(rng.random()).simple().to_string(),
            code_type,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_is_deterministic() {
        let config = SeedConfig::default();
        let first = seed_store(&config);
        let second = seed_store(&config);
        assert_eq!(
            serde_json::to_string(&first.submissions).unwrap(),
            serde_json::to_string(&second.submissions).unwrap()
        );
        assert_eq!(
            serde_json::to_string(&first.evaluations).unwrap(),
            serde_json::to_string(&second.evaluations).unwrap()
        );
    }

    #[test]
    fn test_seed_counts_follow_config() {
        let config = SeedConfig {
            rng_seed: 7,
            submissions_per_user: 3,
        };
        let store = seed_store(&config);
        assert_eq!(store.submissions.len(), USERS.len() * 3);
        assert_eq!(store.cases.len(), CASES.len());
        assert!(store.program(PROGRAM_ID).is_some());
    }

    #[test]
    fn test_resource_ids_unique_within_collections() {
        let store = seed_store(&SeedConfig::default());
        let ids: HashSet<&str> = store.submissions.iter().map(|s| s.id()).collect();
        assert_eq!(ids.len(), store.submissions.len());
        let ids: HashSet<&str> = store.datasets.iter().map(|d| d.id()).collect();
        assert_eq!(ids.len(), store.datasets.len());
    }

    #[test]
    fn test_executions_unique_per_submission_case() {
        let store = seed_store(&SeedConfig::default());
        let mut seen = HashSet::new();
        for execution in &store.executions {
            assert!(seen.insert((
                execution.submission_id.as_str(),
                execution.case_id.as_str()
            )));
        }
    }

    #[test]
    fn test_evaluations_only_for_successful_executions() {
        let store = seed_store(&SeedConfig::default());
        for evaluation in &store.evaluations {
            let execution = store
                .executions
                .iter()
                .find(|e| {
                    e.submission_id == evaluation.submission_id
                        && e.case_id == evaluation.case_id
                })
                .expect("evaluation without execution");
            assert!(execution.status.is_success());
            assert!((0.0..=1.0).contains(&evaluation.score));
        }
    }

    #[test]
    fn test_dataset_lineage_links_resolve() {
        let store = seed_store(&SeedConfig::default());
        let revisions: HashSet<&str> = store
            .datasets
            .iter()
            .map(|d| d.meta.revision_id.as_str())
            .collect();
        let mut derived = 0;
        for dataset in &store.datasets {
            if let Some(origin) = &dataset.data.origin_revision_id {
                assert!(revisions.contains(origin.as_str()));
                derived += 1;
            }
        }
        assert_eq!(derived, DATASETS.len());
    }
}
