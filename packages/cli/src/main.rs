use anyhow::Context;
use clap::{Parser, Subcommand};
use console::style;
use tracing::Level;

use board::chart::{ChartKind, ChartQuery, project_chart_series};
use board::history::compute_submission_rows;
use board::leaderboard::{LeaderboardQuery, compute_leaderboard};
use board::metric::{MetricDescriptor, MetricId, build_metric_catalog};
use board::{ProgramData, Selection};
use common::AppError;
use common::case::CaseType;
use common::code::CodeType;
use common::config::AppConfig;
use store::ResourceStore;
use store::fetch::{DatasetQuery, FrontendFilters, apply_frontend_filters, fetch_datasets};
use store::seed::{PROGRAM_ID, seed_store};

/// Terminal front end for the derived views: leaderboard, submission
/// history, charts, and the dataset browser, all computed from seeded data.
#[derive(Parser)]
#[command(name = "databoard", version, about)]
struct Cli {
    /// Emit raw JSON instead of a table.
    #[arg(long, global = true)]
    json: bool,

    /// User the `--mine` filter and history default resolve against.
    #[arg(long, global = true, default_value = "alice")]
    user: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ranked leaderboard for one case type.
    Leaderboard {
        /// Case type tab: "open data", "open exam" or "close exam".
        #[arg(long, default_value = "open data")]
        case_type: CaseType,
        /// Restrict to these case IDs (repeatable; none means all).
        #[arg(long = "case")]
        cases: Vec<String>,
        /// Restrict to these metric IDs (repeatable; none means all).
        #[arg(long = "metric")]
        metrics: Vec<String>,
    },
    /// Per-submission history for one user.
    History {
        #[arg(long = "case")]
        cases: Vec<String>,
        #[arg(long = "metric")]
        metrics: Vec<String>,
    },
    /// Chart projection for one case.
    Chart {
        /// "trend", "scatter" or "pareto".
        #[arg(long, default_value = "trend")]
        kind: ChartKind,
        #[arg(long)]
        case: String,
        /// X-axis metric; ignored for trend charts.
        #[arg(long, default_value = "wall_time")]
        x: MetricId,
        #[arg(long)]
        y: MetricId,
    },
    /// Browse datasets through the mock paginated endpoint.
    Datasets {
        #[arg(long, default_value_t = 1)]
        page: u64,
        #[arg(long)]
        per_page: Option<u64>,
        /// Case-insensitive substring over name and description.
        #[arg(long)]
        search: Option<String>,
        /// Creator multiselect (repeatable; none means all).
        #[arg(long = "creator")]
        creators: Vec<String>,
        /// Only datasets created by the current user.
        #[arg(long)]
        mine: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Failed to load config")?;
    let store = seed_store(&config.seed);

    match cli.command {
        Command::Leaderboard {
            case_type,
            cases,
            metrics,
        } => {
            let data = program_data(&store)?;
            let query = LeaderboardQuery {
                case_type,
                case_selection: Selection::from_ids(cases),
                metric_selection: Selection::from_ids(metrics),
            };
            let board = compute_leaderboard(&data, &query);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&board)?);
            } else {
                print_leaderboard(&board);
            }
        }
        Command::History { cases, metrics } => {
            let data = program_data(&store)?;
            let submissions: Vec<_> = data
                .program_submissions()
                .into_iter()
                .filter(|s| s.data.submitter == cli.user)
                .collect();
            let selected_cases = data.all_program_cases(&Selection::from_ids(cases));
            let metrics = select_metrics(&data, &Selection::from_ids(metrics));
            let rows = compute_submission_rows(
                &submissions,
                data.executions,
                data.evaluations,
                &selected_cases,
                &metrics,
            );
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                print_history(&cli.user, &rows);
            }
        }
        Command::Chart { kind, case, x, y } => {
            let data = program_data(&store)?;
            let submissions = data.program_submissions();
            let query = ChartQuery {
                kind,
                case_id: case,
                metric_x: x,
                metric_y: y,
            };
            let series = project_chart_series(
                &submissions,
                data.executions,
                data.evaluations,
                &query,
            );
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&series)?);
            } else {
                print_series(&query, &series);
            }
        }
        Command::Datasets {
            page,
            per_page,
            search,
            creators,
            mine,
        } => {
            let query = DatasetQuery {
                page: Some(page),
                per_page,
                ..DatasetQuery::default()
            };
            let fetched = fetch_datasets(&store, &config.fetch, &query).await?;
            let filters = FrontendFilters {
                search,
                creators,
                mine,
            };
            let visible = apply_frontend_filters(&fetched.items, &filters, &cli.user);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&visible)?);
            } else {
                println!(
                    "{} (page {}/{}, {} total)",
                    style("Datasets").bold(),
                    fetched.pagination.page,
                    fetched.pagination.total_pages,
                    fetched.pagination.total,
                );
                for dataset in visible {
                    println!(
                        "  {:<28} {:<24} {:<8} {}",
                        dataset.id(),
                        dataset.data.name,
                        dataset.meta.creator,
                        dataset.meta.created_time.format("%Y-%m-%d"),
                    );
                }
            }
        }
    }

    Ok(())
}

fn program_data(store: &ResourceStore) -> anyhow::Result<ProgramData<'_>> {
    Ok(store
        .program_data(PROGRAM_ID)
        .ok_or_else(|| AppError::NotFound(format!("Program {PROGRAM_ID}")))?)
}

/// The program's metric catalog narrowed to a selection, preserving
/// catalog order.
fn select_metrics(data: &ProgramData<'_>, selection: &Selection) -> Vec<MetricDescriptor> {
    build_metric_catalog(data.program_codes(CodeType::Evaluation))
        .into_iter()
        .filter(|m| selection.contains(m.id.as_str()))
        .collect()
}

fn print_leaderboard(board: &board::leaderboard::Leaderboard) {
    println!(
        "{:<5} {:<8} {:<14} {:>8}  {}",
        style("rank").bold(),
        style("user").bold(),
        style("algorithm").bold(),
        style("score").bold(),
        style("submitted").bold(),
    );
    for row in &board.rows {
        let score = row
            .final_score
            .map_or_else(|| "-".to_string(), |s| format!("{s:.3}"));
        println!(
            "{:<5} {:<8} {:<14} {:>8}  {}",
            row.rank,
            row.user,
            row.algorithm,
            score,
            row.submission_time.format("%Y-%m-%d %H:%M"),
        );
    }
    println!(
        "{} cases, {} metrics, {} rows",
        board.cases.len(),
        board.metrics.len(),
        board.rows.len(),
    );
}

fn print_history(user: &str, rows: &[board::history::SubmissionRow]) {
    println!("{} for {user}", style("Submission history").bold());
    for row in rows {
        println!(
            "{:<14} {:<8} {}",
            row.submission_id,
            row.status.as_str(),
            row.submission_time.format("%Y-%m-%d %H:%M"),
        );
        for (key, value) in &row.cells {
            println!("    {:<28} {value:.3}", key.to_string());
        }
    }
}

fn print_series(query: &ChartQuery, series: &board::chart::ChartSeries) {
    println!(
        "{} {} on {} ({} points)",
        style(query.kind.to_string()).bold(),
        query.metric_y,
        query.case_id,
        series.points.len(),
    );
    for point in &series.points {
        println!("  ({:.3}, {:.3})", point.x, point.y);
    }
    if !series.frontier.is_empty() {
        println!("{}", style("frontier").bold());
        for point in &series.frontier {
            println!("  ({:.3}, {:.3})", point.x, point.y);
        }
    }
}
