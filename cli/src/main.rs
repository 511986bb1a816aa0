//! CLI for milestone-sync.
//!
//! `list` snapshots a repository's milestones and milestoned issues to files;
//! `update` replays those files onto a (possibly different) repository.

use clap::Parser;
use milestone_sync::{
    ErrorPolicy, IssueStateFilter, Operation, RunSummary, Runner, RunnerConfig, RunnerError,
    Settings, UnresolvedMilestone,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::error;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default log file, written next to the snapshots.
const DEFAULT_LOG_FILE: &str = "milestones.log";

/// milestone-sync - Snapshot GitHub milestones and replay them onto another repository.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Operation to run: `list` or `update`.
    operation: Operation,

    /// Repository owner (user or organization).
    #[arg(long, env = "GITHUB_OWNER")]
    owner: String,

    /// Repository name.
    #[arg(long, env = "GITHUB_REPO")]
    repo: String,

    /// GitHub Personal Access Token.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: String,

    /// Path to a TOML settings file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base URL of the GitHub REST API.
    #[arg(long, env = "GITHUB_API_URL")]
    api_endpoint: Option<String>,

    /// Milestone snapshot path.
    #[arg(long)]
    milestones_file: Option<PathBuf>,

    /// Issue snapshot path.
    #[arg(long)]
    issues_file: Option<PathBuf>,

    /// Trust milestone numbers to match between source and target.
    /// `--search-by-number=false` turns a settings-file `true` off.
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    search_by_number: Option<bool>,

    /// What to do with issues whose milestone is missing on the target: `skip` or `clear`.
    #[arg(long)]
    unresolved: Option<UnresolvedMilestone>,

    /// Which issues to list: `open`, `closed` or `all`.
    #[arg(long)]
    issue_state: Option<IssueStateFilter>,

    /// Log file, written in addition to stdout.
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Stop the run on the first failed request.
    #[arg(long)]
    fail_fast: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Both aws-lc-rs and ring may be compiled in; pick one explicitly.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    if let Err(e) = init_tracing(&args.log_file) {
        eprintln!("Failed to open log file '{}': {e}", args.log_file.display());
        return ExitCode::from(2);
    }

    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);

            if summary.has_failures() {
                ExitCode::from(1)
            } else {
                ExitCode::from(0)
            }
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Sets up the global tracing subscriber.
///
/// Events go to stdout in compact form and to `log_file` as plain text.
/// `RUST_LOG` overrides the default "info" level.
fn init_tracing(log_file: &Path) -> Result<(), InitError> {
    let directory = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = log_file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(directory)?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().compact().with_target(false))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(file_appender),
        )
        .init();
    Ok(())
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    apply_overrides(&mut settings, &args);

    let error_policy = if args.fail_fast {
        ErrorPolicy::Fatal
    } else {
        ErrorPolicy::Log
    };
    let config =
        RunnerConfig::new(args.owner, args.repo, args.token, settings).with_error_policy(error_policy);
    let runner = Runner::new(config)?;
    runner.run(args.operation).await
}

/// Layers flags and environment variables over file settings.
fn apply_overrides(settings: &mut Settings, args: &Args) {
    if let Some(endpoint) = &args.api_endpoint {
        settings.api_endpoint = endpoint.clone();
    }
    if let Some(path) = &args.milestones_file {
        settings.milestones_file = path.clone();
    }
    if let Some(path) = &args.issues_file {
        settings.issues_file = path.clone();
    }
    if let Some(search_by_number) = args.search_by_number {
        settings.search_by_number = search_by_number;
    }
    if let Some(unresolved) = args.unresolved {
        settings.unresolved = unresolved;
    }
    if let Some(issue_state) = args.issue_state {
        settings.issue_state = issue_state;
    }
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!("  Operation: {}", summary.operation);

    match summary.operation {
        Operation::List => {
            println!("  Milestones filed: {}", summary.milestones_listed);
            println!("  Issues/PRs filed: {}", summary.issues_listed);
            println!("  Listings incomplete: {}", summary.listings_incomplete);
        }
        Operation::Update => {
            println!("  Milestones created: {}", summary.milestones.created);
            println!("  Milestones skipped: {}", summary.milestones.skipped);
            println!("  Milestones failed: {}", summary.milestones.failed);
            println!("  Issues/PRs updated: {}", summary.issues.applied);
            println!("  Issues/PRs unresolved: {}", summary.issues.unresolved);
            println!("  Issues/PRs failed: {}", summary.issues.failed);
        }
    }
}
