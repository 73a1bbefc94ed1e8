mod config;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::config::{BuiltinConfig, ConfigSource, DEFAULT_CONFIG_PATH, YamlConfig};
use crate::input::diff::GitDiffSource;
use crate::input::github::{DEFAULT_API_BASE, GitHubClient};
use crate::input::{ReportPublisher, SignalSource};
use crate::model::metrics::{Metric, MetricObservations};
use crate::pipeline::stage5_composite::PartialWeightedScorer;
use crate::pipeline::{Collaborators, PipelineError, RunPlan, run_pipeline};
use crate::report::ScoreSummary;

#[derive(Debug, Parser)]
#[command(
    name = "eff-verifier",
    version,
    about = "Compute weighted partial north-star scores for pull requests"
)]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score a base/head diff, append the record to the metrics log and print a summary
    Run(RunArgs),
    /// Score observations from a JSON file and print the result
    Score(ScoreArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Base ref to diff against
    #[arg(long, env = "BASE_REF", default_value = "origin/HEAD")]
    base: String,

    /// Head ref
    #[arg(long, default_value = "HEAD")]
    head: String,

    /// Metrics log (JSON lines, appended)
    #[arg(long, default_value = "metrics/nss.jsonl")]
    out: PathBuf,

    /// Repository working tree to run git in
    #[arg(long, default_value = ".")]
    repo_dir: PathBuf,

    /// Weights/targets configuration
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// owner/repo for the GitHub API
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repo: Option<String>,

    /// Pull request number; 0 or empty means none
    #[arg(long, env = "PR_NUMBER", value_parser = parse_pr_number)]
    pr_number: Option<u64>,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_BASE)]
    api_url: String,

    /// Days counted by the merge velocity query
    #[arg(long, default_value_t = 7)]
    velocity_window_days: u32,

    /// Hours from defect report to fix, when known
    #[arg(long)]
    defect_recovery_hours: Option<f64>,

    /// Post the summary as a PR comment (needs token, repo and PR number)
    #[arg(long)]
    post_comment: bool,
}

impl RunArgs {
    fn pr_number(&self) -> Option<u64> {
        self.pr_number.filter(|&n| n > 0)
    }
}

/// CI sets `PR_NUMBER` to an empty string outside pull request events.
fn parse_pr_number(value: &str) -> Result<u64, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(0);
    }
    value
        .parse()
        .map_err(|e| format!("invalid pull request number {value:?}: {e}"))
}

#[derive(Debug, Args)]
struct ScoreArgs {
    /// JSON object mapping metric name to a number or null
    #[arg(long)]
    observations: PathBuf,

    /// Weights/targets configuration; built-in tables when omitted
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error("failed to read observations {}: {message}", path.display())]
    Observations { path: PathBuf, message: String },
    #[error("failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}

impl RunError {
    fn exit_code(&self) -> i32 {
        match self {
            RunError::Pipeline(PipelineError::Diff { .. }) => 2,
            _ => 1,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let result = match cli.command {
        Command::Run(args) => run(args),
        Command::Score(args) => score(args),
    };
    if let Err(err) = result {
        eprintln!("{err}");
        std::process::exit(err.exit_code());
    }
}

fn run(args: RunArgs) -> Result<(), RunError> {
    let pr_number = args.pr_number();
    let github = match (&args.token, &args.repo) {
        (Some(token), Some(repo)) if !token.is_empty() && !repo.is_empty() => {
            Some(GitHubClient::new(&args.api_url, repo, token))
        }
        _ => None,
    };

    let diff = GitDiffSource::new(&args.repo_dir);
    let config = YamlConfig::open(&args.config);
    let publisher = github
        .as_ref()
        .filter(|_| args.post_comment)
        .map(|g| g as &dyn ReportPublisher);
    if args.post_comment && publisher.is_none() {
        tracing::warn!("--post-comment needs GITHUB_TOKEN and --repo; skipping comment");
    }

    let plan = RunPlan {
        base: args.base,
        head: args.head,
        pr_number,
        out_path: args.out,
        velocity_window_days: args.velocity_window_days,
        defect_recovery_hours: args.defect_recovery_hours,
        now: chrono::Utc::now(),
    };
    let outcome = run_pipeline(
        &plan,
        &Collaborators {
            diff: &diff,
            signals: github.as_ref().map(|g| g as &dyn SignalSource),
            publisher,
            config: &config,
        },
    )?;

    println!("{}", outcome.summary);
    if outcome.published {
        println!("Posted PR comment with EFF metrics.");
    }
    Ok(())
}

fn score(args: ScoreArgs) -> Result<(), RunError> {
    let observations = read_observations(&args.observations)?;
    let config: Box<dyn ConfigSource> = match &args.config {
        Some(path) => Box::new(YamlConfig::open(path)),
        None => Box::new(BuiltinConfig),
    };
    let weights = config.load_weights();
    let targets = config.load_targets();
    let scores = PartialWeightedScorer::new(&targets, &weights).score(&observations);

    let summary = ScoreSummary {
        scores: scores.per_metric().clone(),
        composite: scores.composite(),
        weights: weights.values().clone(),
        targets: targets.values(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn read_observations(path: &Path) -> Result<MetricObservations, RunError> {
    let err = |message: String| RunError::Observations {
        path: path.to_path_buf(),
        message,
    };
    let text = std::fs::read_to_string(path).map_err(|e| err(e.to_string()))?;
    parse_observations(&text).map_err(err)
}

fn parse_observations(text: &str) -> Result<MetricObservations, String> {
    let raw: BTreeMap<String, Option<f64>> =
        serde_json::from_str(text).map_err(|e| e.to_string())?;
    let mut observations = MetricObservations::new();
    for (name, value) in raw {
        match Metric::from_name(&name) {
            Some(metric) => observations.set(metric, value),
            None => tracing::warn!("ignoring unknown metric {name:?}"),
        }
    }
    Ok(observations)
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
