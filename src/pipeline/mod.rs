use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::config::ConfigSource;
use crate::input::{DiffSource, InputError, ReportPublisher, SignalSource};
use crate::model::scores::ScoreRecord;
use crate::report::text::render_summary;
use crate::report::{MetricsRecord, ReportError};

pub mod stage1_diff;
pub mod stage2_derive;
pub mod stage3_signals;
pub mod stage4_normalize;
pub mod stage5_composite;
pub mod stage6_report;

use stage1_diff::run_stage1;
use stage2_derive::run_stage2;
use stage3_signals::{Stage3Inputs, build_observations, run_stage3};
use stage5_composite::PartialWeightedScorer;
use stage6_report::{Stage6Input, append_record, build_metrics_record, publish_summary};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("failed to read git diff {base}...{head}: {source}")]
    Diff {
        base: String,
        head: String,
        #[source]
        source: InputError,
    },
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// External collaborators of one run. Only the diff source is mandatory.
pub struct Collaborators<'a> {
    pub diff: &'a dyn DiffSource,
    pub signals: Option<&'a dyn SignalSource>,
    pub publisher: Option<&'a dyn ReportPublisher>,
    pub config: &'a dyn ConfigSource,
}

#[derive(Debug, Clone)]
pub struct RunPlan {
    pub base: String,
    pub head: String,
    pub pr_number: Option<u64>,
    pub out_path: PathBuf,
    pub velocity_window_days: u32,
    pub defect_recovery_hours: Option<f64>,
    pub now: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub scores: ScoreRecord,
    pub record: MetricsRecord,
    pub summary: String,
    pub published: bool,
}

/// Runs every stage: the record is persisted before any summary is pushed,
/// so a failed push never loses a score.
pub fn run_pipeline(plan: &RunPlan, io: &Collaborators<'_>) -> Result<RunOutcome, PipelineError> {
    let stats = run_stage1(io.diff, &plan.base, &plan.head).map_err(|source| {
        PipelineError::Diff {
            base: plan.base.clone(),
            head: plan.head.clone(),
            source,
        }
    })?;
    let ratios = run_stage2(&stats);

    let signals = run_stage3(&Stage3Inputs {
        source: io.signals,
        pr_number: plan.pr_number,
        velocity_window_days: plan.velocity_window_days,
        defect_recovery_hours: plan.defect_recovery_hours,
    });
    let observations = build_observations(&ratios, &signals);

    let weights = io.config.load_weights();
    let targets = io.config.load_targets();
    let scores = PartialWeightedScorer::new(&targets, &weights).score(&observations);

    let record = build_metrics_record(&Stage6Input {
        timestamp: plan.now,
        pr_number: plan.pr_number,
        base: &plan.base,
        head: &plan.head,
        stats: &stats,
        ratios: &ratios,
        signals: &signals,
        scores: &scores,
        weights: &weights,
        targets: &targets,
    });
    append_record(&plan.out_path, &record)?;

    let summary = render_summary(&record, plan.velocity_window_days);
    let published = match (io.publisher, plan.pr_number) {
        (Some(publisher), Some(pr)) => publish_summary(publisher, pr, &summary),
        _ => false,
    };

    Ok(RunOutcome {
        scores,
        record,
        summary,
        published,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/run.rs"]
mod tests;
