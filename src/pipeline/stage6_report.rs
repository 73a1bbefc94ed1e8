use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::input::{DiffStats, ReportPublisher, TimingSignals};
use crate::model::scores::ScoreRecord;
use crate::model::targets::TargetTable;
use crate::model::weights::WeightTable;
use crate::pipeline::stage2_derive::DerivedRatios;
use crate::report::json::render_record_line;
use crate::report::{MetricsRecord, ReportError, round2, round4};

pub struct Stage6Input<'a> {
    pub timestamp: DateTime<Utc>,
    pub pr_number: Option<u64>,
    pub base: &'a str,
    pub head: &'a str,
    pub stats: &'a DiffStats,
    pub ratios: &'a DerivedRatios,
    pub signals: &'a TimingSignals,
    pub scores: &'a ScoreRecord,
    pub weights: &'a WeightTable,
    pub targets: &'a TargetTable,
}

pub fn build_metrics_record(input: &Stage6Input<'_>) -> MetricsRecord {
    MetricsRecord {
        timestamp: input
            .timestamp
            .to_rfc3339_opts(SecondsFormat::Micros, false),
        pr_number: input.pr_number,
        base: input.base.to_string(),
        head: input.head.to_string(),
        files_touched: input.stats.files_touched,
        loc_added: input.stats.added_lines,
        loc_deleted: input.stats.deleted_lines,
        total_changed: input.stats.total_changed(),
        subtraction_ratio: round4(input.ratios.subtraction_ratio),
        docs_touched: input.stats.docs_touched,
        tests_touched: input.stats.tests_touched,
        doc_test_depth: round4(input.ratios.doc_test_depth),
        cycle_time_hours: input.signals.cycle_time_hours.map(round2),
        merge_velocity: input.signals.merge_velocity,
        defect_recovery_hours: input.signals.defect_recovery_hours.map(round2),
        scores: input.scores.per_metric().clone(),
        composite: input.scores.composite().map(round4),
        weights: input.weights.values().clone(),
        targets: input.targets.values(),
    }
}

/// Appends one JSON line to `path`, creating parent directories as needed.
/// Existing lines are never rewritten.
pub fn append_record(path: &Path, record: &MetricsRecord) -> Result<(), ReportError> {
    let line = render_record_line(record)?;
    let io_err = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_err)?;
    file.write_all(line.as_bytes()).map_err(io_err)?;
    tracing::info!("appended metrics record to {}", path.display());
    Ok(())
}

/// Best effort: a failed push is logged and reported as `false`, never as
/// an error, since the record is already persisted.
pub fn publish_summary(publisher: &dyn ReportPublisher, pr_number: u64, summary: &str) -> bool {
    match publisher.publish(pr_number, summary) {
        Ok(()) => {
            tracing::info!("posted metrics summary to PR #{pr_number}");
            true
        }
        Err(err) => {
            tracing::warn!("failed to post metrics summary to PR #{pr_number}: {err}");
            false
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_report.rs"]
mod tests;
