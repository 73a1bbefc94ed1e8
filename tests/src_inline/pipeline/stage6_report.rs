use std::cell::RefCell;

use chrono::TimeZone;
use serde_json::Value;

use super::*;
use crate::input::InputError;
use crate::model::metrics::{Metric, MetricObservations};
use crate::pipeline::stage5_composite::PartialWeightedScorer;

fn sample_stats() -> DiffStats {
    DiffStats {
        files_touched: 3,
        added_lines: 2,
        deleted_lines: 1,
        docs_touched: 1,
        tests_touched: 0,
        ..DiffStats::default()
    }
}

fn sample_record(signals: &TimingSignals) -> MetricsRecord {
    let stats = sample_stats();
    let ratios = DerivedRatios {
        subtraction_ratio: 1.0 / 3.0,
        doc_test_depth: 1.0 / 3.0,
    };
    let targets = TargetTable::default_v1();
    let weights = WeightTable::default_v1();
    let obs = MetricObservations::new()
        .with(Metric::SubtractionRatio, Some(ratios.subtraction_ratio))
        .with(Metric::DocTestDepth, Some(ratios.doc_test_depth))
        .with(Metric::CycleTime, signals.cycle_time_hours);
    let scores = PartialWeightedScorer::new(&targets, &weights).score(&obs);
    build_metrics_record(&Stage6Input {
        timestamp: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
        pr_number: Some(42),
        base: "origin/main",
        head: "HEAD",
        stats: &stats,
        ratios: &ratios,
        signals,
        scores: &scores,
        weights: &weights,
        targets: &targets,
    })
}

#[test]
fn test_record_fields_and_rounding() {
    let signals = TimingSignals {
        cycle_time_hours: Some(12.345_678),
        ..TimingSignals::default()
    };
    let record = sample_record(&signals);
    assert_eq!(record.timestamp, "2026-01-02T03:04:05.000000+00:00");
    assert_eq!(record.total_changed, 3);
    assert_eq!(record.subtraction_ratio, 0.3333);
    assert_eq!(record.doc_test_depth, 0.3333);
    assert_eq!(record.cycle_time_hours, Some(12.35));
    assert_eq!(record.merge_velocity, None);
    assert_eq!(record.scores.len(), 5);
    assert_eq!(record.scores[&Metric::CycleTime], Some(1.0));
    assert_eq!(record.scores[&Metric::MergeVelocity], None);
    let composite = record.composite.unwrap();
    assert_eq!(composite, round4(composite));
}

#[test]
fn test_record_json_shape() {
    let record = sample_record(&TimingSignals::default());
    let value: Value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["pr_number"], 42);
    assert!(value["cycle_time_hours"].is_null());
    assert!(value["scores"]["merge_velocity"].is_null());
    assert!(value["scores"]["defect_recovery"].is_null());
    assert_eq!(value["weights"]["merge_velocity"], 0.3);
    assert_eq!(value["targets"]["cycle_time"], 48.0);
    assert!(value["composite"].is_number());
}

#[test]
fn test_append_record_creates_dirs_and_appends() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("metrics").join("nss.jsonl");
    let record = sample_record(&TimingSignals::default());

    append_record(&path, &record).unwrap();
    append_record(&path, &record).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(text.ends_with('\n'));
    for line in lines {
        let value: Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["head"], "HEAD");
    }
}

#[test]
fn test_append_record_reports_io_failure() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "x").unwrap();
    let record = sample_record(&TimingSignals::default());
    let err = append_record(&blocker.join("nss.jsonl"), &record).unwrap_err();
    assert!(matches!(err, ReportError::Io { .. }));
}

struct RecordingPublisher {
    fail: bool,
    posted: RefCell<Vec<(u64, String)>>,
}

impl ReportPublisher for RecordingPublisher {
    fn publish(&self, pr_number: u64, body: &str) -> Result<(), InputError> {
        if self.fail {
            return Err(InputError::Status {
                url: "https://api.github.com/repos/acme/widgets/issues/7/comments".to_string(),
                status: 403,
            });
        }
        self.posted.borrow_mut().push((pr_number, body.to_string()));
        Ok(())
    }
}

#[test]
fn test_publish_summary_is_best_effort() {
    let ok = RecordingPublisher {
        fail: false,
        posted: RefCell::new(Vec::new()),
    };
    assert!(publish_summary(&ok, 7, "hello"));
    assert_eq!(ok.posted.borrow().as_slice(), &[(7, "hello".to_string())]);

    let failing = RecordingPublisher {
        fail: true,
        posted: RefCell::new(Vec::new()),
    };
    assert!(!publish_summary(&failing, 7, "hello"));
}
