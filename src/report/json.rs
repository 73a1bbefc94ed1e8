use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::metrics::Metric;

/// One line of the metrics log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsRecord {
    pub timestamp: String,
    pub pr_number: Option<u64>,
    pub base: String,
    pub head: String,
    pub files_touched: u64,
    pub loc_added: u64,
    pub loc_deleted: u64,
    pub total_changed: u64,
    pub subtraction_ratio: f64,
    pub docs_touched: u64,
    pub tests_touched: u64,
    pub doc_test_depth: f64,
    pub cycle_time_hours: Option<f64>,
    pub merge_velocity: Option<u64>,
    pub defect_recovery_hours: Option<f64>,
    pub scores: BTreeMap<Metric, Option<f64>>,
    pub composite: Option<f64>,
    pub weights: BTreeMap<Metric, f64>,
    pub targets: BTreeMap<Metric, f64>,
}

/// Output of `eff-verifier score`: the engine's result with the tables it
/// used and nothing else.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub scores: BTreeMap<Metric, Option<f64>>,
    pub composite: Option<f64>,
    pub weights: BTreeMap<Metric, f64>,
    pub targets: BTreeMap<Metric, f64>,
}

pub fn render_record_line(record: &MetricsRecord) -> serde_json::Result<String> {
    let mut line = serde_json::to_string(record)?;
    line.push('\n');
    Ok(line)
}
