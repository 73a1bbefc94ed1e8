use std::collections::BTreeMap;

use super::*;
use crate::model::metrics::metric_order;
use crate::model::targets::TargetTable;
use crate::model::weights::WeightTable;

fn record() -> MetricsRecord {
    MetricsRecord {
        timestamp: "2026-01-02T03:04:05.000000+00:00".to_string(),
        pr_number: None,
        base: "origin/main".to_string(),
        head: "HEAD".to_string(),
        files_touched: 10,
        loc_added: 80,
        loc_deleted: 20,
        total_changed: 100,
        subtraction_ratio: 0.2,
        docs_touched: 3,
        tests_touched: 5,
        doc_test_depth: 0.8,
        cycle_time_hours: None,
        merge_velocity: None,
        defect_recovery_hours: None,
        scores: metric_order().iter().map(|&m| (m, None)).collect::<BTreeMap<_, _>>(),
        composite: Some(1.0),
        weights: WeightTable::default_v1().values().clone(),
        targets: TargetTable::default_v1().values(),
    }
}

#[test]
fn test_summary_with_absent_signals() {
    let expected = "EFF Metrics Summary\n\
                    \n\
                    Files touched: 10 | LOC ±: +80/-20 | PR size: 100 LOC\n\
                    Subtraction ratio: 0.2 (target ≥ 0.2)\n\
                    Doc+Test depth: 0.8 (target ≥ 0.8)\n\
                    Cycle time: – h (target ≤ 48.0)\n\
                    Merge velocity (last 7d): – (target ≥ 5)\n\
                    Partial NSS: 100.0%";
    assert_eq!(render_summary(&record(), 7), expected);
}

#[test]
fn test_summary_with_all_signals() {
    let mut r = record();
    r.cycle_time_hours = Some(12.5);
    r.merge_velocity = Some(6);
    r.defect_recovery_hours = Some(30.0);
    r.composite = None;
    let text = render_summary(&r, 14);
    assert!(text.contains("Cycle time: 12.5 h (target ≤ 48.0)"));
    assert!(text.contains("Defect recovery: 30.0 h (target ≤ 24.0)"));
    assert!(text.contains("Merge velocity (last 14d): 6 (target ≥ 5)"));
    assert!(text.ends_with("Partial NSS: –"));
}
