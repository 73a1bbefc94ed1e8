use crate::model::metrics::Metric;
use crate::report::{MetricsRecord, format_number, format_opt, format_pct};

/// Markdown-friendly summary of one record, suitable for a terminal or a
/// pull request comment.
pub fn render_summary(record: &MetricsRecord, velocity_window_days: u32) -> String {
    let target = |m: Metric| format_number(record.targets.get(&m).copied().unwrap_or_default());

    let mut lines = vec![
        "EFF Metrics Summary".to_string(),
        String::new(),
        format!(
            "Files touched: {} | LOC ±: +{}/-{} | PR size: {} LOC",
            record.files_touched, record.loc_added, record.loc_deleted, record.total_changed
        ),
        format!(
            "Subtraction ratio: {} (target ≥ {})",
            format_number(record.subtraction_ratio),
            target(Metric::SubtractionRatio)
        ),
        format!(
            "Doc+Test depth: {} (target ≥ {})",
            format_number(record.doc_test_depth),
            target(Metric::DocTestDepth)
        ),
        format!(
            "Cycle time: {} h (target ≤ {})",
            format_opt(record.cycle_time_hours.map(format_number)),
            target(Metric::CycleTime)
        ),
    ];
    if let Some(hours) = record.defect_recovery_hours {
        lines.push(format!(
            "Defect recovery: {} h (target ≤ {})",
            format_number(hours),
            target(Metric::DefectRecovery)
        ));
    }
    lines.push(format!(
        "Merge velocity (last {velocity_window_days}d): {} (target ≥ {})",
        format_opt(record.merge_velocity),
        record
            .targets
            .get(&Metric::MergeVelocity)
            .copied()
            .unwrap_or_default()
            .trunc()
    ));
    lines.push(format!("Partial NSS: {}", format_pct(record.composite)));
    lines.join("\n")
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
