use crate::input::{SignalSource, TimingSignals};
use crate::model::metrics::{Metric, MetricObservations};
use crate::pipeline::stage2_derive::DerivedRatios;

pub struct Stage3Inputs<'a> {
    pub source: Option<&'a dyn SignalSource>,
    pub pr_number: Option<u64>,
    pub velocity_window_days: u32,
    pub defect_recovery_hours: Option<f64>,
}

/// Collects the optional signals. Any failure leaves the corresponding
/// signal absent; nothing here aborts the run.
pub fn run_stage3(inputs: &Stage3Inputs<'_>) -> TimingSignals {
    let mut signals = TimingSignals {
        defect_recovery_hours: inputs.defect_recovery_hours,
        ..TimingSignals::default()
    };

    let (Some(source), Some(pr_number)) = (inputs.source, inputs.pr_number) else {
        tracing::info!("no timing source configured; cycle_time and merge_velocity are absent");
        return signals;
    };

    signals.cycle_time_hours = match source.cycle_time_hours(pr_number) {
        Ok(v) => v,
        Err(err) => {
            tracing::warn!("cycle time unavailable: {err}");
            None
        }
    };
    signals.merge_velocity = match source.merge_velocity(inputs.velocity_window_days) {
        Ok(v) => v,
        Err(err) => {
            tracing::warn!("merge velocity unavailable: {err}");
            None
        }
    };
    signals
}

pub fn build_observations(ratios: &DerivedRatios, signals: &TimingSignals) -> MetricObservations {
    let observations = MetricObservations::new()
        .with(Metric::MergeVelocity, signals.merge_velocity.map(|v| v as f64))
        .with(Metric::DefectRecovery, signals.defect_recovery_hours)
        .with(Metric::SubtractionRatio, Some(ratios.subtraction_ratio))
        .with(Metric::DocTestDepth, Some(ratios.doc_test_depth))
        .with(Metric::CycleTime, signals.cycle_time_hours);
    tracing::debug!("{} of 5 metrics observed", observations.present_count());
    observations
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_signals.rs"]
mod tests;
