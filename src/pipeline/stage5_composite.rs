use crate::model::metrics::MetricObservations;
use crate::model::scores::ScoreRecord;
use crate::model::targets::TargetTable;
use crate::model::weights::WeightTable;
use crate::pipeline::stage4_normalize::run_stage4;

/// Weighted mean over the present scores only, so missing metrics shrink
/// the denominator instead of dragging the result towards zero. Absent when
/// the accumulated weight is not positive. Weights are used as given,
/// negative ones included.
pub fn aggregate<I>(scored: I) -> Option<f64>
where
    I: IntoIterator<Item = (Option<f64>, f64)>,
{
    let mut num = 0.0;
    let mut den = 0.0;
    for (score, weight) in scored {
        if let Some(s) = score {
            num += s * weight;
            den += weight;
        }
    }
    if den > 0.0 { Some(num / den) } else { None }
}

/// Normalizes observations against a target table and folds them into a
/// composite using a weight table. Holds no state between calls.
#[derive(Debug, Clone, Copy)]
pub struct PartialWeightedScorer<'a> {
    targets: &'a TargetTable,
    weights: &'a WeightTable,
}

impl<'a> PartialWeightedScorer<'a> {
    pub fn new(targets: &'a TargetTable, weights: &'a WeightTable) -> Self {
        Self { targets, weights }
    }

    pub fn score(&self, observations: &MetricObservations) -> ScoreRecord {
        let per_metric = run_stage4(observations, self.targets);
        let composite = aggregate(
            per_metric
                .iter()
                .map(|(&metric, &score)| (score, self.weights.get(metric))),
        );
        match composite {
            Some(c) => tracing::info!(
                "composite {c:.4} over {} of {} metrics",
                per_metric.values().filter(|s| s.is_some()).count(),
                per_metric.len()
            ),
            None => tracing::warn!("no metric could be scored; composite unavailable"),
        }
        ScoreRecord::new(per_metric, composite)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_composite.rs"]
mod tests;
