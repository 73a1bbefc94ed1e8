use std::collections::BTreeMap;

use crate::model::metrics::{Metric, MetricObservations, Polarity, metric_order};
use crate::model::scores::clip01;
use crate::model::targets::TargetTable;

/// Maps one observation onto [0, 1] against its target.
///
/// * absent or non-finite observation: absent
/// * higher is better: `observed / target`, absent when `target == 0`
/// * lower is better: 1.0 at zero, `target / observed` above zero, absent
///   for negative observations
pub fn normalize(observed: Option<f64>, target: f64, polarity: Polarity) -> Option<f64> {
    let observed = observed.filter(|v| v.is_finite())?;
    match polarity {
        Polarity::HigherIsBetter => {
            if target == 0.0 {
                return None;
            }
            Some(clip01(observed / target))
        }
        Polarity::LowerIsBetter => {
            if observed == 0.0 {
                Some(1.0)
            } else if observed > 0.0 {
                Some(clip01(target / observed))
            } else {
                None
            }
        }
    }
}

/// Scores every known metric; metrics without an observation or a
/// definition come back absent.
pub fn run_stage4(
    observations: &MetricObservations,
    targets: &TargetTable,
) -> BTreeMap<Metric, Option<f64>> {
    let mut out = BTreeMap::new();
    for &metric in metric_order() {
        let score = targets
            .get(metric)
            .and_then(|def| normalize(observations.get(metric), def.target, def.polarity));
        if score.is_none() && observations.get(metric).is_some() {
            tracing::warn!("{metric} observed but could not be scored (target {})", targets.target(metric));
        }
        out.insert(metric, score);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_normalize.rs"]
mod tests;
