use std::collections::BTreeMap;

use crate::model::metrics::{Metric, metric_order};

/// Per-metric weights. Weights need not sum to 1; the composite is
/// renormalized over whichever metrics are present.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
    weights: BTreeMap<Metric, f64>,
}

impl WeightTable {
    pub fn default_v1() -> Self {
        let weights = metric_order()
            .iter()
            .map(|&m| (m, default_weight(m)))
            .collect();
        Self { weights }
    }

    /// Metrics missing from `weights` keep their default weight.
    pub fn from_partial(weights: &BTreeMap<Metric, f64>) -> Self {
        let mut table = Self::default_v1();
        for (&metric, &weight) in weights {
            table.weights.insert(metric, weight);
        }
        table
    }

    pub fn get(&self, metric: Metric) -> f64 {
        self.weights
            .get(&metric)
            .copied()
            .unwrap_or_else(|| default_weight(metric))
    }

    pub fn values(&self) -> &BTreeMap<Metric, f64> {
        &self.weights
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::default_v1()
    }
}

pub fn default_weight(metric: Metric) -> f64 {
    match metric {
        Metric::MergeVelocity => 0.30,
        Metric::DefectRecovery => 0.25,
        Metric::SubtractionRatio => 0.15,
        Metric::DocTestDepth => 0.15,
        Metric::CycleTime => 0.15,
    }
}
