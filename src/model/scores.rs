use std::collections::BTreeMap;

use crate::model::metrics::Metric;

/// Result of one scoring pass. Built once by the scorer and read through
/// accessors afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRecord {
    per_metric: BTreeMap<Metric, Option<f64>>,
    composite: Option<f64>,
}

impl ScoreRecord {
    pub(crate) fn new(per_metric: BTreeMap<Metric, Option<f64>>, composite: Option<f64>) -> Self {
        Self {
            per_metric,
            composite,
        }
    }

    pub fn score(&self, metric: Metric) -> Option<f64> {
        self.per_metric.get(&metric).copied().flatten()
    }

    pub fn per_metric(&self) -> &BTreeMap<Metric, Option<f64>> {
        &self.per_metric
    }

    pub fn composite(&self) -> Option<f64> {
        self.composite
    }
}

pub fn clip01(x: f64) -> f64 {
    if x < 0.0 {
        0.0
    } else if x > 1.0 {
        1.0
    } else {
        x
    }
}
