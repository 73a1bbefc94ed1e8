use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    MergeVelocity,
    DefectRecovery,
    SubtractionRatio,
    DocTestDepth,
    CycleTime,
}

/// Canonical metric order used for scoring, logging and rendering.
pub fn metric_order() -> &'static [Metric] {
    &[
        Metric::MergeVelocity,
        Metric::DefectRecovery,
        Metric::SubtractionRatio,
        Metric::DocTestDepth,
        Metric::CycleTime,
    ]
}

impl Metric {
    pub fn as_str(self) -> &'static str {
        match self {
            Metric::MergeVelocity => "merge_velocity",
            Metric::DefectRecovery => "defect_recovery",
            Metric::SubtractionRatio => "subtraction_ratio",
            Metric::DocTestDepth => "doc_test_depth",
            Metric::CycleTime => "cycle_time",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        metric_order().iter().copied().find(|m| m.as_str() == name)
    }

    /// Polarity is a property of the metric itself; only targets are tunable.
    pub fn polarity(self) -> Polarity {
        match self {
            Metric::MergeVelocity | Metric::SubtractionRatio | Metric::DocTestDepth => {
                Polarity::HigherIsBetter
            }
            Metric::DefectRecovery | Metric::CycleTime => Polarity::LowerIsBetter,
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    HigherIsBetter,
    LowerIsBetter,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricDefinition {
    pub metric: Metric,
    pub target: f64,
    pub polarity: Polarity,
}

impl MetricDefinition {
    pub fn new(metric: Metric, target: f64) -> Self {
        Self {
            metric,
            target,
            polarity: metric.polarity(),
        }
    }
}

/// Observed values per metric. A metric that could not be measured is
/// `None`, or missing from the map entirely; it is never stored as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricObservations {
    values: BTreeMap<Metric, Option<f64>>,
}

impl MetricObservations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, metric: Metric, value: Option<f64>) -> Self {
        self.set(metric, value);
        self
    }

    pub fn set(&mut self, metric: Metric, value: Option<f64>) {
        self.values.insert(metric, value);
    }

    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.values.get(&metric).copied().flatten()
    }

    pub fn present_count(&self) -> usize {
        self.values.values().filter(|v| v.is_some()).count()
    }
}

impl FromIterator<(Metric, Option<f64>)> for MetricObservations {
    fn from_iter<I: IntoIterator<Item = (Metric, Option<f64>)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/metrics.rs"]
mod tests;
