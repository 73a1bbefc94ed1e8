use std::collections::BTreeMap;

use crate::model::metrics::{Metric, MetricDefinition, metric_order};

#[derive(Debug, Clone, PartialEq)]
pub struct TargetTable {
    definitions: BTreeMap<Metric, MetricDefinition>,
}

impl TargetTable {
    pub fn default_v1() -> Self {
        let definitions = metric_order()
            .iter()
            .map(|&m| (m, MetricDefinition::new(m, default_target(m))))
            .collect();
        Self { definitions }
    }

    /// Starts from `default_v1` and replaces the target value of every
    /// metric present in `overrides`. Polarity is never overridden.
    pub fn with_overrides(overrides: &BTreeMap<Metric, f64>) -> Self {
        let mut table = Self::default_v1();
        for (&metric, &target) in overrides {
            table
                .definitions
                .insert(metric, MetricDefinition::new(metric, target));
        }
        table
    }

    pub fn get(&self, metric: Metric) -> Option<&MetricDefinition> {
        self.definitions.get(&metric)
    }

    pub fn target(&self, metric: Metric) -> f64 {
        self.get(metric)
            .map(|d| d.target)
            .unwrap_or_else(|| default_target(metric))
    }

    /// Plain `metric -> target` view used by the metrics log.
    pub fn values(&self) -> BTreeMap<Metric, f64> {
        self.definitions
            .iter()
            .map(|(&m, d)| (m, d.target))
            .collect()
    }
}

impl Default for TargetTable {
    fn default() -> Self {
        Self::default_v1()
    }
}

pub fn default_target(metric: Metric) -> f64 {
    match metric {
        // merged PRs per week
        Metric::MergeVelocity => 5.0,
        // hours
        Metric::DefectRecovery => 24.0,
        Metric::SubtractionRatio => 0.20,
        Metric::DocTestDepth => 0.80,
        // hours
        Metric::CycleTime => 48.0,
    }
}
