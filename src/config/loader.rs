use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::config::{ConfigError, ConfigSource, RawConfig, RawScoring};
use crate::model::metrics::Metric;
use crate::model::targets::TargetTable;
use crate::model::weights::WeightTable;

/// `scoring.weights` / `scoring.targets` read from a YAML file. The file is
/// parsed once at construction; a missing or malformed file leaves the
/// built-in tables in effect.
#[derive(Debug, Clone)]
pub struct YamlConfig {
    scoring: Option<RawScoring>,
}

impl YamlConfig {
    pub fn open(path: impl AsRef<Path>) -> Self {
        let scoring = match read_scoring(path.as_ref()) {
            Ok(scoring) => Some(scoring),
            Err(ConfigError::NotFound(p)) => {
                tracing::debug!("{} not found; using default weights", p.display());
                None
            }
            Err(err) => {
                tracing::warn!("{err}; using default weights and targets");
                None
            }
        };
        Self { scoring }
    }
}

impl ConfigSource for YamlConfig {
    fn load_weights(&self) -> WeightTable {
        match self.scoring.as_ref().and_then(|s| s.weights.as_ref()) {
            Some(raw) => WeightTable::from_partial(&resolve_metric_keys(raw, "weights")),
            None => WeightTable::default_v1(),
        }
    }

    fn load_targets(&self) -> TargetTable {
        match self.scoring.as_ref().and_then(|s| s.targets.as_ref()) {
            Some(raw) => TargetTable::with_overrides(&resolve_metric_keys(raw, "targets")),
            None => TargetTable::default_v1(),
        }
    }
}

fn read_scoring(path: &Path) -> Result<RawScoring, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_scoring(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn parse_scoring(contents: &str) -> Result<RawScoring, serde_yaml::Error> {
    if contents.trim().is_empty() {
        return Ok(RawScoring::default());
    }
    let raw: Option<RawConfig> = serde_yaml::from_str(contents)?;
    Ok(raw.map(|c| c.scoring).unwrap_or_default())
}

fn resolve_metric_keys(raw: &BTreeMap<String, f64>, table: &str) -> BTreeMap<Metric, f64> {
    let mut out = BTreeMap::new();
    for (name, &value) in raw {
        match Metric::from_name(name) {
            Some(metric) if value.is_finite() => {
                out.insert(metric, value);
            }
            Some(_) => tracing::warn!(
                "ignoring non-finite value {value} for {name:?} in scoring.{table}; using default"
            ),
            None => tracing::warn!("ignoring unknown metric {name:?} in scoring.{table}"),
        }
    }
    out
}
