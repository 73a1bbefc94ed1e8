use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::model::targets::TargetTable;
use crate::model::weights::WeightTable;

pub mod loader;

pub use loader::YamlConfig;

pub const DEFAULT_CONFIG_PATH: &str = "eff.config.yaml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file {} not found", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Where weight and target tables come from. Implementations never fail:
/// anything unusable falls back to the built-in tables.
pub trait ConfigSource {
    fn load_weights(&self) -> WeightTable;

    fn load_targets(&self) -> TargetTable {
        TargetTable::default_v1()
    }
}

/// Built-in tables only.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinConfig;

impl ConfigSource for BuiltinConfig {
    fn load_weights(&self) -> WeightTable {
        WeightTable::default_v1()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawConfig {
    #[serde(default)]
    pub scoring: RawScoring,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawScoring {
    #[serde(default)]
    pub weights: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub targets: Option<BTreeMap<String, f64>>,
}

#[cfg(test)]
#[path = "../../tests/src_inline/config/tests.rs"]
mod tests;
