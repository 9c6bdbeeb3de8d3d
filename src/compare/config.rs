use crate::solver::VertexOrder;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_LOG_PATH: &str = "graph_data.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("timeout must be at least one second")]
    ZeroTimeout,

    #[error("at least one greedy vertex order is required")]
    NoOrders,
}

/// Settings for one comparison run. Every field has a default, so a TOML
/// file only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Wall-clock bound on the exhaustive search, in seconds.
    pub timeout_secs: u64,
    /// Greedy passes to run, one coloring each, in this order.
    pub orders: Vec<VertexOrder>,
    pub log_path: PathBuf,
}

impl Default for CompareConfig {
    fn default() -> Self {
        CompareConfig {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            orders: vec![VertexOrder::Natural],
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
        }
    }
}

impl CompareConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: CompareConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Settings from `path` when one is given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.orders.is_empty() {
            return Err(ConfigError::NoOrders);
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = CompareConfig::from_toml_str("").unwrap();
        assert_eq!(config, CompareConfig::default());
        assert_eq!(config.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn overrides_selected_fields() {
        let config = CompareConfig::from_toml_str(
            "timeout_secs = 5\norders = [\"natural\", \"largest-degree-first\"]\n",
        )
        .unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(
            config.orders,
            vec![VertexOrder::Natural, VertexOrder::LargestDegreeFirst]
        );
        assert_eq!(config.log_path, PathBuf::from(DEFAULT_LOG_PATH));
    }

    #[test]
    fn log_path_comes_from_the_file_or_the_default() {
        assert_eq!(
            CompareConfig::load_or_default(None).unwrap().log_path,
            PathBuf::from(DEFAULT_LOG_PATH)
        );

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("compare.toml");
        fs::write(&path, "log_path = \"runs/history.json\"\n").unwrap();
        let config = CompareConfig::load_or_default(Some(&path)).unwrap();
        assert_eq!(config.log_path, PathBuf::from("runs/history.json"));
        assert_eq!(config.orders, vec![VertexOrder::Natural]);
    }

    #[test]
    fn rejects_zero_timeout_and_bad_keys() {
        assert!(matches!(
            CompareConfig::from_toml_str("timeout_secs = 0"),
            Err(ConfigError::ZeroTimeout)
        ));
        assert!(matches!(
            CompareConfig::from_toml_str("orders = []"),
            Err(ConfigError::NoOrders)
        ));
        assert!(matches!(
            CompareConfig::from_toml_str("timeout_secs = \"soon\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
