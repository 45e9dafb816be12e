use std::fs;
use std::path::Path;

use anyhow::Context;
use roadnet_core::{NetworkConfig, WeightSelector};
use serde::{Deserialize, Serialize};

/// Contents of the `--config` TOML file
///
/// ```toml
/// [network]
/// nodes_path = "nodes.csv"
/// edges_path = "edges.csv"
/// bidirectional = true
///
/// [network.weighting]
/// speed_policy = "strict"
/// speed_overrides = { motorway = 130.0 }
///
/// [centrality]
/// weight = "travel-time"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub network: NetworkConfig,
    #[serde(default)]
    pub centrality: CentralitySettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CentralitySettings {
    pub weight: WeightSelector,
    /// rows printed by the `centrality` command
    pub top: usize,
    /// give up on the computation after this many seconds
    pub timeout_secs: Option<u64>,
}

impl Default for CentralitySettings {
    fn default() -> Self {
        Self {
            weight: WeightSelector::Distance,
            top: 10,
            timeout_secs: None,
        }
    }
}

impl AppConfig {
    pub fn new(network: NetworkConfig) -> Self {
        Self {
            network,
            centrality: CentralitySettings::default(),
        }
    }

    /// Reads the file and resolves relative input paths against its directory
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config '{}'", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("Invalid config '{}'", path.display()))?;

        Ok(match path.parent() {
            Some(base) => config.relative_to(base),
            None => config,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    #[must_use]
    pub fn relative_to(mut self, base: &Path) -> Self {
        for path in [&mut self.network.nodes_path, &mut self.network.edges_path] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }
}
