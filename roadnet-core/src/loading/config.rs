use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::weighting::WeightingConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// CSV with `id,x,y` columns (projected meters)
    pub nodes_path: PathBuf,
    /// CSV with `source,target,length,highway,maxspeed` columns
    pub edges_path: PathBuf,
    /// insert every input edge in both directions
    #[serde(default)]
    pub bidirectional: bool,
    #[serde(default)]
    pub weighting: WeightingConfig,
}

impl NetworkConfig {
    pub fn new(nodes_path: impl Into<PathBuf>, edges_path: impl Into<PathBuf>) -> Self {
        Self {
            nodes_path: nodes_path.into(),
            edges_path: edges_path.into(),
            bidirectional: false,
            weighting: WeightingConfig::default(),
        }
    }
}
