use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::SpeedTable;
use crate::{DEFAULT_SPEED_KMH, Error, Kmh, model::RoadClass};

/// How a posted speed that is present but unusable is handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedPolicy {
    /// fall back to the speed table, as for a missing tag
    #[default]
    Lenient,
    /// fail weighting with [`Error::InvalidSpeedTag`]
    Strict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightingConfig {
    pub fallback_speed_kmh: Kmh,
    pub speed_overrides: BTreeMap<RoadClass, Kmh>,
    /// classes removed from the network before weighting
    pub excluded_classes: Vec<RoadClass>,
    pub speed_policy: SpeedPolicy,
}

impl Default for WeightingConfig {
    fn default() -> Self {
        Self {
            fallback_speed_kmh: DEFAULT_SPEED_KMH,
            speed_overrides: BTreeMap::new(),
            excluded_classes: vec![
                RoadClass::Cycleway,
                RoadClass::Footway,
                RoadClass::Pedestrian,
                RoadClass::Other("trail".to_string()),
                RoadClass::Crossing,
            ],
            speed_policy: SpeedPolicy::default(),
        }
    }
}

impl WeightingConfig {
    /// # Errors
    ///
    /// Returns an error if a configured speed is not positive
    pub fn speed_table(&self) -> Result<SpeedTable, Error> {
        SpeedTable::new(self.fallback_speed_kmh, self.speed_overrides.clone())
    }
}
