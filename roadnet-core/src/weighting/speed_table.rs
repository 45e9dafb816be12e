use std::collections::BTreeMap;

use crate::{DEFAULT_SPEED_KMH, Error, Kmh, model::RoadClass};

/// Built-in speed for a road class, `None` where the fallback applies
pub fn default_speed(class: &RoadClass) -> Option<Kmh> {
    match class {
        RoadClass::Motorway => Some(110.0),
        RoadClass::MotorwayLink => Some(100.0),
        RoadClass::Primary | RoadClass::PrimaryLink => Some(90.0),
        RoadClass::Trunk
        | RoadClass::TrunkLink
        | RoadClass::Secondary
        | RoadClass::SecondaryLink => Some(80.0),
        RoadClass::Residential | RoadClass::Steps | RoadClass::Path | RoadClass::LivingStreet => {
            Some(10.0)
        }
        _ => None,
    }
}

/// Road class to default speed lookup, used when an edge has no usable
/// posted speed. Total: every class resolves to a positive speed.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedTable {
    fallback: Kmh,
    overrides: BTreeMap<RoadClass, Kmh>,
}

impl Default for SpeedTable {
    fn default() -> Self {
        Self {
            fallback: DEFAULT_SPEED_KMH,
            overrides: BTreeMap::new(),
        }
    }
}

impl SpeedTable {
    /// # Errors
    ///
    /// Returns an error if the fallback or any override is not a finite,
    /// strictly positive speed.
    pub fn new(fallback: Kmh, overrides: BTreeMap<RoadClass, Kmh>) -> Result<Self, Error> {
        if !is_valid_speed(fallback) {
            return Err(Error::InvalidData(format!(
                "Fallback speed must be positive, got {fallback}"
            )));
        }
        if let Some((class, speed)) = overrides.iter().find(|(_, speed)| !is_valid_speed(**speed))
        {
            return Err(Error::InvalidData(format!(
                "Speed override for {class} must be positive, got {speed}"
            )));
        }
        Ok(Self {
            fallback,
            overrides,
        })
    }

    pub fn speed_for(&self, class: &RoadClass) -> Kmh {
        self.overrides
            .get(class)
            .copied()
            .or_else(|| default_speed(class))
            .unwrap_or(self.fallback)
    }

    pub fn fallback(&self) -> Kmh {
        self.fallback
    }
}

fn is_valid_speed(speed: Kmh) -> bool {
    speed.is_finite() && speed > 0.0
}
