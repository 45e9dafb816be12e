use crate::Kmh;

/// Posted speed limit of an edge as found in the source data.
///
/// Source data carries this value as free text: it can be absent, a plain
/// number, or anything else (`"50 mph"`, `"signals"`, a list of values).
/// Only a finite, strictly positive number counts as a posted limit.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SpeedTag {
    #[default]
    Missing,
    Posted(Kmh),
    Malformed(String),
}

impl SpeedTag {
    /// Classify a raw speed value. Empty strings and pandas-style `nan`
    /// markers are treated as missing.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || matches!(trimmed, "nan" | "NaN" | "None" | "null") {
            return SpeedTag::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(speed) if speed.is_finite() && speed > 0.0 => SpeedTag::Posted(speed),
            _ => SpeedTag::Malformed(trimmed.to_string()),
        }
    }

    pub fn from_value(speed: Option<f64>) -> Self {
        match speed {
            None => SpeedTag::Missing,
            Some(speed) if speed.is_finite() && speed > 0.0 => SpeedTag::Posted(speed),
            Some(speed) => SpeedTag::Malformed(speed.to_string()),
        }
    }

    /// The posted speed if it can be used for weighting
    pub fn usable(&self) -> Option<Kmh> {
        match self {
            SpeedTag::Posted(speed) => Some(*speed),
            SpeedTag::Missing | SpeedTag::Malformed(_) => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, SpeedTag::Malformed(_))
    }
}
