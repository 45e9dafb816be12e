use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// Road classification of an edge, modelled on the OSM `highway` key.
/// see <https://wiki.openstreetmap.org/wiki/Key:highway> for details.
///
/// Tags that are not listed here are kept verbatim in [`RoadClass::Other`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(from = "String", into = "String")]
pub enum RoadClass {
    Motorway,
    MotorwayLink,
    Trunk,
    TrunkLink,
    Primary,
    PrimaryLink,
    Secondary,
    SecondaryLink,
    Tertiary,
    TertiaryLink,
    Unclassified,
    Residential,
    LivingStreet,
    Service,
    Road,
    Track,
    Steps,
    Path,
    Footway,
    Cycleway,
    Pedestrian,
    Bridleway,
    Crossing,
    Other(String),
}

impl RoadClass {
    /// false for tags that did not match any known classification
    pub fn is_recognized(&self) -> bool {
        !matches!(self, RoadClass::Other(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            RoadClass::Motorway => "motorway",
            RoadClass::MotorwayLink => "motorway_link",
            RoadClass::Trunk => "trunk",
            RoadClass::TrunkLink => "trunk_link",
            RoadClass::Primary => "primary",
            RoadClass::PrimaryLink => "primary_link",
            RoadClass::Secondary => "secondary",
            RoadClass::SecondaryLink => "secondary_link",
            RoadClass::Tertiary => "tertiary",
            RoadClass::TertiaryLink => "tertiary_link",
            RoadClass::Unclassified => "unclassified",
            RoadClass::Residential => "residential",
            RoadClass::LivingStreet => "living_street",
            RoadClass::Service => "service",
            RoadClass::Road => "road",
            RoadClass::Track => "track",
            RoadClass::Steps => "steps",
            RoadClass::Path => "path",
            RoadClass::Footway => "footway",
            RoadClass::Cycleway => "cycleway",
            RoadClass::Pedestrian => "pedestrian",
            RoadClass::Bridleway => "bridleway",
            RoadClass::Crossing => "crossing",
            RoadClass::Other(tag) => tag,
        }
    }
}

impl Display for RoadClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoadClass {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        // separators are dropped so that "motorway link" or "livingstreet"
        // still match the canonical tag
        let class = match normalized.replace(['_', ' ', '-'], "").as_str() {
            "motorway" => RoadClass::Motorway,
            "motorwaylink" => RoadClass::MotorwayLink,
            "trunk" => RoadClass::Trunk,
            "trunklink" => RoadClass::TrunkLink,
            "primary" => RoadClass::Primary,
            "primarylink" => RoadClass::PrimaryLink,
            "secondary" => RoadClass::Secondary,
            "secondarylink" => RoadClass::SecondaryLink,
            "tertiary" => RoadClass::Tertiary,
            "tertiarylink" => RoadClass::TertiaryLink,
            "unclassified" => RoadClass::Unclassified,
            "residential" => RoadClass::Residential,
            "livingstreet" => RoadClass::LivingStreet,
            "service" => RoadClass::Service,
            "road" => RoadClass::Road,
            "track" => RoadClass::Track,
            "steps" => RoadClass::Steps,
            "path" => RoadClass::Path,
            "footway" => RoadClass::Footway,
            "cycleway" => RoadClass::Cycleway,
            "pedestrian" => RoadClass::Pedestrian,
            "bridleway" => RoadClass::Bridleway,
            "crossing" => RoadClass::Crossing,
            _ => RoadClass::Other(normalized),
        };
        Ok(class)
    }
}

impl From<String> for RoadClass {
    fn from(value: String) -> Self {
        let Ok(class) = value.parse::<RoadClass>();
        class
    }
}

impl From<&str> for RoadClass {
    fn from(value: &str) -> Self {
        let Ok(class) = value.parse::<RoadClass>();
        class
    }
}

impl From<RoadClass> for String {
    fn from(value: RoadClass) -> Self {
        value.to_string()
    }
}
