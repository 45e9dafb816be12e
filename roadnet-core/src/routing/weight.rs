use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, model::RoadEdge};

/// Cost assigned to an edge by a shortest-path or centrality query
pub trait EdgeWeight {
    fn weight(&self, edge: &RoadEdge) -> f64;
}

impl<F> EdgeWeight for F
where
    F: Fn(&RoadEdge) -> f64,
{
    fn weight(&self, edge: &RoadEdge) -> f64 {
        self(edge)
    }
}

/// Built-in cost models
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeightSelector {
    /// edge length in meters
    #[default]
    Distance,
    /// travel time in minutes
    TravelTime,
}

impl EdgeWeight for WeightSelector {
    fn weight(&self, edge: &RoadEdge) -> f64 {
        match self {
            WeightSelector::Distance => edge.length,
            WeightSelector::TravelTime => edge.travel_time,
        }
    }
}

impl Display for WeightSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeightSelector::Distance => write!(f, "distance"),
            WeightSelector::TravelTime => write!(f, "travel-time"),
        }
    }
}

impl FromStr for WeightSelector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "distance" | "length" => Ok(WeightSelector::Distance),
            "travel-time" | "travel_time" | "time" => Ok(WeightSelector::TravelTime),
            other => Err(Error::InvalidData(format!("Unknown weight selector {other:?}"))),
        }
    }
}
