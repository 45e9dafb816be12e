//! Road network components - nodes, raw edges and weighted edges

use geo::Point;
use serde::Serialize;

use crate::{Kmh, Meters, Minutes, NodeId};

use crate::model::{RoadClass, SpeedTag};

/// Road graph node
#[derive(Debug, Clone, PartialEq)]
pub struct RoadNode {
    /// Source id of the node
    pub id: NodeId,
    /// Projected coordinates in meters
    pub geometry: Point<f64>,
}

impl RoadNode {
    pub fn new(id: NodeId, x: f64, y: f64) -> Self {
        Self {
            id,
            geometry: Point::new(x, y),
        }
    }
}

/// Directed road segment as ingested, before weighting
#[derive(Debug, Clone, PartialEq)]
pub struct RawEdge {
    pub source: NodeId,
    pub target: NodeId,
    pub length: Meters,
    pub road_class: RoadClass,
    pub posted_speed: SpeedTag,
}

impl RawEdge {
    pub fn new(source: NodeId, target: NodeId, length: Meters, road_class: RoadClass) -> Self {
        Self {
            source,
            target,
            length,
            road_class,
            posted_speed: SpeedTag::Missing,
        }
    }

    #[must_use]
    pub fn with_posted_speed(mut self, posted_speed: SpeedTag) -> Self {
        self.posted_speed = posted_speed;
        self
    }

    /// Same segment travelled in the opposite direction
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            source: self.target,
            target: self.source,
            ..self.clone()
        }
    }
}

/// Where the effective speed of an edge came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedSource {
    Posted,
    Inferred,
}

/// Directed road segment annotated with its effective speed and travel time
#[derive(Debug, Clone, PartialEq)]
pub struct RoadEdge {
    pub source: NodeId,
    pub target: NodeId,
    pub length: Meters,
    pub road_class: RoadClass,
    pub posted_speed: SpeedTag,
    pub effective_speed: Kmh,
    pub speed_source: SpeedSource,
    pub travel_time: Minutes,
}

impl RoadEdge {
    pub fn length(&self) -> Meters {
        self.length
    }

    pub fn travel_time(&self) -> Minutes {
        self.travel_time
    }

    /// The ingested form of this edge, without derived attributes
    pub fn to_raw(&self) -> RawEdge {
        RawEdge {
            source: self.source,
            target: self.target,
            length: self.length,
            road_class: self.road_class.clone(),
            posted_speed: self.posted_speed.clone(),
        }
    }
}
