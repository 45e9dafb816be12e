use serde::Deserialize;

use super::de::{deserialize_road_class, deserialize_speed_tag};
use crate::{
    NodeId,
    model::{RawEdge, RoadClass, RoadNode, SpeedTag},
};

/// Row of the nodes file. Column names of an osmnx export are accepted as
/// aliases.
#[derive(Debug, Deserialize)]
pub struct NodeRecord {
    #[serde(alias = "osmid")]
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
}

/// Row of the edges file. Additional columns are ignored.
#[derive(Debug, Deserialize)]
pub struct EdgeRecord {
    #[serde(alias = "u")]
    pub source: NodeId,
    #[serde(alias = "v")]
    pub target: NodeId,
    pub length: f64,
    #[serde(alias = "road_class", deserialize_with = "deserialize_road_class")]
    pub highway: RoadClass,
    #[serde(default, deserialize_with = "deserialize_speed_tag")]
    pub maxspeed: SpeedTag,
}

impl From<NodeRecord> for RoadNode {
    fn from(record: NodeRecord) -> Self {
        RoadNode::new(record.id, record.x, record.y)
    }
}

impl From<EdgeRecord> for RawEdge {
    fn from(record: EdgeRecord) -> Self {
        RawEdge::new(record.source, record.target, record.length, record.highway)
            .with_posted_speed(record.maxspeed)
    }
}
