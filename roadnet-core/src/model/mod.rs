//! Data model of the road network
//!
//! Contains the road classification and speed tag types, ingested network
//! data and the weighted, immutable road graph.

pub mod road_class;
pub mod speed_tag;
pub mod streets;
pub mod summary;

pub use road_class::RoadClass;
pub use speed_tag::SpeedTag;
pub use streets::{
    IndexedPoint, RawEdge, RoadEdge, RoadGraph, RoadNetworkData, RoadNode, SpeedSource,
};
pub use summary::{ClassStats, NetworkSummary};
