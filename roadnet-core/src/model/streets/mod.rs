//! Road network components and the weighted road graph

pub mod components;
pub mod network;

pub use components::{RawEdge, RoadEdge, RoadNode, SpeedSource};
pub use network::{IndexedPoint, RoadGraph, RoadNetworkData};
