//! Road network weighting, routing and centrality engine.
//!
//! A raw street graph is ingested, filtered to drivable roads and weighted
//! with an effective speed and travel time per edge. The resulting
//! [`RoadGraph`] is immutable and can be shared between any number of
//! shortest-path, nearest-node and centrality queries.

pub mod algo;
pub mod error;
pub mod export;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;
pub mod spatial;
pub mod weighting;

pub use algo::centrality::{
    CancellationToken, CentralityConfig, CentralityResult, NodeCentrality, centrality,
};
pub use error::Error;
pub use loading::{NetworkConfig, build_road_graph, create_road_network};
pub use model::{
    NetworkSummary, RawEdge, RoadClass, RoadEdge, RoadGraph, RoadNetworkData, RoadNode,
    SpeedSource, SpeedTag,
};
pub use routing::{EdgeWeight, Route, WeightSelector, shortest_path, shortest_path_lengths};
pub use spatial::{nearest_node, nearest_nodes, network_centroid, northernmost_node};
pub use weighting::{SpeedPolicy, SpeedTable, WeightComputer, WeightingConfig};

/// Identifier of a node as it appears in the source data (e.g. an OSM id)
pub type NodeId = i64;
/// Length in meters
pub type Meters = f64;
/// Speed in kilometers per hour
pub type Kmh = f64;
/// Travel time in minutes
pub type Minutes = f64;

/// Speed used for any road class the speed table does not list
pub const DEFAULT_SPEED_KMH: Kmh = 60.0;
