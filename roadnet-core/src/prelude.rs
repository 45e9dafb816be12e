pub use crate::DEFAULT_SPEED_KMH;

// Re-export key components
pub use crate::algo::centrality::{
    CancellationToken, CentralityConfig, CentralityResult, NodeCentrality, centrality,
};
pub use crate::export::{centrality_to_geojson, edges_to_geojson};
pub use crate::loading::{NetworkConfig, create_road_network};
pub use crate::model::{NetworkSummary, RoadClass, RoadEdge, RoadGraph, SpeedTag};
pub use crate::routing::{Route, WeightSelector, shortest_path, shortest_path_lengths};
pub use crate::spatial::{nearest_node, network_centroid, northernmost_node};
pub use crate::weighting::{SpeedPolicy, SpeedTable, WeightComputer, WeightingConfig};

// Core types for the road network
pub use crate::Kmh;
pub use crate::Meters;
pub use crate::Minutes; // travel time
pub use crate::NodeId;
