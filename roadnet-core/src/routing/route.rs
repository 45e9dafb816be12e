use geo::LineString;

use crate::{Meters, Minutes, NodeId};

/// Result of a shortest-path query: the node sequence from source to
/// target and its totals. Routes are never modified after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub(crate) nodes: Vec<NodeId>,
    pub(crate) cost: f64,
    pub(crate) length: Meters,
    pub(crate) travel_time: Minutes,
    pub(crate) geometry: LineString<f64>,
}

impl Route {
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Total cost under the weight the route was computed with
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Total length in meters
    pub fn length(&self) -> Meters {
        self.length
    }

    /// Total travel time in minutes
    pub fn travel_time(&self) -> Minutes {
        self.travel_time
    }

    pub fn source(&self) -> NodeId {
        self.nodes[0]
    }

    pub fn target(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Node coordinates along the route
    pub fn geometry(&self) -> &LineString<f64> {
        &self.geometry
    }
}
