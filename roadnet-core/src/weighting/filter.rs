use hashbrown::HashSet;
use log::info;

use crate::{
    NodeId,
    model::{RoadClass, RoadNetworkData},
};

/// Remove edges whose class is excluded from vehicle routing.
///
/// Nodes left without any incident edge by the removal are dropped as well;
/// nodes that had no edges to begin with are kept.
pub fn filter_drivable(data: &RoadNetworkData, excluded: &[RoadClass]) -> RoadNetworkData {
    let (kept, removed): (Vec<_>, Vec<_>) = data
        .edges()
        .iter()
        .partition(|edge| !excluded.contains(&edge.road_class));

    if removed.is_empty() {
        return data.clone();
    }

    let touched: HashSet<NodeId> = removed
        .iter()
        .flat_map(|edge| [edge.source, edge.target])
        .collect();
    let still_connected: HashSet<NodeId> = kept
        .iter()
        .flat_map(|edge| [edge.source, edge.target])
        .collect();

    let nodes: Vec<_> = data
        .nodes()
        .iter()
        .filter(|node| !touched.contains(&node.id) || still_connected.contains(&node.id))
        .cloned()
        .collect();

    info!(
        "Excluded {} non-drivable edges and {} orphaned nodes",
        removed.len(),
        data.nodes().len() - nodes.len()
    );

    RoadNetworkData::from_validated(nodes, kept.into_iter().cloned().collect())
}
