#![allow(dead_code)]

use roadnet_core::{NodeId, RawEdge, RoadClass, RoadGraph, RoadNode, WeightComputer};

pub fn graph_from(
    nodes: &[(NodeId, f64, f64)],
    edges: &[(NodeId, NodeId, f64, &str)],
) -> RoadGraph {
    let nodes = nodes
        .iter()
        .map(|&(id, x, y)| RoadNode::new(id, x, y))
        .collect();
    let raw: Vec<_> = edges
        .iter()
        .map(|&(source, target, length, class)| {
            RawEdge::new(source, target, length, RoadClass::from(class))
        })
        .collect();
    let edges = WeightComputer::default().weigh_all(&raw).unwrap();
    RoadGraph::new(nodes, edges).unwrap()
}

pub type EdgeSpec = (NodeId, NodeId, f64, &'static str);

/// Every edge in both directions
pub fn undirected(edges: &[EdgeSpec]) -> Vec<EdgeSpec> {
    edges
        .iter()
        .flat_map(|&(a, b, length, class)| [(a, b, length, class), (b, a, length, class)])
        .collect()
}

pub fn assert_close(actual: f64, expected: f64) {
    let tolerance = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}
