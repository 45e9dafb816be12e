//! Snapping coordinates to the road graph and simple spatial derivations
//! used to pick query endpoints.

use geo::{Centroid, ConvexHull, MultiPoint, Point};
use rayon::prelude::*;

use crate::{Error, Meters, NodeId, RoadGraph};

/// Nearest node to `point` by Euclidean distance, ties broken by the lowest
/// node id. The point must be in the graph's projected coordinate space.
///
/// # Errors
///
/// [`Error::EmptyGraph`] if the graph has no nodes, [`Error::InvalidData`]
/// for a non-finite query point.
pub fn nearest_node(graph: &RoadGraph, point: &Point<f64>) -> Result<(NodeId, Meters), Error> {
    if !point.x().is_finite() || !point.y().is_finite() {
        return Err(Error::InvalidData(format!(
            "Query point ({}, {}) is not finite",
            point.x(),
            point.y()
        )));
    }

    let query = [point.x(), point.y()];
    let mut candidates = graph.rtree().nearest_neighbor_iter_with_distance_2(&query);
    let (first, best_distance_2) = candidates.next().ok_or(Error::EmptyGraph)?;

    // node index order matches id order
    let best = candidates
        .take_while(|(_, distance_2)| *distance_2 == best_distance_2)
        .fold(first.data, |best, (candidate, _)| best.min(candidate.data));

    Ok((graph.id_of(best), best_distance_2.sqrt()))
}

/// [`nearest_node`] for many points at once, in input order
pub fn nearest_nodes(
    graph: &RoadGraph,
    points: &[Point<f64>],
) -> Vec<Result<(NodeId, Meters), Error>> {
    points
        .par_iter()
        .map(|point| nearest_node(graph, point))
        .collect()
}

/// Centroid of the convex hull around all nodes
pub fn network_centroid(graph: &RoadGraph) -> Option<Point<f64>> {
    if graph.is_empty() {
        return None;
    }
    let points: MultiPoint = graph.nodes().map(|node| node.geometry).collect();
    points.convex_hull().centroid()
}

/// Node with the largest `y` coordinate, ties broken by the lowest node id
pub fn northernmost_node(graph: &RoadGraph) -> Option<NodeId> {
    graph
        .nodes()
        .min_by(|a, b| b.geometry.y().total_cmp(&a.geometry.y()))
        .map(|node| node.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RoadNode;

    fn graph(nodes: Vec<RoadNode>) -> RoadGraph {
        RoadGraph::new(nodes, vec![]).unwrap()
    }

    #[test]
    fn empty_graph_fails() {
        let err = nearest_node(&graph(vec![]), &Point::new(0.0, 0.0)).unwrap_err();
        assert!(matches!(err, Error::EmptyGraph));
    }

    #[test]
    fn single_node_returns_distance() {
        let graph = graph(vec![RoadNode::new(42, 3.0, 4.0)]);
        let (id, distance) = nearest_node(&graph, &Point::new(0.0, 0.0)).unwrap();
        assert_eq!(id, 42);
        assert!((distance - 5.0).abs() < 1e-12);
    }

    #[test]
    fn picks_closest_node() {
        let graph = graph(vec![
            RoadNode::new(1, 0.0, 0.0),
            RoadNode::new(2, 10.0, 0.0),
            RoadNode::new(3, 10.0, 10.0),
        ]);
        let (id, distance) = nearest_node(&graph, &Point::new(9.0, 1.0)).unwrap();
        assert_eq!(id, 2);
        assert!((distance - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn ties_go_to_lowest_id() {
        let graph = graph(vec![
            RoadNode::new(9, -1.0, 0.0),
            RoadNode::new(4, 1.0, 0.0),
            RoadNode::new(7, 0.0, 1.0),
        ]);
        let (id, distance) = nearest_node(&graph, &Point::new(0.0, 0.0)).unwrap();
        assert_eq!(id, 4);
        assert_eq!(distance, 1.0);
    }

    #[test]
    fn rejects_non_finite_query() {
        let graph = graph(vec![RoadNode::new(1, 0.0, 0.0)]);
        assert!(nearest_node(&graph, &Point::new(f64::NAN, 0.0)).is_err());
    }

    #[test]
    fn batch_lookup_keeps_order() {
        let graph = graph(vec![RoadNode::new(1, 0.0, 0.0), RoadNode::new(2, 100.0, 0.0)]);
        let results = nearest_nodes(&graph, &[Point::new(90.0, 0.0), Point::new(5.0, 0.0)]);
        let ids: Vec<_> = results.into_iter().map(|r| r.unwrap().0).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn centroid_of_square() {
        let graph = graph(vec![
            RoadNode::new(1, 0.0, 0.0),
            RoadNode::new(2, 10.0, 0.0),
            RoadNode::new(3, 10.0, 10.0),
            RoadNode::new(4, 0.0, 10.0),
            RoadNode::new(5, 2.0, 3.0),
        ]);
        let centroid = network_centroid(&graph).unwrap();
        assert!((centroid.x() - 5.0).abs() < 1e-9);
        assert!((centroid.y() - 5.0).abs() < 1e-9);
        assert!(network_centroid(&RoadGraph::new(vec![], vec![]).unwrap()).is_none());
    }

    #[test]
    fn northernmost_prefers_lowest_id() {
        let graph = graph(vec![
            RoadNode::new(8, 0.0, 50.0),
            RoadNode::new(3, 5.0, 50.0),
            RoadNode::new(1, 5.0, 10.0),
        ]);
        assert_eq!(northernmost_node(&graph), Some(3));
    }
}
