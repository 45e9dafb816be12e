mod common;

use common::{assert_close, graph_from};
use rand::{Rng, SeedableRng, rngs::StdRng};
use roadnet_core::{
    EdgeWeight, Error, NodeId, RoadEdge, RoadGraph, WeightSelector, shortest_path,
};

const CLASSES: [&str; 5] = ["motorway", "primary", "secondary", "residential", "tertiary"];

fn random_graph(rng: &mut StdRng, node_count: i64) -> RoadGraph {
    let nodes: Vec<_> = (0..node_count)
        .map(|id| (id, rng.random_range(0.0..1000.0), rng.random_range(0.0..1000.0)))
        .collect();
    let mut edges = Vec::new();
    for source in 0..node_count {
        for target in 0..node_count {
            if source != target && rng.random_bool(0.3) {
                let length = rng.random_range(1.0..500.0);
                let class = CLASSES[rng.random_range(0..CLASSES.len())];
                edges.push((source, target, length, class));
            }
        }
    }
    graph_from(&nodes, &edges)
}

fn cheapest_edge(
    graph: &RoadGraph,
    from: NodeId,
    to: NodeId,
    weight: &WeightSelector,
) -> Option<f64> {
    graph
        .edges()
        .filter(|e| e.source == from && e.target == to)
        .map(|e| weight.weight(e))
        .min_by(f64::total_cmp)
}

/// Cheapest cost over every simple path, found by exhaustive search
fn brute_force(
    graph: &RoadGraph,
    from: NodeId,
    to: NodeId,
    weight: &WeightSelector,
) -> Option<f64> {
    fn walk(
        edges: &[&RoadEdge],
        at: NodeId,
        to: NodeId,
        cost: f64,
        visited: &mut Vec<NodeId>,
        weight: &WeightSelector,
        best: &mut Option<f64>,
    ) {
        if at == to {
            *best = Some(best.map_or(cost, |b: f64| b.min(cost)));
            return;
        }
        for edge in edges.iter().filter(|e| e.source == at) {
            if visited.contains(&edge.target) {
                continue;
            }
            visited.push(edge.target);
            walk(edges, edge.target, to, cost + weight.weight(edge), visited, weight, best);
            visited.pop();
        }
    }

    let edges: Vec<_> = graph.edges().collect();
    let mut best = None;
    walk(&edges, from, to, 0.0, &mut vec![from], weight, &mut best);
    best
}

#[test]
fn routes_match_exhaustive_search() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..20 {
        let graph = random_graph(&mut rng, 7);
        for weight in [WeightSelector::Distance, WeightSelector::TravelTime] {
            for from in 0..7 {
                for to in 0..7 {
                    let expected = brute_force(&graph, from, to, &weight);
                    match (shortest_path(&graph, from, to, &weight), expected) {
                        (Ok(route), Some(expected)) => {
                            assert_eq!(route.source(), from);
                            assert_eq!(route.target(), to);
                            assert_close(route.cost(), expected);

                            let steps: Vec<f64> = route
                                .nodes()
                                .windows(2)
                                .filter_map(|pair| cheapest_edge(&graph, pair[0], pair[1], &weight))
                                .collect();
                            assert_eq!(steps.len(), route.edge_count(), "route is not a walk");
                            let summed: f64 = steps.iter().sum();
                            assert_close(route.cost(), summed);
                        }
                        (Err(Error::NoPathFound { .. }), None) => {}
                        (result, expected) => {
                            panic!("{from} -> {to}: got {result:?}, exhaustive search {expected:?}")
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn repeated_queries_are_reproducible() {
    let mut rng = StdRng::seed_from_u64(99);
    let graph = random_graph(&mut rng, 12);

    for from in 0..12 {
        for to in 0..12 {
            let first = shortest_path(&graph, from, to, &WeightSelector::TravelTime);
            let second = shortest_path(&graph, from, to, &WeightSelector::TravelTime);
            match (first, second) {
                (Ok(a), Ok(b)) => assert_eq!(a, b),
                (Err(_), Err(_)) => {}
                _ => panic!("{from} -> {to} differs between runs"),
            }
        }
    }
}
