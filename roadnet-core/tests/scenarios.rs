mod common;

use common::{assert_close, graph_from, undirected};
use geo::Point;
use roadnet_core::{
    CentralityConfig, Error, RoadGraph, SpeedSource, WeightSelector, centrality, nearest_node,
    shortest_path,
};

const A: i64 = 1;
const B: i64 = 2;
const C: i64 = 3;
const D: i64 = 4;

fn residential_path() -> RoadGraph {
    graph_from(
        &[(A, 0.0, 0.0), (B, 100.0, 0.0), (C, 300.0, 0.0), (D, 600.0, 0.0)],
        &undirected(&[
            (A, B, 100.0, "residential"),
            (B, C, 200.0, "residential"),
            (C, D, 300.0, "residential"),
        ]),
    )
}

#[test]
fn residential_path_speeds_and_times() {
    let graph = residential_path();
    for edge in graph.edges() {
        assert_eq!(edge.effective_speed, 10.0);
        assert_eq!(edge.speed_source, SpeedSource::Inferred);
    }

    let time_of = |from, to| {
        graph
            .edges()
            .find(|e| e.source == from && e.target == to)
            .map(|e| e.travel_time)
            .unwrap()
    };
    assert_close(time_of(A, B), 0.6);
    assert_close(time_of(B, C), 1.2);
    assert_close(time_of(C, D), 1.8);
}

#[test]
fn residential_path_routes() {
    let graph = residential_path();

    let by_distance = shortest_path(&graph, A, D, &WeightSelector::Distance).unwrap();
    assert_eq!(by_distance.nodes(), &[A, B, C, D]);
    assert_close(by_distance.cost(), 600.0);
    assert_close(by_distance.length(), 600.0);
    assert_close(by_distance.travel_time(), 3.6);

    let by_time = shortest_path(&graph, A, D, &WeightSelector::TravelTime).unwrap();
    assert_eq!(by_time.nodes(), &[A, B, C, D]);
    assert_close(by_time.cost(), 3.6);
    assert_close(by_time.length(), 600.0);
}

#[test]
fn star_betweenness() {
    let (x, p, q, r) = (10, 11, 12, 13);
    let graph = graph_from(
        &[(x, 0.0, 0.0), (p, 50.0, 0.0), (q, 0.0, 50.0), (r, -50.0, 0.0)],
        &undirected(&[
            (x, p, 50.0, "primary"),
            (x, q, 50.0, "primary"),
            (x, r, 50.0, "primary"),
        ]),
    );
    let result = centrality(&graph, &CentralityConfig::default()).unwrap();

    assert_eq!(result.get(x).unwrap().betweenness, 1.0);
    for leaf in [p, q, r] {
        assert_eq!(result.get(leaf).unwrap().betweenness, 0.0);
    }
}

#[test]
fn disconnected_pair_has_no_path() {
    let graph = graph_from(
        &[(A, 0.0, 0.0), (B, 1.0, 0.0), (C, 10.0, 0.0), (D, 11.0, 0.0)],
        &undirected(&[(A, B, 1.0, "primary"), (C, D, 1.0, "primary")]),
    );
    let err = shortest_path(&graph, A, D, &WeightSelector::Distance).unwrap_err();
    assert!(matches!(err, Error::NoPathFound { from: A, to: D }));
}

#[test]
fn nearest_node_on_empty_graph() {
    let graph = graph_from(&[], &[]);
    let err = nearest_node(&graph, &Point::new(0.0, 0.0)).unwrap_err();
    assert!(matches!(err, Error::EmptyGraph));
}

#[test]
fn nearest_node_on_single_node_graph() {
    let graph = graph_from(&[(42, 3.0, 4.0)], &[]);
    for (x, y, expected) in [(0.0, 0.0, 5.0), (3.0, 4.0, 0.0), (6.0, 8.0, 5.0)] {
        let (id, distance) = nearest_node(&graph, &Point::new(x, y)).unwrap();
        assert_eq!(id, 42);
        assert_close(distance, expected);
    }
}

#[test]
fn queries_do_not_mutate_the_graph() {
    let graph = residential_path();
    let before: Vec<_> = graph.edges().cloned().collect();

    std::thread::scope(|scope| {
        for selector in [WeightSelector::Distance, WeightSelector::TravelTime] {
            let graph = &graph;
            scope.spawn(move || shortest_path(graph, D, A, &selector).unwrap());
        }
    });

    let after: Vec<_> = graph.edges().cloned().collect();
    assert_eq!(before, after);
}
