use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;
use geo::{Coord, LineString};
use hashbrown::HashMap;
use log::{debug, trace};
use petgraph::{
    graph::{EdgeIndex, NodeIndex},
    visit::EdgeRef,
};

use super::{checked_weight, state::State, validate_weights};
use crate::{
    Error, NodeId,
    model::RoadGraph,
    routing::{EdgeWeight, Route},
};

/// Lifecycle of a single shortest-path query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Initialized,
    Relaxing,
    /// target settled, route available
    Found,
    /// frontier empty before reaching the target
    Exhausted,
}

/// Dijkstra search between two nodes.
///
/// Each search owns its distance table and frontier; the graph is only
/// borrowed, so any number of searches can run against it concurrently.
/// Among equal-cost predecessors of a node the one with the lowest node id
/// is kept, which makes the returned route reproducible.
pub struct ShortestPathSearch<'a, W: ?Sized> {
    graph: &'a RoadGraph,
    weight: &'a W,
    source: NodeIndex,
    target: NodeIndex,
    distances: HashMap<NodeIndex, f64>,
    predecessors: HashMap<NodeIndex, (NodeIndex, EdgeIndex)>,
    settled: FixedBitSet,
    heap: BinaryHeap<State>,
    state: SearchState,
}

impl<'a, W> ShortestPathSearch<'a, W>
where
    W: EdgeWeight + ?Sized,
{
    /// # Errors
    ///
    /// [`Error::UnknownNode`] if either endpoint is not in the graph
    pub fn new(
        graph: &'a RoadGraph,
        source: NodeId,
        target: NodeId,
        weight: &'a W,
    ) -> Result<Self, Error> {
        let source = graph.index_of(source)?;
        let target = graph.index_of(target)?;
        let estimated_nodes = graph.node_count().min(1000);

        Ok(Self {
            graph,
            weight,
            source,
            target,
            distances: HashMap::with_capacity(estimated_nodes),
            predecessors: HashMap::with_capacity(estimated_nodes),
            settled: FixedBitSet::with_capacity(graph.node_count()),
            heap: BinaryHeap::with_capacity(estimated_nodes / 4),
            state: SearchState::Initialized,
        })
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Run the search to completion
    ///
    /// # Errors
    ///
    /// [`Error::NoPathFound`] if the target is unreachable,
    /// [`Error::InvalidWeight`] if any edge of the graph has a negative or
    /// non-finite weight, whether or not the route would use it.
    pub fn run(&mut self) -> Result<Route, Error> {
        validate_weights(self.graph, self.weight)?;

        if self.state != SearchState::Initialized {
            self.distances.clear();
            self.predecessors.clear();
            self.settled.clear();
            self.heap.clear();
        }

        self.distances.insert(self.source, 0.0);
        self.heap.push(State {
            cost: 0.0,
            node: self.source,
        });
        self.state = SearchState::Relaxing;

        while let Some(State { cost, node }) = self.heap.pop() {
            if self.settled.contains(node.index()) {
                continue;
            }
            self.settled.insert(node.index());

            if node == self.target {
                self.state = SearchState::Found;
                return Ok(self.build_route(cost));
            }

            self.relax(node, cost)?;
        }

        self.state = SearchState::Exhausted;
        let (from, to) = (self.graph.id_of(self.source), self.graph.id_of(self.target));
        debug!("No path from {from} to {to}");
        Err(Error::NoPathFound { from, to })
    }

    fn relax(&mut self, node: NodeIndex, cost: f64) -> Result<(), Error> {
        for edge in self.graph.inner().edges(node) {
            let next = edge.target();
            if self.settled.contains(next.index()) {
                continue;
            }
            let next_cost = cost + checked_weight(self.weight, edge.weight())?;

            match self.distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    self.predecessors.insert(next, (node, edge.id()));
                    self.heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    let best = *entry.get();
                    if next_cost < best {
                        *entry.get_mut() = next_cost;
                        self.predecessors.insert(next, (node, edge.id()));
                        self.heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                    } else if next_cost == best
                        && self
                            .predecessors
                            .get(&next)
                            .is_some_and(|&(previous, _)| node < previous)
                    {
                        trace!("Equal-cost predecessor tie at {next:?}, keeping {node:?}");
                        self.predecessors.insert(next, (node, edge.id()));
                    }
                }
            }
        }
        Ok(())
    }

    fn build_route(&self, cost: f64) -> Route {
        let mut nodes = vec![self.target];
        let mut edges = Vec::new();
        let mut current = self.target;
        while current != self.source {
            let Some(&(previous, edge)) = self.predecessors.get(&current) else {
                break;
            };
            nodes.push(previous);
            edges.push(edge);
            current = previous;
        }
        nodes.reverse();
        edges.reverse();

        let (length, travel_time) = edges
            .iter()
            .map(|&edge| self.graph.edge(edge))
            .fold((0.0, 0.0), |(length, time), edge| {
                (length + edge.length, time + edge.travel_time)
            });

        let geometry: LineString<f64> = nodes
            .iter()
            .map(|&node| Coord::from(self.graph.inner()[node].geometry))
            .collect();

        Route {
            nodes: nodes.iter().map(|&node| self.graph.id_of(node)).collect(),
            cost,
            length,
            travel_time,
            geometry,
        }
    }
}

/// Minimum-cost route from `source` to `target` under `weight`
///
/// # Errors
///
/// See [`ShortestPathSearch::new`] and [`ShortestPathSearch::run`]
pub fn shortest_path<W>(
    graph: &RoadGraph,
    source: NodeId,
    target: NodeId,
    weight: &W,
) -> Result<Route, Error>
where
    W: EdgeWeight + ?Sized,
{
    let mut search = ShortestPathSearch::new(graph, source, target, weight)?;
    search.run()
}
