//! Betweenness and closeness centrality.
//!
//! Betweenness uses Brandes' accumulation over one Dijkstra run per source
//! node. Sources are processed in fixed-size chunks on the rayon pool and
//! the chunk results are merged in source order, so the scores do not
//! depend on the number of threads.

use std::collections::{BTreeMap, BinaryHeap};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use fixedbitset::FixedBitSet;
use log::{debug, info};
use petgraph::{graph::NodeIndex, visit::EdgeRef};
use rayon::prelude::*;
use serde::Serialize;

use crate::{
    Error, NodeId,
    model::RoadGraph,
    routing::{
        EdgeWeight, WeightSelector,
        dijkstra::{checked_weight, state::State, validate_weights},
    },
};

/// sources handled by one rayon task
const SOURCES_PER_CHUNK: usize = 64;
/// chunks computed in parallel before merging into the totals
const CHUNKS_PER_BATCH: usize = 32;

/// Shared flag to stop a running centrality computation
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CentralityConfig {
    /// distance metric for both scores
    pub weight: WeightSelector,
    pub cancellation: Option<CancellationToken>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NodeCentrality {
    /// share of shortest paths through the node, scaled so the maximum is 1
    pub betweenness: f64,
    /// reachable node count divided by the summed distance to them
    pub closeness: f64,
}

/// Scores for every node that reaches, or is reached by, another node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CentralityResult {
    scores: BTreeMap<NodeId, NodeCentrality>,
    max_raw_betweenness: f64,
}

impl CentralityResult {
    pub fn get(&self, id: NodeId) -> Option<&NodeCentrality> {
        self.scores.get(&id)
    }

    /// Scores in ascending node id order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &NodeCentrality)> {
        self.scores.iter().map(|(&id, score)| (id, score))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Largest betweenness before normalisation
    pub fn max_raw_betweenness(&self) -> f64 {
        self.max_raw_betweenness
    }
}

/// Betweenness and closeness with the configured built-in weight
///
/// # Errors
///
/// [`Error::Cancelled`] if the token fires, [`Error::InvalidWeight`] on a
/// negative or non-finite weight.
pub fn centrality(graph: &RoadGraph, config: &CentralityConfig) -> Result<CentralityResult, Error> {
    centrality_with(graph, &config.weight, config.cancellation.as_ref())
}

/// Betweenness and closeness under an arbitrary edge weight
///
/// # Errors
///
/// See [`centrality`]
pub fn centrality_with<W>(
    graph: &RoadGraph,
    weight: &W,
    cancellation: Option<&CancellationToken>,
) -> Result<CentralityResult, Error>
where
    W: EdgeWeight + Sync + ?Sized,
{
    validate_weights(graph, weight)?;

    let node_count = graph.node_count();
    info!("Computing centrality over {node_count} nodes");

    let sources: Vec<NodeIndex> = graph.inner().node_indices().collect();
    let mut totals = Accumulator::new(node_count);

    for batch in sources.chunks(SOURCES_PER_CHUNK * CHUNKS_PER_BATCH) {
        let partials = batch
            .par_chunks(SOURCES_PER_CHUNK)
            .map(|chunk| {
                let mut workspace = Workspace::new(node_count);
                let mut partial = Accumulator::new(node_count);
                for &source in chunk {
                    if cancellation.is_some_and(CancellationToken::is_cancelled) {
                        return Err(Error::Cancelled);
                    }
                    workspace.run(graph, source, weight)?;
                    workspace.accumulate(source, &mut partial);
                }
                Ok(partial)
            })
            .collect::<Result<Vec<_>, Error>>()?;

        for partial in partials {
            totals.merge(partial);
        }
        debug!("Centrality: processed batch of {} sources", batch.len());
    }

    Ok(totals.finish(graph))
}

/// Per-source Dijkstra state, reused across sources
struct Workspace {
    distances: Vec<f64>,
    /// number of shortest paths from the source
    sigma: Vec<f64>,
    delta: Vec<f64>,
    predecessors: Vec<Vec<NodeIndex>>,
    settled: FixedBitSet,
    /// nodes in the order they were settled
    order: Vec<NodeIndex>,
    heap: BinaryHeap<State>,
}

impl Workspace {
    fn new(node_count: usize) -> Self {
        Self {
            distances: vec![f64::INFINITY; node_count],
            sigma: vec![0.0; node_count],
            delta: vec![0.0; node_count],
            predecessors: vec![Vec::new(); node_count],
            settled: FixedBitSet::with_capacity(node_count),
            order: Vec::new(),
            heap: BinaryHeap::new(),
        }
    }

    // every reached node is settled once the heap drains, so `order`
    // covers all slots touched by the previous source
    fn reset(&mut self) {
        for node in self.order.drain(..) {
            let i = node.index();
            self.distances[i] = f64::INFINITY;
            self.sigma[i] = 0.0;
            self.delta[i] = 0.0;
            self.predecessors[i].clear();
        }
        self.settled.clear();
        self.heap.clear();
    }

    fn run<W>(&mut self, graph: &RoadGraph, source: NodeIndex, weight: &W) -> Result<(), Error>
    where
        W: EdgeWeight + ?Sized,
    {
        self.reset();
        let s = source.index();
        self.distances[s] = 0.0;
        self.sigma[s] = 1.0;
        self.heap.push(State {
            cost: 0.0,
            node: source,
        });

        while let Some(State { cost, node }) = self.heap.pop() {
            if self.settled.contains(node.index()) {
                continue;
            }
            self.settled.insert(node.index());
            self.order.push(node);

            for edge in graph.inner().edges(node) {
                let next = edge.target();
                let n = next.index();
                if self.settled.contains(n) {
                    continue;
                }
                let next_cost = cost + checked_weight(weight, edge.weight())?;

                if next_cost < self.distances[n] {
                    self.distances[n] = next_cost;
                    self.sigma[n] = self.sigma[node.index()];
                    self.predecessors[n].clear();
                    self.predecessors[n].push(node);
                    self.heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                } else if next_cost == self.distances[n] && !self.predecessors[n].contains(&node) {
                    self.sigma[n] += self.sigma[node.index()];
                    self.predecessors[n].push(node);
                }
            }
        }
        Ok(())
    }

    fn accumulate(&mut self, source: NodeIndex, totals: &mut Accumulator) {
        let reachable = self.order.len() - 1;
        if reachable == 0 {
            return;
        }

        for &node in self.order.iter().rev() {
            let w = node.index();
            let coefficient = (1.0 + self.delta[w]) / self.sigma[w];
            for &previous in &self.predecessors[w] {
                let v = previous.index();
                self.delta[v] += self.sigma[v] * coefficient;
            }
            if node != source {
                totals.betweenness[w] += self.delta[w];
            }
            totals.reached.insert(w);
        }

        let total_distance: f64 = self.order.iter().map(|node| self.distances[node.index()]).sum();
        #[allow(clippy::cast_precision_loss)]
        let closeness = if total_distance > 0.0 {
            reachable as f64 / total_distance
        } else {
            0.0
        };
        totals.closeness[source.index()] = closeness;
    }
}

struct Accumulator {
    betweenness: Vec<f64>,
    closeness: Vec<f64>,
    reached: FixedBitSet,
}

impl Accumulator {
    fn new(node_count: usize) -> Self {
        Self {
            betweenness: vec![0.0; node_count],
            closeness: vec![0.0; node_count],
            reached: FixedBitSet::with_capacity(node_count),
        }
    }

    fn merge(&mut self, other: Accumulator) {
        for (total, value) in self.betweenness.iter_mut().zip(other.betweenness) {
            *total += value;
        }
        // each source writes only its own closeness slot
        for (total, value) in self.closeness.iter_mut().zip(other.closeness) {
            *total += value;
        }
        self.reached.union_with(&other.reached);
    }

    fn finish(self, graph: &RoadGraph) -> CentralityResult {
        let max_raw_betweenness = self
            .reached
            .ones()
            .map(|i| self.betweenness[i])
            .fold(0.0, f64::max);

        let scores = self
            .reached
            .ones()
            .map(|i| {
                let raw = self.betweenness[i];
                let betweenness = if max_raw_betweenness > 0.0 {
                    raw / max_raw_betweenness
                } else {
                    0.0
                };
                let score = NodeCentrality {
                    betweenness,
                    closeness: self.closeness[i],
                };
                (graph.id_of(NodeIndex::new(i)), score)
            })
            .collect();

        CentralityResult {
            scores,
            max_raw_betweenness,
        }
    }
}
