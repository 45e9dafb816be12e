use std::collections::BinaryHeap;

use hashbrown::HashMap;
use petgraph::visit::EdgeRef;

use super::{checked_weight, state::State, validate_weights};
use crate::{Error, NodeId, model::RoadGraph, routing::EdgeWeight};

/// Cost from `source` to every node reachable from it, limited to nodes
/// within `max_cost` when a bound is given.
///
/// # Errors
///
/// [`Error::UnknownNode`] if `source` is not in the graph,
/// [`Error::InvalidWeight`] if any edge weight is negative or non-finite.
pub fn shortest_path_lengths<W>(
    graph: &RoadGraph,
    source: NodeId,
    weight: &W,
    max_cost: Option<f64>,
) -> Result<HashMap<NodeId, f64>, Error>
where
    W: EdgeWeight + ?Sized,
{
    let start = graph.index_of(source)?;
    validate_weights(graph, weight)?;
    let estimated_nodes = graph.node_count().min(1000);
    let mut distances = HashMap::with_capacity(estimated_nodes);
    let mut heap = BinaryHeap::with_capacity(estimated_nodes / 4);

    heap.push(State {
        cost: 0.0,
        node: start,
    });
    distances.insert(start, 0.0);

    while let Some(State { cost, node }) = heap.pop() {
        // Skip if we've found a better path
        if distances.get(&node).is_some_and(|&best| cost > best) {
            continue;
        }

        if max_cost.is_some_and(|max| cost > max) {
            continue;
        }

        for edge in graph.inner().edges(node) {
            let next = edge.target();
            let next_cost = cost + checked_weight(weight, edge.weight())?;

            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                    }
                }
            }
        }
    }

    Ok(distances
        .into_iter()
        .filter(|(_, cost)| max_cost.is_none_or(|max| *cost <= max))
        .map(|(node, cost)| (graph.id_of(node), cost))
        .collect())
}
