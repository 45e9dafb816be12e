pub mod regular_dijkstra;
pub(crate) mod state;
pub mod traced_dijkstra;

pub use regular_dijkstra::shortest_path_lengths;
pub use traced_dijkstra::{SearchState, ShortestPathSearch, shortest_path};

use petgraph::visit::EdgeRef;

use crate::{
    Error,
    model::{RoadEdge, RoadGraph},
    routing::EdgeWeight,
};

/// Weight of `edge`, rejected unless it is finite and non-negative
pub(crate) fn checked_weight<W>(weight: &W, edge: &RoadEdge) -> Result<f64, Error>
where
    W: EdgeWeight + ?Sized,
{
    let value = weight.weight(edge);
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidWeight {
            from: edge.source,
            to: edge.target,
            weight: value,
        })
    }
}

/// Checks every edge of the graph, including those a search would never
/// relax
pub(crate) fn validate_weights<W>(graph: &RoadGraph, weight: &W) -> Result<(), Error>
where
    W: EdgeWeight + ?Sized,
{
    graph
        .inner()
        .edge_references()
        .try_for_each(|edge| checked_weight(weight, edge.weight()).map(|_| ()))
}
