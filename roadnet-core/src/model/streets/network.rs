//! Ingested network data and the immutable weighted road graph

use hashbrown::{HashMap, HashSet};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use rstar::{RTree, primitives::GeomWithData};

use super::{RawEdge, RoadEdge, RoadNode};
use crate::{Error, NodeId};

/// Node location stored in the spatial index
pub type IndexedPoint = GeomWithData<[f64; 2], NodeIndex>;

/// Validated, unweighted network as produced by ingestion.
///
/// Every edge endpoint exists in the node set and node ids are unique.
/// Each processing stage consumes a reference and returns a new value.
#[derive(Debug, Clone, Default)]
pub struct RoadNetworkData {
    nodes: Vec<RoadNode>,
    edges: Vec<RawEdge>,
}

impl RoadNetworkData {
    /// # Errors
    ///
    /// Returns an error on duplicate node ids, edges that reference a missing
    /// node, negative or non-finite lengths and non-finite coordinates.
    pub fn new(nodes: Vec<RoadNode>, edges: Vec<RawEdge>) -> Result<Self, Error> {
        let mut ids = HashSet::with_capacity(nodes.len());
        for node in &nodes {
            if !ids.insert(node.id) {
                return Err(Error::DuplicateNode(node.id));
            }
            if !node.geometry.x().is_finite() || !node.geometry.y().is_finite() {
                return Err(Error::InvalidData(format!(
                    "Node {} has non-finite coordinates",
                    node.id
                )));
            }
        }

        for edge in &edges {
            if !ids.contains(&edge.source) || !ids.contains(&edge.target) {
                return Err(Error::DanglingEdge {
                    from: edge.source,
                    to: edge.target,
                });
            }
            if !edge.length.is_finite() || edge.length < 0.0 {
                return Err(Error::InvalidData(format!(
                    "Edge {} -> {} has invalid length {}",
                    edge.source, edge.target, edge.length
                )));
            }
        }

        Ok(Self { nodes, edges })
    }

    pub fn nodes(&self) -> &[RoadNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[RawEdge] {
        &self.edges
    }

    pub fn into_parts(self) -> (Vec<RoadNode>, Vec<RawEdge>) {
        (self.nodes, self.edges)
    }

    /// Network where each edge is accompanied by its reverse
    #[must_use]
    pub fn with_reversed_edges(&self) -> Self {
        let edges = self
            .edges
            .iter()
            .flat_map(|edge| [edge.clone(), edge.reversed()])
            .collect();
        Self {
            nodes: self.nodes.clone(),
            edges,
        }
    }

    /// Constructor for stages that only remove items from already
    /// validated data
    pub(crate) fn from_validated(nodes: Vec<RoadNode>, edges: Vec<RawEdge>) -> Self {
        Self { nodes, edges }
    }
}

/// Weighted road graph, read-only after construction.
///
/// Nodes are inserted in ascending id order, so comparing two
/// [`NodeIndex`] values gives the same answer as comparing their node ids.
/// The search algorithms rely on this for their lowest-id tie-break.
#[derive(Debug, Clone)]
pub struct RoadGraph {
    pub(crate) graph: DiGraph<RoadNode, RoadEdge>,
    node_index: HashMap<NodeId, NodeIndex>,
    rtree: RTree<IndexedPoint>,
}

impl RoadGraph {
    /// # Errors
    ///
    /// Returns an error on duplicate node ids or edges that reference a
    /// missing node.
    pub fn new(mut nodes: Vec<RoadNode>, edges: Vec<RoadEdge>) -> Result<Self, Error> {
        nodes.sort_unstable_by_key(|node| node.id);

        let mut graph = DiGraph::with_capacity(nodes.len(), edges.len());
        let mut node_index = HashMap::with_capacity(nodes.len());
        for node in nodes {
            let id = node.id;
            let index = graph.add_node(node);
            if node_index.insert(id, index).is_some() {
                return Err(Error::DuplicateNode(id));
            }
        }

        for edge in edges {
            let (Some(&from), Some(&to)) =
                (node_index.get(&edge.source), node_index.get(&edge.target))
            else {
                return Err(Error::DanglingEdge {
                    from: edge.source,
                    to: edge.target,
                });
            };
            graph.add_edge(from, to, edge);
        }

        let rtree = build_rtree(&graph);

        Ok(Self {
            graph,
            node_index,
            rtree,
        })
    }

    /// Rebuild with new edge attributes while keeping the node indices and
    /// the spatial index
    pub(crate) fn map_edges<F>(&self, mut f: F) -> Result<Self, Error>
    where
        F: FnMut(&RoadEdge) -> Result<RoadEdge, Error>,
    {
        let mut graph = DiGraph::with_capacity(self.graph.node_count(), self.graph.edge_count());
        for node in self.graph.node_weights() {
            graph.add_node(node.clone());
        }
        for edge in self.graph.edge_indices() {
            if let Some((from, to)) = self.graph.edge_endpoints(edge) {
                graph.add_edge(from, to, f(&self.graph[edge])?);
            }
        }

        Ok(Self {
            graph,
            node_index: self.node_index.clone(),
            rtree: self.rtree.clone(),
        })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node_index.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&RoadNode> {
        self.node_index.get(&id).map(|&index| &self.graph[index])
    }

    /// Nodes in ascending id order
    pub fn nodes(&self) -> impl Iterator<Item = &RoadNode> {
        self.graph.node_weights()
    }

    pub fn edges(&self) -> impl Iterator<Item = &RoadEdge> {
        self.graph.edge_weights()
    }

    /// Underlying petgraph storage
    pub fn inner(&self) -> &DiGraph<RoadNode, RoadEdge> {
        &self.graph
    }

    pub(crate) fn index_of(&self, id: NodeId) -> Result<NodeIndex, Error> {
        self.node_index
            .get(&id)
            .copied()
            .ok_or(Error::UnknownNode(id))
    }

    pub(crate) fn id_of(&self, index: NodeIndex) -> NodeId {
        self.graph[index].id
    }

    pub(crate) fn edge(&self, index: EdgeIndex) -> &RoadEdge {
        &self.graph[index]
    }

    pub(crate) fn rtree(&self) -> &RTree<IndexedPoint> {
        &self.rtree
    }
}

fn build_rtree(graph: &DiGraph<RoadNode, RoadEdge>) -> RTree<IndexedPoint> {
    let points = graph
        .node_indices()
        .map(|index| {
            let point = graph[index].geometry;
            GeomWithData::new([point.x(), point.y()], index)
        })
        .collect();
    RTree::bulk_load(points)
}
