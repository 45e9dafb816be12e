use std::collections::BTreeMap;

use itertools::Itertools;
use serde::Serialize;

use super::{RoadGraph, SpeedSource};
use crate::{Kmh, Meters};

/// Aggregate statistics of a weighted road graph
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct NetworkSummary {
    pub nodes: usize,
    pub edges: usize,
    pub total_length_m: Meters,
    /// length-independent mean over all edges
    pub mean_effective_speed_kmh: Option<Kmh>,
    pub posted_speeds: usize,
    pub inferred_speeds: usize,
    /// posted speed values that could not be used and fell back to inference
    pub malformed_speed_tags: usize,
    /// edges whose road class matched no known classification
    pub unrecognized_road_classes: usize,
    pub road_classes: BTreeMap<String, ClassStats>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ClassStats {
    pub count: usize,
    pub length_m: Meters,
}

impl NetworkSummary {
    #[allow(clippy::cast_precision_loss)]
    pub fn from_graph(graph: &RoadGraph) -> Self {
        let edges: Vec<_> = graph.edges().collect();

        let road_classes = edges
            .iter()
            .into_group_map_by(|edge| edge.road_class.to_string())
            .into_iter()
            .map(|(class, members)| {
                let stats = ClassStats {
                    count: members.len(),
                    length_m: members.iter().map(|edge| edge.length).sum(),
                };
                (class, stats)
            })
            .collect();

        let mean_effective_speed_kmh = if edges.is_empty() {
            None
        } else {
            Some(edges.iter().map(|edge| edge.effective_speed).sum::<f64>() / edges.len() as f64)
        };

        Self {
            nodes: graph.node_count(),
            edges: edges.len(),
            total_length_m: edges.iter().map(|edge| edge.length).sum(),
            mean_effective_speed_kmh,
            posted_speeds: edges
                .iter()
                .filter(|edge| edge.speed_source == SpeedSource::Posted)
                .count(),
            inferred_speeds: edges
                .iter()
                .filter(|edge| edge.speed_source == SpeedSource::Inferred)
                .count(),
            malformed_speed_tags: edges
                .iter()
                .filter(|edge| edge.posted_speed.is_malformed())
                .count(),
            unrecognized_road_classes: edges
                .iter()
                .filter(|edge| !edge.road_class.is_recognized())
                .count(),
            road_classes,
        }
    }
}
