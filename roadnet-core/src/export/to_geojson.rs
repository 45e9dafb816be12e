use geo::line_string;
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::json;

use crate::{CentralityResult, Error, RoadGraph, Route};

fn feature(value: serde_json::Value) -> Result<Feature, Error> {
    Feature::from_json_value(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

fn collection(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    }
}

/// Every edge as a straight segment between its endpoints, with the
/// derived speed and travel time as properties
pub fn edges_to_geojson(graph: &RoadGraph) -> Result<FeatureCollection, Error> {
    let inner = graph.inner();
    let features = inner
        .edge_indices()
        .filter_map(|index| {
            let (from, to) = inner.edge_endpoints(index)?;
            Some((index, inner[from].geometry, inner[to].geometry))
        })
        .map(|(index, from, to)| {
            let edge = &inner[index];
            let line = line_string![
                (x: from.x(), y: from.y()),
                (x: to.x(), y: to.y()),
            ];
            feature(json!({
                "type": "Feature",
                "geometry": Geometry::new(GeoJsonValue::from(&line)),
                "properties": {
                    "source": edge.source,
                    "target": edge.target,
                    "length_m": edge.length,
                    "road_class": edge.road_class.to_string(),
                    "effective_speed_kmh": edge.effective_speed,
                    "speed_source": edge.speed_source,
                    "travel_time_min": edge.travel_time,
                }
            }))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(collection(features))
}

/// One point per scored node
pub fn centrality_to_geojson(
    graph: &RoadGraph,
    result: &CentralityResult,
) -> Result<FeatureCollection, Error> {
    let features = result
        .iter()
        .filter_map(|(id, score)| graph.node(id).map(|node| (node, score)))
        .map(|(node, score)| {
            feature(json!({
                "type": "Feature",
                "geometry": Geometry::new(GeoJsonValue::from(&node.geometry)),
                "properties": {
                    "id": node.id,
                    "betweenness": score.betweenness,
                    "closeness": score.closeness,
                }
            }))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(collection(features))
}

pub fn to_geojson_string(collection: &FeatureCollection) -> Result<String, Error> {
    serde_json::to_string(collection).map_err(|e| Error::GeoJsonError(e.to_string()))
}

impl Route {
    /// Converts the route to a `GeoJSON` Feature labelled with `name`
    pub fn to_feature(&self, name: &str) -> Result<Feature, Error> {
        feature(json!({
            "type": "Feature",
            "geometry": Geometry::new(GeoJsonValue::from(self.geometry())),
            "properties": {
                "name": name,
                "nodes": self.nodes(),
                "cost": self.cost(),
                "length_m": self.length(),
                "travel_time_min": self.travel_time(),
            }
        }))
    }
}
