use std::fmt::Write as _;
use std::str::FromStr;

use anyhow::{Context, anyhow, bail};
use geo::Point;
use geojson::FeatureCollection;
use roadnet_core::prelude::*;
use tracing::info;
use wkt::ToWkt;

/// Route endpoint as given on the command line
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Endpoint {
    /// node id as found in the input data
    Node(NodeId),
    /// `x,y` in the network's projected coordinates, snapped to the nearest node
    Coordinate(Point<f64>),
    /// convex-hull centroid of the network, snapped to the nearest node
    Centroid,
    /// node with the largest `y` coordinate
    Northernmost,
}

impl FromStr for Endpoint {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_lowercase().as_str() {
            "centroid" | "center" => return Ok(Endpoint::Centroid),
            "north" | "northernmost" => return Ok(Endpoint::Northernmost),
            _ => {}
        }

        if let Some((x, y)) = s.split_once(',') {
            let x = x.trim().parse::<f64>().context("Invalid x coordinate")?;
            let y = y.trim().parse::<f64>().context("Invalid y coordinate")?;
            return Ok(Endpoint::Coordinate(Point::new(x, y)));
        }

        s.parse::<NodeId>().map(Endpoint::Node).map_err(|_| {
            anyhow!("Endpoint must be a node id, 'x,y', 'centroid' or 'north', got {s:?}")
        })
    }
}

impl Endpoint {
    pub fn resolve(&self, graph: &RoadGraph) -> anyhow::Result<NodeId> {
        let point = match self {
            Endpoint::Node(id) => {
                if !graph.contains_node(*id) {
                    bail!("Node {id} is not part of the drivable network");
                }
                return Ok(*id);
            }
            Endpoint::Northernmost => {
                return northernmost_node(graph).ok_or_else(|| anyhow!("Network is empty"));
            }
            Endpoint::Coordinate(point) => *point,
            Endpoint::Centroid => {
                network_centroid(graph).ok_or_else(|| anyhow!("Network is empty"))?
            }
        };

        let (id, distance) = nearest_node(graph, &point)?;
        info!(
            "Snapped ({:.1}, {:.1}) to node {id} at {distance:.1} m",
            point.x(),
            point.y()
        );
        Ok(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// one summary line per route
    #[default]
    Text,
    /// `LINESTRING` of node coordinates per route
    Wkt,
    /// `FeatureCollection` with one feature per route
    Geojson,
}

/// Shortest route between two nodes under each of the given weights
pub fn find_routes(
    graph: &RoadGraph,
    from: NodeId,
    to: NodeId,
    weights: &[WeightSelector],
) -> anyhow::Result<Vec<(WeightSelector, Route)>> {
    weights
        .iter()
        .map(|weight| {
            shortest_path(graph, from, to, weight)
                .map(|route| (*weight, route))
                .with_context(|| format!("Routing by {weight} failed"))
        })
        .collect()
}

pub fn render_routes(
    routes: &[(WeightSelector, Route)],
    format: OutputFormat,
) -> anyhow::Result<String> {
    let mut out = String::new();
    match format {
        OutputFormat::Text => {
            for (weight, route) in routes {
                writeln!(
                    out,
                    "{weight}: {} -> {} via {} edges, {:.1} m, {:.2} min [{}]",
                    route.source(),
                    route.target(),
                    route.edge_count(),
                    route.length(),
                    route.travel_time(),
                    route
                        .nodes()
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ")
                )?;
            }
        }
        OutputFormat::Wkt => {
            for (_, route) in routes {
                writeln!(out, "{}", route.geometry().to_wkt())?;
            }
        }
        OutputFormat::Geojson => {
            let features = routes
                .iter()
                .map(|(weight, route)| route.to_feature(&weight.to_string()))
                .collect::<Result<Vec<_>, _>>()?;
            let collection = FeatureCollection {
                features,
                bbox: None,
                foreign_members: None,
            };
            out.push_str(&serde_json::to_string_pretty(&collection)?);
            out.push('\n');
        }
    }
    Ok(out)
}
