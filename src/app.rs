use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use geojson::FeatureCollection;
use roadnet_core::prelude::*;
use tracing::info;

use crate::centrality::{compute, render_top};
use crate::config::AppConfig;
use crate::routing::{Endpoint, OutputFormat, find_routes, render_routes};

/// Speed inference, routing and centrality over a projected road network
#[derive(Parser, Debug)]
#[command(name = "roadnet")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// nodes CSV, used when no configuration file is given
    #[arg(long, global = true, requires = "edges")]
    pub nodes: Option<PathBuf>,

    /// edges CSV, used when no configuration file is given
    #[arg(long, global = true, requires = "nodes")]
    pub edges: Option<PathBuf>,

    /// treat every input edge as a two-way road
    #[arg(long, global = true)]
    pub bidirectional: bool,

    /// more log output, repeat for trace level
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print network statistics as JSON
    Summary,
    /// Shortest route between two endpoints
    Route {
        /// node id, `x,y`, `centroid` or `north`
        #[arg(long, default_value = "centroid", allow_hyphen_values = true)]
        from: Endpoint,
        /// node id, `x,y`, `centroid` or `north`
        #[arg(long, default_value = "north", allow_hyphen_values = true)]
        to: Endpoint,
        /// cost model, both distance and travel time when omitted
        #[arg(short, long)]
        weight: Option<WeightSelector>,
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Betweenness and closeness centrality of every node
    Centrality {
        /// cost model, overrides the configuration file
        #[arg(short, long)]
        weight: Option<WeightSelector>,
        /// number of nodes to print
        #[arg(long)]
        top: Option<usize>,
        /// write all scores as GeoJSON points
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// cancel the computation after this many seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
    /// Write the weighted edges as GeoJSON
    ExportEdges {
        #[arg(short, long)]
        output: PathBuf,
    },
}

impl Cli {
    pub fn app_config(&self) -> anyhow::Result<AppConfig> {
        let mut config = match (&self.config, &self.nodes, &self.edges) {
            (Some(path), _, _) => AppConfig::from_file(path)?,
            (None, Some(nodes), Some(edges)) => AppConfig::new(NetworkConfig::new(nodes, edges)),
            _ => bail!("Either --config or both --nodes and --edges are required"),
        };
        if let (Some(nodes), Some(edges)) = (&self.nodes, &self.edges) {
            config.network.nodes_path.clone_from(nodes);
            config.network.edges_path.clone_from(edges);
        }
        config.network.bidirectional |= self.bidirectional;
        Ok(config)
    }

    pub fn run(&self, out: &mut impl Write) -> anyhow::Result<()> {
        let config = self.app_config()?;

        let started = Instant::now();
        let graph = create_road_network(&config.network).with_context(|| {
            format!(
                "Failed to build road network from '{}' and '{}'",
                config.network.nodes_path.display(),
                config.network.edges_path.display()
            )
        })?;
        info!("Network built in {:.2?}", started.elapsed());

        self.command.run(&graph, &config, out)
    }
}

impl Command {
    pub fn run(
        &self,
        graph: &RoadGraph,
        config: &AppConfig,
        out: &mut impl Write,
    ) -> anyhow::Result<()> {
        match self {
            Command::Summary => {
                let summary = NetworkSummary::from_graph(graph);
                serde_json::to_writer_pretty(&mut *out, &summary)?;
                writeln!(out)?;
            }
            Command::Route {
                from,
                to,
                weight,
                format,
            } => {
                let from = from.resolve(graph).context("Invalid route origin")?;
                let to = to.resolve(graph).context("Invalid route destination")?;
                let weights = match weight {
                    Some(weight) => vec![*weight],
                    None => vec![WeightSelector::Distance, WeightSelector::TravelTime],
                };
                let routes = find_routes(graph, from, to, &weights)?;
                out.write_all(render_routes(&routes, *format)?.as_bytes())?;
            }
            Command::Centrality {
                weight,
                top,
                output,
                timeout_secs,
            } => {
                let settings = &config.centrality;
                let weight = weight.unwrap_or(settings.weight);
                let timeout = timeout_secs.or(settings.timeout_secs).map(Duration::from_secs);

                let started = Instant::now();
                let result = compute(graph, weight, timeout)?;
                info!("Centrality by {weight} computed in {:.2?}", started.elapsed());

                if let Some(path) = output {
                    write_geojson(path, &centrality_to_geojson(graph, &result)?)?;
                }
                out.write_all(render_top(&result, top.unwrap_or(settings.top))?.as_bytes())?;
            }
            Command::ExportEdges { output } => {
                write_geojson(output, &edges_to_geojson(graph)?)?;
                writeln!(out, "{} edges written to {}", graph.edge_count(), output.display())?;
            }
        }
        Ok(())
    }
}

fn write_geojson(path: &Path, collection: &FeatureCollection) -> anyhow::Result<()> {
    let text = roadnet_core::export::to_geojson_string(collection)?;
    fs::write(path, text).with_context(|| format!("Failed to write '{}'", path.display()))?;
    info!("Wrote {} features to {}", collection.features.len(), path.display());
    Ok(())
}
