use log::info;

use super::config::NetworkConfig;
use super::parser::{load_edges, load_nodes};
use crate::{
    Error,
    model::{NetworkSummary, RoadGraph, RoadNetworkData},
    weighting::{WeightComputer, WeightingConfig, filter_drivable},
};

/// Creates a weighted road graph from the files named in the configuration
///
/// # Errors
///
/// Returns an error if there are problems reading, validating or weighting
/// the data
pub fn create_road_network(config: &NetworkConfig) -> Result<RoadGraph, Error> {
    validate_config(config)?;

    info!(
        "Loading road network: nodes {}, edges {}",
        config.nodes_path.display(),
        config.edges_path.display()
    );

    let (nodes, edges) = rayon::join(
        || load_nodes(&config.nodes_path),
        || load_edges(&config.edges_path),
    );
    let data = RoadNetworkData::new(nodes?, edges?)?;
    let data = if config.bidirectional {
        data.with_reversed_edges()
    } else {
        data
    };

    let graph = build_road_graph(&data, &config.weighting)?;

    // CSV deserialization allocates heavily and glibc does not always return
    // the freed memory to the system on its own.
    //
    // # Safety
    //
    // malloc_trim has no preconditions; the cfg restricts it to glibc.
    #[cfg(all(target_os = "linux", target_env = "gnu"))]
    unsafe {
        if libc::malloc_trim(0) == 0 {
            log::debug!("No heap memory released by malloc_trim");
        }
    }

    Ok(graph)
}

/// Filter, weigh and index already ingested network data
///
/// # Errors
///
/// Returns an error if the weighting configuration is invalid or, under the
/// strict speed policy, if an edge carries a malformed speed tag
pub fn build_road_graph(
    data: &RoadNetworkData,
    config: &WeightingConfig,
) -> Result<RoadGraph, Error> {
    let computer = WeightComputer::from_config(config)?;
    log::debug!(
        "Weighting with {:?} policy, fallback speed {} km/h",
        config.speed_policy,
        computer.table().fallback()
    );

    let drivable = filter_drivable(data, &config.excluded_classes);
    let edges = computer.weigh_all(drivable.edges())?;
    let (nodes, _) = drivable.into_parts();
    let graph = RoadGraph::new(nodes, edges)?;

    let summary = NetworkSummary::from_graph(&graph);
    info!(
        "Road graph ready: {} nodes, {} edges, {:.1} km, {} posted / {} inferred speeds",
        summary.nodes,
        summary.edges,
        summary.total_length_m / 1000.0,
        summary.posted_speeds,
        summary.inferred_speeds
    );

    Ok(graph)
}

fn validate_config(config: &NetworkConfig) -> Result<(), Error> {
    for path in [&config.nodes_path, &config.edges_path] {
        if !path.exists() {
            return Err(Error::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Input file not found: {}", path.display()),
            )));
        }
    }

    config.weighting.speed_table()?;
    Ok(())
}
