//! This module is responsible for loading raw network data from CSV files
//! and building the weighted road graph.

mod builder;
mod config;
mod de;
mod parser;
mod raw_types;

pub use builder::{build_road_graph, create_road_network};
pub use config::NetworkConfig;
pub use parser::{deserialize_csv_file, load_edges, load_nodes};
pub use raw_types::{EdgeRecord, NodeRecord};
