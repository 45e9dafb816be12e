//! Command line application around `roadnet_core`

pub mod app;
pub mod centrality;
pub mod config;
pub mod routing;

pub use app::{Cli, Command};
pub use config::{AppConfig, CentralitySettings};
pub use routing::{Endpoint, OutputFormat};
