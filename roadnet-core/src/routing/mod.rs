//! Shortest-path queries over the weighted road graph

pub mod dijkstra;
mod route;
mod weight;

pub use dijkstra::{SearchState, ShortestPathSearch, shortest_path, shortest_path_lengths};
pub use route::Route;
pub use weight::{EdgeWeight, WeightSelector};
