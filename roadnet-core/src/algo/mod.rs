//! Whole-network analyses over the weighted road graph

pub mod centrality;
