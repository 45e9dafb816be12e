//! Speed inference and travel-time weighting of road edges
//!
//! Runs once per network, after ingestion and before any query:
//! [`filter_drivable`] removes non-drivable edges, then [`WeightComputer`]
//! resolves an effective speed per edge and derives its travel time.

mod config;
mod filter;
mod inference;
mod speed_table;
mod travel_time;

pub use config::{SpeedPolicy, WeightingConfig};
pub use filter::filter_drivable;
pub use inference::infer_speed;
pub use speed_table::{SpeedTable, default_speed};
pub use travel_time::{WeightComputer, travel_time_minutes};
