//! GeoJSON output for the rendering layer

mod to_geojson;

pub use to_geojson::{centrality_to_geojson, edges_to_geojson, to_geojson_string};
