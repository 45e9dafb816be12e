use std::fs::File;
use std::path::Path;

use super::raw_types::{EdgeRecord, NodeRecord};
use crate::{
    Error,
    model::{RawEdge, RoadNode},
};

/// Deserialize every row of a CSV file with headers.
///
/// # Errors
///
/// Fails on the first row that cannot be deserialized.
pub fn deserialize_csv_file<T>(path: &Path) -> Result<Vec<T>, Error>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;
    csv::Reader::from_reader(file)
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(Error::from)
}

/// # Errors
///
/// See [`deserialize_csv_file`]
pub fn load_nodes(path: &Path) -> Result<Vec<RoadNode>, Error> {
    Ok(deserialize_csv_file::<NodeRecord>(path)?
        .into_iter()
        .map(RoadNode::from)
        .collect())
}

/// # Errors
///
/// See [`deserialize_csv_file`]
pub fn load_edges(path: &Path) -> Result<Vec<RawEdge>, Error> {
    Ok(deserialize_csv_file::<EdgeRecord>(path)?
        .into_iter()
        .map(RawEdge::from)
        .collect())
}
