use serde::Deserialize;

use crate::model::{RoadClass, SpeedTag};

/// First entry of a list literal such as `['residential', 'service']`, or
/// the trimmed value itself
fn first_list_entry(raw: &str) -> &str {
    let trimmed = raw.trim();
    match trimmed
        .strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
    {
        Some(inner) => inner
            .split(',')
            .map(|item| item.trim().trim_matches(['\'', '"']).trim())
            .find(|item| !item.is_empty())
            .unwrap_or_default(),
        None => trimmed,
    }
}

pub(super) fn deserialize_road_class<'de, D>(deserializer: D) -> Result<RoadClass, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(RoadClass::from(first_list_entry(&raw)))
}

pub(super) fn deserialize_speed_tag<'de, D>(deserializer: D) -> Result<SpeedTag, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.map_or(SpeedTag::Missing, |raw| SpeedTag::parse(&raw)))
}
