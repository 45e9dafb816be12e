use super::SpeedTable;
use crate::{
    Kmh,
    model::{RoadClass, SpeedTag, SpeedSource},
};

/// Effective speed of an edge: the posted speed when it is a usable
/// number, the speed table otherwise. Missing and malformed tags are the
/// same case here.
pub fn infer_speed(posted: &SpeedTag, class: &RoadClass, table: &SpeedTable) -> (Kmh, SpeedSource) {
    match posted.usable() {
        Some(speed) => (speed, SpeedSource::Posted),
        None => (table.speed_for(class), SpeedSource::Inferred),
    }
}
