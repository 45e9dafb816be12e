use itertools::Itertools;
use log::{info, warn};
use rayon::prelude::*;

use super::{SpeedPolicy, SpeedTable, WeightingConfig, infer_speed};
use crate::{
    Error, Kmh, Meters, Minutes,
    model::{RawEdge, RoadEdge, RoadGraph, SpeedTag},
};

/// Minutes needed to cover `length` meters at `speed` km/h
pub fn travel_time_minutes(length: Meters, speed: Kmh) -> Minutes {
    length / (speed / 3.6) / 60.0
}

/// Derives effective speed and travel time for each edge.
///
/// Weighting is a pure function of the edge's length, class and posted
/// speed, so edges are processed in parallel and re-weighting an already
/// weighted edge reproduces the same values.
#[derive(Debug, Clone, Default)]
pub struct WeightComputer {
    table: SpeedTable,
    policy: SpeedPolicy,
}

impl WeightComputer {
    pub fn new(table: SpeedTable, policy: SpeedPolicy) -> Self {
        Self { table, policy }
    }

    /// # Errors
    ///
    /// Returns an error if the configured speeds are invalid
    pub fn from_config(config: &WeightingConfig) -> Result<Self, Error> {
        Ok(Self::new(config.speed_table()?, config.speed_policy))
    }

    pub fn table(&self) -> &SpeedTable {
        &self.table
    }

    /// # Errors
    ///
    /// Under [`SpeedPolicy::Strict`] a malformed posted speed is reported as
    /// [`Error::InvalidSpeedTag`]. Lenient weighting never fails.
    pub fn weigh(&self, edge: &RawEdge) -> Result<RoadEdge, Error> {
        if let (SpeedPolicy::Strict, SpeedTag::Malformed(raw)) =
            (self.policy, &edge.posted_speed)
        {
            return Err(Error::InvalidSpeedTag {
                from: edge.source,
                to: edge.target,
                raw: raw.clone(),
            });
        }

        let (effective_speed, speed_source) =
            infer_speed(&edge.posted_speed, &edge.road_class, &self.table);

        Ok(RoadEdge {
            source: edge.source,
            target: edge.target,
            length: edge.length,
            road_class: edge.road_class.clone(),
            posted_speed: edge.posted_speed.clone(),
            effective_speed,
            speed_source,
            travel_time: travel_time_minutes(edge.length, effective_speed),
        })
    }

    /// Weigh all edges, preserving their order
    ///
    /// # Errors
    ///
    /// See [`WeightComputer::weigh`]
    pub fn weigh_all(&self, edges: &[RawEdge]) -> Result<Vec<RoadEdge>, Error> {
        let weighted = edges
            .par_iter()
            .map(|edge| self.weigh(edge))
            .collect::<Result<Vec<_>, _>>()?;

        report_data_quality(edges);
        info!("Weighted {} edges", weighted.len());
        Ok(weighted)
    }

    /// New graph with every edge re-weighted by this computer
    ///
    /// # Errors
    ///
    /// See [`WeightComputer::weigh`]
    pub fn reweigh(&self, graph: &RoadGraph) -> Result<RoadGraph, Error> {
        graph.map_edges(|edge| self.weigh(&edge.to_raw()))
    }
}

fn report_data_quality(edges: &[RawEdge]) {
    let malformed = edges
        .iter()
        .filter(|edge| edge.posted_speed.is_malformed())
        .count();
    if malformed > 0 {
        warn!("{malformed} edges have an unusable speed tag, speed inferred from road class");
    }

    let unrecognized: Vec<_> = edges
        .iter()
        .filter(|edge| !edge.road_class.is_recognized())
        .map(|edge| edge.road_class.as_str())
        .collect();
    if !unrecognized.is_empty() {
        warn!(
            "{} edges have an unrecognized road class ({}), using the fallback speed",
            unrecognized.len(),
            unrecognized.iter().unique().sorted().join(", ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RoadClass, SpeedSource};

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0),
            "{actual} != {expected}"
        );
    }

    #[test]
    fn travel_time_formula() {
        assert_close(travel_time_minutes(100.0, 10.0), 0.6);
        assert_close(travel_time_minutes(1000.0, 60.0), 1.0);
        assert_eq!(travel_time_minutes(0.0, 80.0), 0.0);
    }

    #[test]
    fn weighs_with_posted_speed() {
        let edge = RawEdge::new(1, 2, 1500.0, RoadClass::Residential)
            .with_posted_speed(SpeedTag::Posted(90.0));
        let weighted = WeightComputer::default().weigh(&edge).unwrap();
        assert_eq!(weighted.effective_speed, 90.0);
        assert_eq!(weighted.speed_source, SpeedSource::Posted);
        assert_close(weighted.travel_time, 1.0);
    }

    #[test]
    fn weighing_is_idempotent() {
        let computer = WeightComputer::default();
        let edge = RawEdge::new(1, 2, 123.4, RoadClass::Trunk);
        let first = computer.weigh(&edge).unwrap();
        let second = computer.weigh(&first.to_raw()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.travel_time.to_bits(), second.travel_time.to_bits());
    }

    #[test]
    fn strict_policy_surfaces_malformed_tags() {
        let computer = WeightComputer::new(SpeedTable::default(), SpeedPolicy::Strict);
        let edge = RawEdge::new(4, 5, 10.0, RoadClass::Primary)
            .with_posted_speed(SpeedTag::parse("50 mph"));
        let err = computer.weigh(&edge).unwrap_err();
        assert!(matches!(err, Error::InvalidSpeedTag { from: 4, to: 5, .. }));

        // missing is not malformed
        let edge = RawEdge::new(4, 5, 10.0, RoadClass::Primary);
        assert_eq!(computer.weigh(&edge).unwrap().effective_speed, 90.0);
    }

    #[test]
    fn lenient_policy_recovers() {
        let edge = RawEdge::new(4, 5, 10.0, RoadClass::Primary)
            .with_posted_speed(SpeedTag::parse("50 mph"));
        let weighted = WeightComputer::default().weigh(&edge).unwrap();
        assert_eq!(weighted.effective_speed, 90.0);
        assert_eq!(weighted.speed_source, SpeedSource::Inferred);
    }

    #[test]
    fn reweighing_a_graph() {
        let graph = crate::test_utils::graph_from(
            &[(1, 0.0, 0.0), (2, 1.0, 0.0)],
            &[(1, 2, 600.0, "motorway"), (2, 1, 600.0, "residential")],
        );

        let same = WeightComputer::default().reweigh(&graph).unwrap();
        assert!(graph.edges().eq(same.edges()));

        let overrides = std::collections::BTreeMap::from([(RoadClass::Motorway, 36.0)]);
        let table = SpeedTable::new(60.0, overrides).unwrap();
        let slower = WeightComputer::new(table, SpeedPolicy::Lenient);
        let reweighed = slower.reweigh(&graph).unwrap();
        let motorway = reweighed.edges().find(|edge| edge.source == 1).unwrap();
        assert_eq!(motorway.effective_speed, 36.0);
        assert_close(motorway.travel_time, 1.0);
        assert_eq!(reweighed.node_count(), 2);
    }

    #[test]
    fn computer_from_config() {
        let config = WeightingConfig {
            fallback_speed_kmh: 45.0,
            ..WeightingConfig::default()
        };
        let computer = WeightComputer::from_config(&config).unwrap();
        assert_eq!(computer.table().fallback(), 45.0);
        assert_eq!(computer.table().speed_for(&RoadClass::Service), 45.0);

        let invalid = WeightingConfig {
            fallback_speed_kmh: -5.0,
            ..WeightingConfig::default()
        };
        assert!(WeightComputer::from_config(&invalid).is_err());
    }

    #[test]
    fn weigh_all_preserves_order() {
        let edges: Vec<_> = (0..50)
            .map(|i| RawEdge::new(i, i + 1, i as f64, RoadClass::Secondary))
            .collect();
        let weighted = WeightComputer::default().weigh_all(&edges).unwrap();
        for (raw, edge) in edges.iter().zip(&weighted) {
            assert_eq!(raw.source, edge.source);
            assert_close(edge.travel_time, travel_time_minutes(raw.length, 80.0));
        }
    }
}
