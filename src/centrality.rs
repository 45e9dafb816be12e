use std::fmt::Write as _;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use roadnet_core::prelude::*;
use tracing::warn;

/// Runs the centrality computation, cancelling it once `timeout` has passed
pub fn compute(
    graph: &RoadGraph,
    weight: WeightSelector,
    timeout: Option<Duration>,
) -> anyhow::Result<CentralityResult> {
    let token = CancellationToken::new();
    let config = CentralityConfig {
        weight,
        cancellation: Some(token.clone()),
    };

    let result = match timeout {
        None => centrality(graph, &config),
        Some(timeout) => {
            let (done, finished) = mpsc::channel::<()>();
            thread::scope(|scope| {
                scope.spawn(move || {
                    if let Err(RecvTimeoutError::Timeout) = finished.recv_timeout(timeout) {
                        warn!("Centrality still running after {timeout:?}, cancelling");
                        token.cancel();
                    }
                });
                let result = centrality(graph, &config);
                // the watchdog may already be gone
                let _ = done.send(());
                result
            })
        }
    };

    result.context("Centrality computation failed")
}

/// Nodes ordered by descending betweenness, ties by ascending id
pub fn ranked(result: &CentralityResult) -> Vec<(NodeId, NodeCentrality)> {
    let mut rows: Vec<_> = result.iter().map(|(id, score)| (id, *score)).collect();
    rows.sort_by(|(a_id, a), (b_id, b)| {
        b.betweenness
            .total_cmp(&a.betweenness)
            .then_with(|| a_id.cmp(b_id))
    });
    rows
}

pub fn render_top(result: &CentralityResult, top: usize) -> anyhow::Result<String> {
    let mut out = String::new();
    writeln!(
        out,
        "{} nodes scored, max raw betweenness {:.1}",
        result.len(),
        result.max_raw_betweenness()
    )?;
    writeln!(out, "{:>14} {:>12} {:>12}", "node", "betweenness", "closeness")?;
    for (id, score) in ranked(result).into_iter().take(top) {
        writeln!(
            out,
            "{id:>14} {:>12.6} {:>12.6}",
            score.betweenness, score.closeness
        )?;
    }
    Ok(out)
}
