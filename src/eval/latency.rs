//! Caller-observed latency of an embedding provider.
//!
//! Every timed call counts; there is no warm-up run. The numbers include
//! whatever the provider does per call (batching, network round trips), not
//! just model compute.

use crate::embed::Embedder;
use crate::error::{BenchError, Result};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

/// Default number of timed calls.
pub const DEFAULT_RUNS: usize = 5;

/// Latency statistics in milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatencyStats {
    pub mean_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    /// Number of timed calls.
    pub runs: usize,
}

impl LatencyStats {
    /// Create from per-call durations in milliseconds.
    pub fn from_samples(samples_ms: &[f64]) -> Self {
        if samples_ms.is_empty() {
            return Self::default();
        }

        let mut sorted = samples_ms.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mean_ms = sorted.iter().sum::<f64>() / sorted.len() as f64;

        Self {
            mean_ms,
            p95_ms: percentile(&sorted, 95.0),
            p99_ms: percentile(&sorted, 99.0),
            min_ms: sorted[0],
            max_ms: sorted[sorted.len() - 1],
            runs: sorted.len(),
        }
    }
}

/// Percentile `p` (0-100) of ascending `sorted` samples, interpolating
/// linearly between the two nearest order statistics.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }

    let rank = (p / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;

    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Call `embedder` on `texts` `runs` times and summarize the wall-clock times.
pub async fn measure_latency<E: Embedder>(
    embedder: &E,
    texts: &[String],
    runs: usize,
) -> Result<LatencyStats> {
    if runs == 0 {
        return Err(BenchError::InvalidConfig(
            "latency measurement needs at least one run".to_string(),
        ));
    }

    let mut samples = Vec::with_capacity(runs);

    for run in 0..runs {
        let start = Instant::now();
        embedder.embed(texts).await?;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        debug!(run, elapsed_ms, "Timed provider call");
        samples.push(elapsed_ms);
    }

    Ok(LatencyStats::from_samples(&samples))
}
