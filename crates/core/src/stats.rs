use crate::sample::Sample;

/// Aggregate figures over a window of samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub total:        usize,
    pub successes:    usize,
    /// Share of successful probes in percent, rounded to one decimal.
    pub success_rate: f64,
    /// Latency figures; `None` when no probe in the window succeeded.
    pub latency:      Option<LatencySummary>,
}

impl Stats {
    pub fn has_successes(&self) -> bool {
        self.latency.is_some()
    }
}

/// Average / minimum / maximum latency in milliseconds, each rounded to one
/// decimal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencySummary {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

/// Summarize `samples`.  Returns `None` for an empty window ("no data").
///
/// Recomputed from scratch on every call; there is no running state to drift
/// out of sync with the buffer.
pub fn summarize(samples: &[Sample]) -> Option<Stats> {
    if samples.is_empty() {
        return None;
    }

    let total = samples.len();
    let latencies: Vec<f64> = samples.iter().filter_map(Sample::latency).collect();
    let successes = latencies.len();
    let success_rate = round1(successes as f64 / total as f64 * 100.0);

    let latency = if latencies.is_empty() {
        None
    } else {
        let sum: f64 = latencies.iter().sum();
        let min = latencies.iter().copied().fold(f64::INFINITY, f64::min);
        let max = latencies.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(LatencySummary {
            avg: round1(sum / successes as f64),
            min: round1(min),
            max: round1(max),
        })
    };

    Some(Stats {
        total,
        successes,
        success_rate,
        latency,
    })
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
