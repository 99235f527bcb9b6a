use chrono::{DateTime, Local};

/// One probe outcome.
///
/// A sample carries a latency only when the probe succeeded and reported a
/// parseable round-trip time, so `success() == false` always implies
/// `latency() == None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    timestamp: DateTime<Local>,
    latency:   Option<f64>,
}

impl Sample {
    /// A successful probe that measured `latency_ms`.
    pub fn success(timestamp: DateTime<Local>, latency_ms: f64) -> Self {
        Self {
            timestamp,
            latency: Some(latency_ms),
        }
    }

    /// A probe that failed for any reason.
    pub fn failure(timestamp: DateTime<Local>) -> Self {
        Self {
            timestamp,
            latency: None,
        }
    }

    /// Capture time of the probe result.
    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// Round-trip time in milliseconds, `None` for failed probes.
    pub fn latency(&self) -> Option<f64> {
        self.latency
    }

    pub fn is_success(&self) -> bool {
        self.latency.is_some()
    }
}
