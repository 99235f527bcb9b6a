pub mod latency;
pub mod stats;

pub use latency::{LatencyWidget, LiveDisplay};
pub use stats::{format_summary, StatsWidget};
