//! Latency probing: the `ping` executor and the interval scheduler that
//! drives it.

pub mod executor;
pub mod scheduler;

pub use executor::{parse_rtt, ProbeFailure, ProbeOutcome, Prober, SystemPing};
pub use scheduler::{ProbeTarget, Scheduler};
