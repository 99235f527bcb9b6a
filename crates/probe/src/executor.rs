use chrono::{DateTime, Local};
use ping_core::Sample;
use std::future::Future;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tokio::time;

/// Extra time granted to the child process beyond its own `-W` deadline
/// before it is killed.
const KILL_GRACE: Duration = Duration::from_secs(1);

/// Result of a single latency measurement.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    Success { latency_ms: f64 },
    Failure(ProbeFailure),
}

/// Why a probe produced no latency.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProbeFailure {
    #[error("could not run probe: {0}")]
    Launch(String),

    #[error("probe timed out")]
    TimedOut,

    #[error("probe exited with status {}", exit_label(.0))]
    ExitStatus(Option<i32>),

    #[error("probe output has no round-trip time")]
    Unparseable,
}

fn exit_label(code: &Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| c.to_string())
}

impl ProbeOutcome {
    /// Fold the outcome into a history sample captured at `at`.  The failure
    /// reason is not retained.
    pub fn into_sample(self, at: DateTime<Local>) -> Sample {
        match self {
            ProbeOutcome::Success { latency_ms } => Sample::success(at, latency_ms),
            ProbeOutcome::Failure(_) => Sample::failure(at),
        }
    }
}

/// Something that can take one round-trip latency measurement.
///
/// Implementations must resolve exactly once per call and must not block the
/// caller; the scheduler drives every probe on its own task.
pub trait Prober: Send + Sync + 'static {
    fn probe(&self, host: &str, timeout: Duration) -> impl Future<Output = ProbeOutcome> + Send;
}

/// Runs the system `ping` binary: `ping -c 1 -W <secs> <host>`.
#[derive(Debug, Clone)]
pub struct SystemPing {
    program: String,
}

impl SystemPing {
    pub fn new() -> Self {
        Self::with_program("ping")
    }

    /// Use a different executable that accepts the same arguments.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for SystemPing {
    fn default() -> Self {
        Self::new()
    }
}

impl Prober for SystemPing {
    fn probe(&self, host: &str, timeout: Duration) -> impl Future<Output = ProbeOutcome> + Send {
        let wait_secs = timeout.as_secs().max(1);

        let mut cmd = Command::new(&self.program);
        cmd.args(["-c", "1", "-W"])
            .arg(wait_secs.to_string())
            .arg(host)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        run(cmd, Duration::from_secs(wait_secs) + KILL_GRACE)
    }
}

async fn run(mut cmd: Command, deadline: Duration) -> ProbeOutcome {
    let child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => return ProbeOutcome::Failure(ProbeFailure::Launch(e.to_string())),
    };

    // Dropping the future on timeout drops the child, which kills it.
    let output = match time::timeout(deadline, child.wait_with_output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => return ProbeOutcome::Failure(ProbeFailure::Launch(e.to_string())),
        Err(_) => return ProbeOutcome::Failure(ProbeFailure::TimedOut),
    };

    if !output.status.success() {
        return ProbeOutcome::Failure(ProbeFailure::ExitStatus(output.status.code()));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    match parse_rtt(&stdout) {
        Some(latency_ms) => ProbeOutcome::Success { latency_ms },
        None => ProbeOutcome::Failure(ProbeFailure::Unparseable),
    }
}

/// Extract the first `time=<number>` figure from a `ping` report.
///
/// Only the `time=` form is recognised; `time<1 ms` is treated as unparseable.
pub fn parse_rtt(output: &str) -> Option<f64> {
    const KEY: &str = "time=";

    output.match_indices(KEY).find_map(|(idx, _)| {
        let rest = &output[idx + KEY.len()..];
        let end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        rest[..end].parse::<f64>().ok().filter(|v| v.is_finite())
    })
}
