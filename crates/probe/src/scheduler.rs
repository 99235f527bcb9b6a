use crate::executor::{ProbeFailure, ProbeOutcome, Prober};
use chrono::Local;
use ping_core::{Message, PingError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// What each probe cycle measures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTarget {
    pub host:    String,
    /// Bound for a single probe.
    pub timeout: Duration,
}

/// Fires a probe every `interval` and forwards results to the owner as
/// [`Message::ProbeCompleted`].
///
/// Cycles never wait for the previous probe, so slow probes may overlap and
/// their results arrive in completion order.  Every `start` opens a new
/// generation with its own liveness flag; `stop` clears the flag and cancels
/// the timer, and any probe still in flight is left to finish and discarded.
pub struct Scheduler<P> {
    prober:     Arc<P>,
    tx:         mpsc::Sender<Message>,
    generation: u64,
    run:        Option<Run>,
}

struct Run {
    alive:    Arc<AtomicBool>,
    timer:    JoinHandle<()>,
    interval: Duration,
    target:   Arc<ProbeTarget>,
}

impl<P: Prober> Scheduler<P> {
    pub fn new(prober: P, tx: mpsc::Sender<Message>) -> Self {
        Self {
            prober: Arc::new(prober),
            tx,
            generation: 0,
            run: None,
        }
    }

    /// Begin firing probe cycles every `interval`; the first cycle fires one
    /// interval from now.  A running schedule is stopped first.
    ///
    /// Fails if `interval` is zero or no Tokio runtime is available.
    pub fn start(&mut self, interval: Duration, target: ProbeTarget) -> Result<()> {
        if interval.is_zero() {
            return Err(PingError::Scheduler("probe interval must be positive".into()));
        }
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| PingError::Scheduler(format!("no async runtime for probe timer: {e}")))?;

        self.stop();
        self.generation += 1;

        let alive = Arc::new(AtomicBool::new(true));
        let target = Arc::new(target);
        let timer = runtime.spawn(timer_loop(
            self.generation,
            interval,
            Arc::clone(&target),
            Arc::clone(&self.prober),
            self.tx.clone(),
            Arc::clone(&alive),
        ));

        info!(
            generation = self.generation,
            host = %target.host,
            interval_ms = interval.as_millis() as u64,
            "Probe scheduler started"
        );

        self.run = Some(Run {
            alive,
            timer,
            interval,
            target,
        });
        Ok(())
    }

    /// Cancel the pending timer.  Probes already in flight are discarded when
    /// they complete.  No-op when not running.
    pub fn stop(&mut self) {
        let Some(run) = self.run.take() else {
            return;
        };
        run.alive.store(false, Ordering::Release);
        run.timer.abort();
        info!(generation = self.generation, "Probe scheduler stopped");
    }

    /// `stop` followed by `start` with new parameters.
    pub fn restart(&mut self, interval: Duration, target: ProbeTarget) -> Result<()> {
        self.stop();
        self.start(interval, target)
    }

    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Number of the most recent run; zero before the first `start`.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a completion tagged `generation` belongs to the live run.
    pub fn is_current(&self, generation: u64) -> bool {
        self.is_running() && generation == self.generation
    }

    pub fn interval(&self) -> Option<Duration> {
        self.run.as_ref().map(|r| r.interval)
    }

    pub fn target(&self) -> Option<&ProbeTarget> {
        self.run.as_ref().map(|r| r.target.as_ref())
    }
}

impl<P> Drop for Scheduler<P> {
    fn drop(&mut self) {
        if let Some(run) = self.run.take() {
            run.alive.store(false, Ordering::Release);
            run.timer.abort();
        }
    }
}

async fn timer_loop<P: Prober>(
    generation: u64,
    interval: Duration,
    target: Arc<ProbeTarget>,
    prober: Arc<P>,
    tx: mpsc::Sender<Message>,
    alive: Arc<AtomicBool>,
) {
    let mut ticker = time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        if !alive.load(Ordering::Acquire) {
            break;
        }
        tokio::spawn(probe_cycle(
            generation,
            Arc::clone(&target),
            Arc::clone(&prober),
            tx.clone(),
            Arc::clone(&alive),
        ));
    }
}

async fn probe_cycle<P: Prober>(
    generation: u64,
    target: Arc<ProbeTarget>,
    prober: Arc<P>,
    tx: mpsc::Sender<Message>,
    alive: Arc<AtomicBool>,
) {
    let outcome = prober.probe(&target.host, target.timeout).await;
    let captured = Local::now();

    if !alive.load(Ordering::Acquire) {
        debug!(generation, "Discarding probe result from stopped scheduler");
        return;
    }

    match &outcome {
        ProbeOutcome::Success { latency_ms } => {
            debug!(host = %target.host, latency_ms, "Probe succeeded");
        }
        ProbeOutcome::Failure(ProbeFailure::Launch(e)) => {
            warn!(host = %target.host, "Error starting probe: {e}");
        }
        ProbeOutcome::Failure(reason) => {
            debug!(host = %target.host, "Probe failed: {reason}");
        }
    }

    let sample = outcome.into_sample(captured);
    // A closed channel means the owner is gone; nothing left to record into.
    let _ = tx.send(Message::ProbeCompleted { generation, sample }).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use tokio::sync::{mpsc::error::TryRecvError, Semaphore};

    struct Fixed(f64);

    impl Prober for Fixed {
        fn probe(&self, _: &str, _: Duration) -> impl Future<Output = ProbeOutcome> + Send {
            let latency_ms = self.0;
            async move { ProbeOutcome::Success { latency_ms } }
        }
    }

    /// Blocks every probe until a permit is released.
    struct Gated(Arc<Semaphore>);

    impl Prober for Gated {
        fn probe(&self, _: &str, _: Duration) -> impl Future<Output = ProbeOutcome> + Send {
            let gate = Arc::clone(&self.0);
            async move {
                match gate.acquire().await {
                    Ok(_permit) => ProbeOutcome::Success { latency_ms: 1.0 },
                    Err(_) => ProbeOutcome::Failure(ProbeFailure::TimedOut),
                }
            }
        }
    }

    fn target() -> ProbeTarget {
        ProbeTarget {
            host:    "127.0.0.1".into(),
            timeout: Duration::from_secs(1),
        }
    }

    #[test]
    fn start_without_runtime_fails() {
        let (tx, _rx) = mpsc::channel(8);
        let mut scheduler = Scheduler::new(Fixed(1.0), tx);
        let err = scheduler
            .start(Duration::from_millis(10), target())
            .expect_err("no runtime");
        assert!(matches!(err, PingError::Scheduler(_)));
        assert!(!scheduler.is_running());
    }

    #[tokio::test]
    async fn zero_interval_is_rejected() {
        let (tx, _rx) = mpsc::channel(8);
        let mut scheduler = Scheduler::new(Fixed(1.0), tx);
        assert!(scheduler.start(Duration::ZERO, target()).is_err());
        assert_eq!(scheduler.generation(), 0);
    }

    #[tokio::test]
    async fn delivers_tagged_completions() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut scheduler = Scheduler::new(Fixed(7.0), tx);
        scheduler.start(Duration::from_millis(10), target()).expect("start");

        let msg = time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("probe within deadline")
            .expect("channel open");
        match msg {
            Message::ProbeCompleted { generation, sample } => {
                assert_eq!(generation, 1);
                assert_eq!(sample.latency(), Some(7.0));
            }
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[tokio::test]
    async fn stop_is_idempotent_and_silences_timer() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut scheduler = Scheduler::new(Fixed(7.0), tx);
        scheduler.stop();

        scheduler.start(Duration::from_millis(20), target()).expect("start");
        scheduler.stop();
        scheduler.stop();
        assert!(!scheduler.is_running());

        time::sleep(Duration::from_millis(80)).await;
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn restart_opens_new_generation() {
        let (tx, _rx) = mpsc::channel(8);
        let mut scheduler = Scheduler::new(Fixed(7.0), tx);
        scheduler.start(Duration::from_millis(50), target()).expect("start");
        assert!(scheduler.is_current(1));

        let moved = ProbeTarget {
            host: "192.0.2.1".into(),
            ..target()
        };
        scheduler.restart(Duration::from_millis(25), moved.clone()).expect("restart");
        assert_eq!(scheduler.generation(), 2);
        assert!(!scheduler.is_current(1));
        assert!(scheduler.is_current(2));
        assert_eq!(scheduler.interval(), Some(Duration::from_millis(25)));
        assert_eq!(scheduler.target(), Some(&moved));
    }

    #[tokio::test]
    async fn in_flight_probes_are_dropped_after_stop() {
        let gate = Arc::new(Semaphore::new(0));
        let (tx, mut rx) = mpsc::channel(64);
        let mut scheduler = Scheduler::new(Gated(Arc::clone(&gate)), tx);
        scheduler.start(Duration::from_millis(5), target()).expect("start");

        time::sleep(Duration::from_millis(40)).await;
        scheduler.stop();
        gate.add_permits(1_000);
        time::sleep(Duration::from_millis(40)).await;

        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }
}
