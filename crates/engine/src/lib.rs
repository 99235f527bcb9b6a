//! The ping sampling engine.
//!
//! Owns the history buffer and wires together:
//! - the probe scheduler (background timer + probe tasks)
//! - the live display value (refreshed on the host's display tick)
//! - the stats line and chart renderer (pulled on demand)
//!
//! The engine is a plain struct driven by one owner loop.  Background tasks
//! only ever talk to it through the [`Message`] channel returned by
//! [`Engine::new`], so the buffer has a single writer and snapshots are taken
//! through `&self`.

use ping_config::PingConfig;
use ping_core::{HistoryBuffer, Message, Result, Sample, Snapshot, Stats};
use ping_probe::{ProbeTarget, Prober, Scheduler};
use ping_renderer::{ChartOptions, DrawCommand, Size};
use ping_theme::Theme;
use ping_widgets::{LatencyWidget, LiveDisplay, StatsWidget};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Capacity of the completion channel between probe tasks and the owner.
const CHANNEL_CAPACITY: usize = 64;

pub struct Engine<P> {
    config:    PingConfig,
    theme:     Theme,
    scheduler: Scheduler<P>,
    history:   HistoryBuffer,
    display:   LiveDisplay,
    latency:   LatencyWidget,
    stats:     StatsWidget,
}

impl<P: Prober> Engine<P> {
    /// Build a stopped engine.  The returned receiver carries probe
    /// completions; feed every message back into [`Engine::handle`].
    pub fn new(config: PingConfig, prober: P) -> (Self, mpsc::Receiver<Message>) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let theme = Theme::from_config(&config.theme);

        let engine = Self {
            history:   HistoryBuffer::new(config.probe.history_length),
            display:   LiveDisplay::placeholder(&theme),
            scheduler: Scheduler::new(prober, tx),
            latency:   LatencyWidget::new(),
            stats:     StatsWidget::new(),
            config,
            theme,
        };

        (engine, rx)
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────────

    /// Create a fresh history buffer and start probing.
    pub fn start(&mut self) -> Result<()> {
        self.history = HistoryBuffer::new(self.config.probe.history_length);
        self.display = LiveDisplay::placeholder(&self.theme);
        self.scheduler.start(self.probe_interval(), self.probe_target())?;
        info!(
            host = %self.config.probe.host,
            history = self.history.capacity(),
            "Ping engine started"
        );
        Ok(())
    }

    /// Stop probing and release the history.  Late completions from probes
    /// that were in flight are ignored.
    pub fn stop(&mut self) {
        if !self.scheduler.is_running() {
            return;
        }
        self.scheduler.stop();
        self.history.clear();
        self.display = LiveDisplay::placeholder(&self.theme);
        info!("Ping engine stopped");
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Swap in a new configuration.  The scheduler is restarted only when the
    /// probe target or cadence changed; a new history length keeps the newest
    /// samples that still fit.
    pub fn apply_config(&mut self, config: PingConfig) -> Result<()> {
        let probe_changed = config.probe.host != self.config.probe.host
            || config.probe.interval_ms != self.config.probe.interval_ms
            || config.probe.timeout_secs != self.config.probe.timeout_secs;
        let capacity_changed = config.probe.history_length != self.config.probe.history_length;

        self.theme = Theme::from_config(&config.theme);
        self.config = config;

        if capacity_changed {
            let old = self.history.snapshot();
            let mut resized = HistoryBuffer::new(self.config.probe.history_length);
            for sample in old.samples() {
                resized.append(sample.clone());
            }
            self.history = resized;
        }

        if probe_changed && self.scheduler.is_running() {
            self.scheduler
                .restart(self.probe_interval(), self.probe_target())?;
        }

        info!("Ping engine configuration applied");
        Ok(())
    }

    // ── Update ────────────────────────────────────────────────────────────────

    pub fn handle(&mut self, msg: Message) {
        match msg {
            Message::ProbeCompleted { generation, sample } => {
                self.record(generation, sample);
            }
            Message::DisplayTick => {
                self.refresh_display();
            }
            Message::Shutdown => self.stop(),
        }
    }

    /// Append a completed probe if it belongs to the live scheduler run.
    /// Returns whether the sample was kept.
    fn record(&mut self, generation: u64, sample: Sample) -> bool {
        if !self.scheduler.is_current(generation) {
            debug!(generation, "Ignoring completion from a stopped probe run");
            return false;
        }
        self.history.append(sample);
        true
    }

    /// Recompute the live value from the newest sample.
    pub fn refresh_display(&mut self) -> &LiveDisplay {
        if let Some(latest) = self.history.latest() {
            self.display = self.latency.view(latest, &self.config.thresholds, &self.theme);
        }
        &self.display
    }

    // ── Presentation pulls ────────────────────────────────────────────────────

    /// Current classified value and band.
    pub fn display(&self) -> &LiveDisplay {
        &self.display
    }

    pub fn snapshot(&self) -> Snapshot {
        self.history.snapshot()
    }

    pub fn stats(&self) -> Option<Stats> {
        ping_core::summarize(self.history.snapshot().samples())
    }

    /// One-line summary for the stats label.
    pub fn summary(&self) -> String {
        self.stats.view(self.history.snapshot().samples())
    }

    /// Render the chart for a `width` × `height` surface.
    pub fn render_chart(&self, width: f32, height: f32) -> Vec<DrawCommand> {
        let options = ChartOptions::from_config(&self.config, &self.theme);
        ping_renderer::render(&self.history.snapshot(), Size::new(width, height), &options)
    }

    pub fn config(&self) -> &PingConfig {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// How often the host should send [`Message::DisplayTick`].
    pub fn display_refresh_interval(&self) -> Duration {
        Duration::from_millis(self.config.display.refresh_interval_ms)
    }

    /// Generation of the current scheduler run.
    pub fn generation(&self) -> u64 {
        self.scheduler.generation()
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn probe_interval(&self) -> Duration {
        Duration::from_millis(self.config.probe.interval_ms)
    }

    fn probe_target(&self) -> ProbeTarget {
        ProbeTarget {
            host:    self.config.probe.host.clone(),
            timeout: Duration::from_secs(self.config.probe.timeout_secs),
        }
    }
}
