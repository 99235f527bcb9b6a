//! pingbar: samples round-trip latency to one host and keeps a rolling
//! history for a status-bar latency widget.
//!
//! Run with:  `RUST_LOG=info pingbar`

use anyhow::Result;
use ping_config::{default_path, load, load_or_default, ConfigWatcher};
use ping_core::Message;
use ping_engine::Engine;
use ping_probe::SystemPing;
use std::time::Duration;
use tokio::time::{self, Interval, MissedTickBehavior};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("pingbar v{} starting", env!("CARGO_PKG_VERSION"));

    let config_path = default_path();
    let config = load_or_default(&config_path);

    let (mut engine, mut completions) = Engine::new(config, SystemPing::new());
    engine.start()?;

    let (_watcher, mut reloads) = ConfigWatcher::spawn(&config_path);
    let mut refresh = display_ticker(engine.display_refresh_interval());

    loop {
        tokio::select! {
            Some(msg) = completions.recv() => engine.handle(msg),

            _ = refresh.tick() => {
                engine.handle(Message::DisplayTick);
                let live = engine.display();
                info!(
                    latency = %live.text,
                    class = live.style_class(),
                    "{}",
                    engine.summary()
                );
            }

            Some(()) = reloads.recv() => {
                info!("Config file changed, reloading");
                let reloaded = match load(&config_path) {
                    Ok(config) => config,
                    Err(e) => {
                        warn!("{e}; keeping the current configuration");
                        continue;
                    }
                };
                let previous = engine.display_refresh_interval();
                if let Err(e) = engine.apply_config(reloaded) {
                    error!("Failed to apply reloaded config: {e}");
                    continue;
                }
                if engine.display_refresh_interval() != previous {
                    refresh = display_ticker(engine.display_refresh_interval());
                }
            }

            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, shutting down");
                engine.handle(Message::Shutdown);
                break;
            }
        }
    }

    Ok(())
}

/// Ticker for refreshing the live value; the first tick fires one period out.
fn display_ticker(period: Duration) -> Interval {
    let mut ticker = time::interval_at(time::Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}
