use crate::sample::Sample;

/// All messages that flow from background tasks into the engine's owner loop.
///
/// Sources:
/// - Probe tasks spawned by the scheduler → `ProbeCompleted`
/// - Display refresh timer                → `DisplayTick`
/// - Host shutdown (Ctrl-C)               → `Shutdown`
#[derive(Debug, Clone)]
pub enum Message {
    // ── Probing ───────────────────────────────────────────────────────────────
    /// A probe finished.  `generation` identifies the scheduler run that issued
    /// it; completions from a stopped run are discarded by the owner.
    ProbeCompleted { generation: u64, sample: Sample },

    // ── Display ───────────────────────────────────────────────────────────────
    /// Refresh the compact live value from the newest sample.
    DisplayTick,

    // ── Lifecycle ─────────────────────────────────────────────────────────────
    /// Stop probing and release the history.
    Shutdown,
}
