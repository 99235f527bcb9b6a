pub mod band;
pub mod error;
pub mod event;
pub mod history;
pub mod sample;
pub mod stats;

pub use band::{classify, Band, Thresholds};
pub use error::{PingError, Result};
pub use event::Message;
pub use history::{HistoryBuffer, Snapshot, DEFAULT_HISTORY_LENGTH};
pub use sample::Sample;
pub use stats::{summarize, LatencySummary, Stats};
