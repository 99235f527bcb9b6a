use ping_core::{classify, Band, Sample, Thresholds};
use ping_theme::{Color, Theme};

/// The compact always-visible value: `"42ms"` or `"-"`, plus its band.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveDisplay {
    pub text:    String,
    pub band:    Band,
    pub color:   Color,
    /// Unrounded latency behind `text`, `None` for a failed probe.
    pub latency: Option<f64>,
}

impl LiveDisplay {
    /// Shown before the first refresh has seen a sample.
    pub fn placeholder(theme: &Theme) -> Self {
        Self {
            text:    "-- ms".to_string(),
            band:    Band::Failed,
            color:   theme.band_color(Band::Failed),
            latency: None,
        }
    }

    pub fn style_class(&self) -> &'static str {
        self.band.style_class()
    }
}

/// Turns the newest sample into a [`LiveDisplay`].
#[derive(Debug, Default)]
pub struct LatencyWidget;

impl LatencyWidget {
    pub fn new() -> Self {
        Self
    }

    pub fn view(&self, latest: &Sample, thresholds: &Thresholds, theme: &Theme) -> LiveDisplay {
        let latency = latest.latency();
        let band = classify(latency, thresholds);
        let text = match latency {
            Some(ms) => format!("{}ms", ms.round() as i64),
            None => "-".to_string(),
        };

        LiveDisplay {
            text,
            band,
            color: theme.band_color(band),
            latency,
        }
    }
}
