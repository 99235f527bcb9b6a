use ping_core::{Thresholds, DEFAULT_HISTORY_LENGTH};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Root configuration structure parsed from `pingbar.toml`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PingConfig {
    /// What to probe and how often.
    pub probe: ProbeConfig,
    /// Live value and chart settings.
    pub display: DisplayConfig,
    /// Latency cut-points for color coding.
    pub thresholds: Thresholds,
    /// Theme / visual settings.
    pub theme: ThemeConfig,
}

impl PingConfig {
    /// Replace out-of-range values with their documented defaults, logging a
    /// warning for each field that had to be corrected.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        let probe = ProbeConfig::default();
        let display_defaults = DisplayConfig::default();
        let thresholds = Thresholds::default();

        let host = self.probe.host.trim();
        if host.is_empty() {
            warn!("probe.host is empty; using '{}'", probe.host);
            self.probe.host = probe.host;
        } else if host.len() != self.probe.host.len() {
            self.probe.host = host.to_string();
        }
        if self.probe.interval_ms == 0 {
            warn!("probe.interval_ms must be positive; using {}", probe.interval_ms);
            self.probe.interval_ms = probe.interval_ms;
        }
        if self.probe.timeout_secs == 0 {
            warn!("probe.timeout_secs must be positive; using {}", probe.timeout_secs);
            self.probe.timeout_secs = probe.timeout_secs;
        }
        if self.probe.history_length == 0 {
            warn!(
                "probe.history_length must be positive; using {}",
                probe.history_length
            );
            self.probe.history_length = probe.history_length;
        }
        if self.display.refresh_interval_ms == 0 {
            warn!(
                "display.refresh_interval_ms must be positive; using {}",
                display_defaults.refresh_interval_ms
            );
            self.display.refresh_interval_ms = display_defaults.refresh_interval_ms;
        }

        let t = &mut self.thresholds;
        for (name, value, fallback) in [
            ("low", &mut t.low, thresholds.low),
            ("medium", &mut t.medium, thresholds.medium),
            ("high", &mut t.high, thresholds.high),
        ] {
            if *value == 0 {
                warn!("thresholds.{name} must be positive; using {fallback}");
                *value = fallback;
            }
        }

        self
    }
}

/// Probe target and cadence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Host name or address handed to `ping`.
    pub host: String,
    /// Milliseconds between probe cycles.
    pub interval_ms: u64,
    /// Upper bound for a single probe, in whole seconds.
    pub timeout_secs: u64,
    /// Number of samples kept in the history buffer.
    pub history_length: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            host:           "1.1.1.1".to_string(),
            interval_ms:    1_000,
            timeout_secs:   2,
            history_length: DEFAULT_HISTORY_LENGTH,
        }
    }
}

/// Presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// How often the compact live value is refreshed, independent of probing.
    pub refresh_interval_ms: u64,
    /// Reserve a margin and draw latency labels along the chart's left edge.
    pub show_axis_labels: bool,
    /// Where the host shell places the indicator.  Not used by the engine.
    pub panel_position: PanelPosition,
    /// How the latency line is colored.
    pub line_coloring: LineColoring,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: 5_000,
            show_axis_labels:    true,
            panel_position:      PanelPosition::Right,
            line_coloring:       LineColoring::Solid,
        }
    }
}

/// Indicator position in the host panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PanelPosition {
    Left,
    #[default]
    Right,
}

/// Latency line coloring in the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LineColoring {
    /// One color for the whole line.
    #[default]
    Solid,
    /// Each segment takes the color of its worse endpoint's band.
    ByBand,
}

/// Theme / styling configuration.  Colors are hex strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Live value color for the low band.
    pub low: String,
    /// Live value color for the medium band.
    pub medium: String,
    /// Live value color for the high band.
    pub high: String,
    /// Live value and chart marker color for failed probes.
    pub failed: String,
    /// Chart background.
    pub background: String,
    /// Chart grid lines.
    pub grid: String,
    /// Axis label text.
    pub label: String,
    /// Latency line when coloring is `solid`.
    pub line: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            low:        "#ffffff".to_string(),
            medium:     "#ff9900".to_string(),
            high:       "#ff4536".to_string(),
            failed:     "#ff4536".to_string(),
            background: "#292929".to_string(),
            grid:       "#66666680".to_string(),
            label:      "#cccccc".to_string(),
            line:       "#4db3ff".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg: PingConfig = toml::from_str("").expect("empty TOML parses");
        assert_eq!(cfg, PingConfig::default());
        assert_eq!(cfg.probe.host, "1.1.1.1");
        assert_eq!(cfg.probe.history_length, 300);
        assert_eq!(cfg.display.refresh_interval_ms, 5_000);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let raw = r#"
            [probe]
            host = "example.org"

            [thresholds]
            medium = 150

            [display]
            show_axis_labels = false
            panel_position = "left"
            line_coloring = "by-band"
        "#;
        let cfg: PingConfig = toml::from_str(raw).expect("valid TOML");
        assert_eq!(cfg.probe.host, "example.org");
        assert_eq!(cfg.probe.interval_ms, 1_000);
        assert_eq!(cfg.thresholds, Thresholds { low: 50, medium: 150, high: 200 });
        assert!(!cfg.display.show_axis_labels);
        assert_eq!(cfg.display.panel_position, PanelPosition::Left);
        assert_eq!(cfg.display.line_coloring, LineColoring::ByBand);
    }

    #[test]
    fn sanitize_restores_defaults_for_invalid_fields() {
        let mut cfg = PingConfig::default();
        cfg.probe.host = "   ".into();
        cfg.probe.interval_ms = 0;
        cfg.probe.history_length = 0;
        cfg.display.refresh_interval_ms = 0;
        cfg.thresholds.medium = 0;

        let cfg = cfg.sanitized();
        assert_eq!(cfg, PingConfig::default());
    }

    #[test]
    fn sanitize_restores_refresh_interval_only() {
        let mut cfg = PingConfig::default();
        cfg.display.refresh_interval_ms = 0;
        cfg.display.show_axis_labels = false;

        let cfg = cfg.sanitized();
        assert_eq!(cfg.display.refresh_interval_ms, 5_000);
        assert!(!cfg.display.show_axis_labels);
    }

    #[test]
    fn sanitize_trims_host_and_keeps_unordered_thresholds() {
        let mut cfg = PingConfig::default();
        cfg.probe.host = " 8.8.8.8 ".into();
        cfg.thresholds = Thresholds { low: 300, medium: 20, high: 10 };

        let cfg = cfg.sanitized();
        assert_eq!(cfg.probe.host, "8.8.8.8");
        assert_eq!(cfg.thresholds, Thresholds { low: 300, medium: 20, high: 10 });
    }
}
