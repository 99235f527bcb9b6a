pub mod colors;
pub mod style;

pub use colors::Color;
pub use style::ChartStyle;

use ping_config::ThemeConfig;
use ping_core::Band;

/// Compiled theme derived from [`ThemeConfig`].
///
/// All colors are pre-parsed from hex strings into normalised `[0, 1]` RGBA.
/// Calling [`Theme::from_config`] is infallible: invalid color strings fall
/// back to safe defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub low:    Color,
    pub medium: Color,
    pub high:   Color,
    pub failed: Color,
    pub chart:  ChartStyle,
}

impl Theme {
    /// Build a [`Theme`] from the config file's `[theme]` section.
    pub fn from_config(cfg: &ThemeConfig) -> Self {
        let failed = parse_or(&cfg.failed, Color::RED, "failed");
        Self {
            low:    parse_or(&cfg.low, Color::WHITE, "low"),
            medium: parse_or(&cfg.medium, Color::ORANGE, "medium"),
            high:   parse_or(&cfg.high, Color::RED, "high"),
            failed,
            chart: ChartStyle {
                background: parse_or(&cfg.background, Color::CHARCOAL, "background"),
                grid:       parse_or(&cfg.grid, Color::GRID, "grid"),
                label:      parse_or(&cfg.label, Color::SILVER, "label"),
                line:       parse_or(&cfg.line, Color::SKY, "line"),
                failed,
                ..ChartStyle::default()
            },
        }
    }

    /// Foreground color for a latency band.
    pub fn band_color(&self, band: Band) -> Color {
        match band {
            Band::Low    => self.low,
            Band::Medium => self.medium,
            Band::High   => self.high,
            Band::Failed => self.failed,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

fn parse_or(hex: &str, fallback: Color, key: &str) -> Color {
    Color::from_hex(hex).unwrap_or_else(|| {
        tracing::warn!("theme.{key} = '{hex}' is not a hex color; using default");
        fallback
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_colors_fall_back() {
        let cfg = ThemeConfig {
            medium: "orange".into(),
            ..ThemeConfig::default()
        };
        let theme = Theme::from_config(&cfg);
        assert_eq!(theme.medium, Color::ORANGE);
    }

    #[test]
    fn band_colors_follow_config() {
        let cfg = ThemeConfig {
            low: "#00ff00".into(),
            ..ThemeConfig::default()
        };
        let theme = Theme::from_config(&cfg);
        assert_eq!(theme.band_color(Band::Low), Color { r: 0.0, g: 1.0, b: 0.0, a: 1.0 });
        assert_eq!(theme.band_color(Band::Failed), theme.chart.failed);
    }
}
