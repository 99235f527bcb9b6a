use crate::colors::Color;

/// Colors and stroke metrics used by the chart renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub background:    Color,
    pub grid:          Color,
    pub label:         Color,
    /// Latency line color when the line is drawn in a single color.
    pub line:          Color,
    pub failed:        Color,
    pub grid_width:    f32,
    pub line_width:    f32,
    /// Radius of the failed-probe markers.
    pub marker_radius: f32,
    pub font_size:     f32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            background:    Color::CHARCOAL,
            grid:          Color::GRID,
            label:         Color::SILVER,
            line:          Color::SKY,
            failed:        Color::RED,
            grid_width:    0.5,
            line_width:    2.0,
            marker_radius: 3.0,
            font_size:     10.0,
        }
    }
}
