//! Chart renderer for the latency history.
//!
//! [`render`] is a pure function from a history snapshot, a viewport and the
//! display options to a list of [`DrawCommand`]s.  It never fails: too little
//! data simply yields the background.

pub mod commands;
pub mod geometry;
pub mod scale;

pub use commands::{DrawCommand, TextAnchor};
pub use geometry::{Point, Rect, Size};
pub use scale::ValueRange;

use ping_config::{LineColoring, PingConfig};
use ping_core::{classify, Band, Snapshot, Thresholds};
use ping_theme::Theme;

/// Left margin when axis labels are shown.
const LABEL_MARGIN: f32 = 50.0;
/// Left margin without labels, and the right/top/bottom margins.
const EDGE_MARGIN: f32 = 10.0;
/// Gap between an axis label and the chart's left edge.
const LABEL_GAP: f32 = 5.0;
const HORIZONTAL_DIVISIONS: usize = 5;
const VERTICAL_DIVISIONS: usize = 10;

/// Per-render display options.
#[derive(Debug, Clone)]
pub struct ChartOptions {
    pub show_axis_labels: bool,
    pub line_coloring:    LineColoring,
    pub thresholds:       Thresholds,
    pub theme:            Theme,
}

impl ChartOptions {
    pub fn from_config(config: &PingConfig, theme: &Theme) -> Self {
        Self {
            show_axis_labels: config.display.show_axis_labels,
            line_coloring:    config.display.line_coloring,
            thresholds:       config.thresholds,
            theme:            theme.clone(),
        }
    }
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self::from_config(&PingConfig::default(), &Theme::default())
    }
}

/// Render `snapshot` into a `viewport`-sized chart.
pub fn render(snapshot: &Snapshot, viewport: Size, options: &ChartOptions) -> Vec<DrawCommand> {
    let style = &options.theme.chart;
    let mut commands = vec![DrawCommand::FillRect {
        rect:  Rect::new(0.0, 0.0, viewport.width.max(0.0), viewport.height.max(0.0)),
        color: style.background,
    }];

    if snapshot.len() < 2 || snapshot.latencies().take(2).count() < 2 {
        return commands;
    }
    let Some(range) = ValueRange::from_latencies(snapshot.latencies()) else {
        return commands;
    };

    let area = chart_area(viewport, options.show_axis_labels);

    draw_grid(&mut commands, area, options);
    if options.show_axis_labels {
        draw_labels(&mut commands, area, range, options);
    }
    draw_line(&mut commands, snapshot, area, range, options);
    draw_failures(&mut commands, snapshot, area, options);

    commands
}

/// The rectangle the data is plotted in, inside the margins.
pub fn chart_area(viewport: Size, show_axis_labels: bool) -> Rect {
    let left = if show_axis_labels { LABEL_MARGIN } else { EDGE_MARGIN };
    Rect::new(
        left,
        EDGE_MARGIN,
        (viewport.width - left - EDGE_MARGIN).max(0.0),
        (viewport.height - 2.0 * EDGE_MARGIN).max(0.0),
    )
}

/// Horizontal position of buffer slot `index` in a window of `capacity`
/// slots.  Positions are tied to the slot, so a partly filled buffer only
/// covers the left part of the chart.
pub fn slot_x(index: usize, capacity: usize, area: Rect) -> f32 {
    if capacity <= 1 {
        return area.x;
    }
    area.x + (index as f64 / (capacity - 1) as f64) as f32 * area.width
}

/// Vertical position of `latency`; `range.min` sits on the bottom edge.
pub fn latency_y(latency: f64, range: ValueRange, area: Rect) -> f32 {
    area.bottom() - (range.normalize(latency) as f32) * area.height
}

fn draw_grid(commands: &mut Vec<DrawCommand>, area: Rect, options: &ChartOptions) {
    let style = &options.theme.chart;

    for i in 0..=HORIZONTAL_DIVISIONS {
        let y = area.y + area.height * i as f32 / HORIZONTAL_DIVISIONS as f32;
        commands.push(DrawCommand::Line {
            from:  Point::new(area.x, y),
            to:    Point::new(area.right(), y),
            color: style.grid,
            width: style.grid_width,
        });
    }

    for i in 0..=VERTICAL_DIVISIONS {
        let x = area.x + area.width * i as f32 / VERTICAL_DIVISIONS as f32;
        commands.push(DrawCommand::Line {
            from:  Point::new(x, area.y),
            to:    Point::new(x, area.bottom()),
            color: style.grid,
            width: style.grid_width,
        });
    }
}

fn draw_labels(commands: &mut Vec<DrawCommand>, area: Rect, range: ValueRange, options: &ChartOptions) {
    let style = &options.theme.chart;

    for i in 0..=HORIZONTAL_DIVISIONS {
        let t = i as f64 / HORIZONTAL_DIVISIONS as f64;
        let value = range.value_from_top(t);
        commands.push(DrawCommand::Text {
            position: Point::new(area.x - LABEL_GAP, area.y + area.height * t as f32),
            text:     format!("{}ms", value.round() as i64),
            color:    style.label,
            size:     style.font_size,
            anchor:   TextAnchor::MiddleRight,
        });
    }
}

/// Join consecutive successful samples.  A failed sample ends the current run;
/// a run of one sample is drawn as a dot.
fn draw_line(
    commands: &mut Vec<DrawCommand>,
    snapshot: &Snapshot,
    area: Rect,
    range: ValueRange,
    options: &ChartOptions,
) {
    let mut run: Vec<(Point, Band)> = Vec::new();

    for (i, sample) in snapshot.samples().iter().enumerate() {
        match sample.latency() {
            Some(ms) => {
                let point = Point::new(
                    slot_x(i, snapshot.capacity(), area),
                    latency_y(ms, range, area),
                );
                run.push((point, classify(Some(ms), &options.thresholds)));
            }
            None => flush_run(commands, &mut run, options),
        }
    }
    flush_run(commands, &mut run, options);
}

fn flush_run(commands: &mut Vec<DrawCommand>, run: &mut Vec<(Point, Band)>, options: &ChartOptions) {
    let style = &options.theme.chart;

    match run.as_slice() {
        [] => {}
        [(point, band)] => {
            let color = match options.line_coloring {
                LineColoring::Solid  => style.line,
                LineColoring::ByBand => options.theme.band_color(*band),
            };
            commands.push(DrawCommand::FillCircle {
                center: *point,
                radius: style.line_width,
                color,
            });
        }
        points => match options.line_coloring {
            LineColoring::Solid => commands.push(DrawCommand::Polyline {
                points: points.iter().map(|(p, _)| *p).collect(),
                color:  style.line,
                width:  style.line_width,
            }),
            LineColoring::ByBand => push_banded(commands, points, options),
        },
    }
    run.clear();
}

/// Split a run into polylines by band; each segment takes the worse band of
/// its two endpoints.
fn push_banded(commands: &mut Vec<DrawCommand>, points: &[(Point, Band)], options: &ChartOptions) {
    let width = options.theme.chart.line_width;
    let mut current: Option<(Band, Vec<Point>)> = None;

    for pair in points.windows(2) {
        let (from, from_band) = pair[0];
        let (to, to_band) = pair[1];
        let band = from_band.max(to_band);

        if let Some((b, path)) = current.as_mut() {
            if *b == band {
                path.push(to);
                continue;
            }
        }
        if let Some((b, path)) = current.take() {
            commands.push(DrawCommand::Polyline {
                points: path,
                color:  options.theme.band_color(b),
                width,
            });
        }
        current = Some((band, vec![from, to]));
    }

    if let Some((b, path)) = current {
        commands.push(DrawCommand::Polyline {
            points: path,
            color:  options.theme.band_color(b),
            width,
        });
    }
}

fn draw_failures(commands: &mut Vec<DrawCommand>, snapshot: &Snapshot, area: Rect, options: &ChartOptions) {
    let style = &options.theme.chart;

    for (i, sample) in snapshot.samples().iter().enumerate() {
        if !sample.is_success() {
            commands.push(DrawCommand::FillCircle {
                center: Point::new(slot_x(i, snapshot.capacity(), area), area.center_y()),
                radius: style.marker_radius,
                color:  style.failed,
            });
        }
    }
}
