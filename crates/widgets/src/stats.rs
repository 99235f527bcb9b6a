use ping_core::{summarize, Sample, Stats};

/// Formats the one-line statistics summary shown under the chart.
#[derive(Debug, Default)]
pub struct StatsWidget;

impl StatsWidget {
    pub fn new() -> Self {
        Self
    }

    pub fn view(&self, samples: &[Sample]) -> String {
        format_summary(summarize(samples).as_ref())
    }
}

/// `None` is the empty window.
pub fn format_summary(stats: Option<&Stats>) -> String {
    let Some(stats) = stats else {
        return "No data yet".to_string();
    };

    match stats.latency {
        Some(l) => format!(
            "Success: {:.1}% | Avg: {:.1}ms | Min: {:.1}ms | Max: {:.1}ms",
            stats.success_rate, l.avg, l.min, l.max
        ),
        None => format!("Success: {:.1}% | No successful pings", stats.success_rate),
    }
}
