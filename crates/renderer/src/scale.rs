/// Smallest vertical span the chart will show, in milliseconds.
pub const MIN_SPAN_MS: f64 = 10.0;

/// Share of the span added above and below the data.
pub const PADDING_RATIO: f64 = 0.1;

/// Visible latency range of the chart, `min` at the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Derive the visible range from the successful latencies.
    ///
    /// Spans narrower than [`MIN_SPAN_MS`] are widened around their midpoint
    /// (shifted up if that would go negative), then [`PADDING_RATIO`] of the
    /// span is added on each side and the bottom is clamped at zero.
    /// Returns `None` when there are no finite values.
    pub fn from_latencies(latencies: impl IntoIterator<Item = f64>) -> Option<Self> {
        let (mut lo, mut hi) = latencies
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })?;

        if hi - lo < MIN_SPAN_MS {
            let mid = (lo + hi) / 2.0;
            lo = mid - MIN_SPAN_MS / 2.0;
            hi = mid + MIN_SPAN_MS / 2.0;
            if lo < 0.0 {
                hi -= lo;
                lo = 0.0;
            }
        }

        let padding = (hi - lo) * PADDING_RATIO;
        Some(Self {
            min: (lo - padding).max(0.0),
            max: hi + padding,
        })
    }

    /// Position of `value` inside the range, `0.0` at `min` and `1.0` at `max`.
    /// A degenerate range maps everything to the middle.
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if !span.is_finite() || span <= f64::EPSILON {
            return 0.5;
        }
        (value - self.min) / span
    }

    /// Value at fraction `t` from the top (`0.0` = `max`, `1.0` = `min`).
    pub fn value_from_top(&self, t: f64) -> f64 {
        self.max - t * (self.max - self.min)
    }
}
