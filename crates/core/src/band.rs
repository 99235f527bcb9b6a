use serde::{Deserialize, Serialize};

/// Latency cut-points in milliseconds.
///
/// No ordering is enforced between the three values.  `high` is carried for
/// display and configuration only; [`classify`] never consults it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub low:    u32,
    pub medium: u32,
    pub high:   u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            low:    50,
            medium: 100,
            high:   200,
        }
    }
}

/// Severity band of a latency value.  Ordered `Low < Medium < High < Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Band {
    Low,
    Medium,
    High,
    Failed,
}

impl Band {
    /// Style class name the host shell can attach to the live label.
    pub fn style_class(self) -> &'static str {
        match self {
            Band::Low    => "ping-low",
            Band::Medium => "ping-medium",
            Band::High   => "ping-high",
            Band::Failed => "ping-failed",
        }
    }
}

/// Map a latency (or its absence) to a [`Band`].
///
/// Evaluated in order: absent ⇒ `Failed`, `≤ low` ⇒ `Low`, `≤ medium` ⇒
/// `Medium`, anything else ⇒ `High`.
pub fn classify(latency: Option<f64>, thresholds: &Thresholds) -> Band {
    let Some(ms) = latency else {
        return Band::Failed;
    };

    if ms <= f64::from(thresholds.low) {
        Band::Low
    } else if ms <= f64::from(thresholds.medium) {
        Band::Medium
    } else {
        Band::High
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_samples_map_to_expected_bands() {
        let t = Thresholds { low: 50, medium: 100, high: 200 };
        let bands: Vec<Band> = [Some(50.0), Some(150.0), None]
            .into_iter()
            .map(|l| classify(l, &t))
            .collect();
        assert_eq!(bands, vec![Band::Low, Band::High, Band::Failed]);
    }

    #[test]
    fn boundaries_are_inclusive() {
        let t = Thresholds::default();
        assert_eq!(classify(Some(50.0), &t), Band::Low);
        assert_eq!(classify(Some(50.1), &t), Band::Medium);
        assert_eq!(classify(Some(100.0), &t), Band::Medium);
        assert_eq!(classify(Some(100.1), &t), Band::High);
        assert_eq!(classify(Some(10_000.0), &t), Band::High);
    }

    #[test]
    fn high_threshold_is_not_consulted() {
        let a = Thresholds { low: 50, medium: 100, high: 200 };
        let b = Thresholds { high: 1, ..a };
        for ms in [10.0, 75.0, 150.0, 500.0] {
            assert_eq!(classify(Some(ms), &a), classify(Some(ms), &b));
        }
    }

    #[test]
    fn classification_is_monotonic() {
        let configs = [
            Thresholds::default(),
            Thresholds { low: 120, medium: 80, high: 10 },
            Thresholds { low: 1, medium: 1, high: 1 },
        ];
        for t in configs {
            let mut prev = classify(Some(-5.0), &t);
            let mut ms = -5.0;
            while ms < 400.0 {
                let band = classify(Some(ms), &t);
                assert_ne!(band, Band::Failed);
                assert!(band >= prev, "{ms}ms went from {prev:?} to {band:?}");
                prev = band;
                ms += 0.5;
            }
        }
    }

    #[test]
    fn inverted_thresholds_never_yield_low_above_medium() {
        let t = Thresholds { low: 120, medium: 80, high: 200 };
        assert_eq!(classify(Some(60.0), &t), Band::Low);
        assert_eq!(classify(Some(100.0), &t), Band::Low);
        assert_eq!(classify(Some(121.0), &t), Band::High);
    }

    #[test]
    fn style_classes() {
        assert_eq!(Band::Failed.style_class(), "ping-failed");
        assert_eq!(Band::Medium.style_class(), "ping-medium");
    }
}
