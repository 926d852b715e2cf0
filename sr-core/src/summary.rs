//! Summary statistics over a list of accidents.

use crate::accident::AccidentRecord;
use serde::Serialize;

/// Means over an accident list. All fields are zero for an empty list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    /// Share of accidents with measurable precipitation, in `[0, 1]`.
    pub rainy_fraction: f64,
    /// Share of accidents that happened in the dark, in `[0, 1]`.
    pub nighttime_fraction: f64,
    /// Mean severity over the accidents that report one.
    pub average_severity: f64,
}

impl Summary {
    pub fn rainy_percent(&self) -> String {
        percent(self.rainy_fraction)
    }

    pub fn nighttime_percent(&self) -> String {
        percent(self.nighttime_fraction)
    }

    pub fn severity_label(&self) -> String {
        format!("{:.2}", self.average_severity)
    }
}

pub fn compute_summary(records: &[AccidentRecord]) -> Summary {
    if records.is_empty() {
        return Summary::default();
    }

    let total = records.len() as f64;
    let rainy = records.iter().filter(|r| r.is_rainy()).count() as f64;
    let nighttime = records.iter().filter(|r| r.is_nighttime()).count() as f64;

    let (severity_sum, severity_count) = records
        .iter()
        .filter_map(|r| r.severity)
        .fold((0.0, 0usize), |(sum, n), s| (sum + f64::from(s), n + 1));
    let average_severity = if severity_count == 0 {
        0.0
    } else {
        severity_sum / severity_count as f64
    };

    Summary {
        count: records.len(),
        rainy_fraction: rainy / total,
        nighttime_fraction: nighttime / total,
        average_severity,
    }
}

/// Fraction rendered as a whole percentage, e.g. `0.25` -> `"25%"`.
pub fn percent(fraction: f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}
