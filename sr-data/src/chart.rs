//! Chart frames: what each of the four accident charts should draw.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::Serialize;
use sr_core::accident::AccidentRecord;

use crate::binning::{histogram, nice_ticks, Bin};

/// Charts need at least this many usable values; fewer shows a placeholder.
pub const MIN_POINTS: usize = 2;

/// Approximate number of bins for the continuous histograms.
pub const TARGET_BINS: usize = 10;

pub const TEMPERATURE_DOMAIN: (f64, f64) = (0.0, 100.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ChartKind {
    #[default]
    Frequency,
    Severity,
    Temperature,
    Visibility,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Frequency,
        ChartKind::Severity,
        ChartKind::Temperature,
        ChartKind::Visibility,
    ];

    /// DOM id of the SVG the chart draws into.
    pub fn container_id(self) -> &'static str {
        match self {
            ChartKind::Frequency => "count_dataviz",
            ChartKind::Severity => "sev_dataviz",
            ChartKind::Temperature => "temp_dataviz",
            ChartKind::Visibility => "vis_dataviz",
        }
    }

    pub fn tab_label(self) -> &'static str {
        match self {
            ChartKind::Frequency => "Frequency",
            ChartKind::Severity => "Severity",
            ChartKind::Temperature => "Temperature",
            ChartKind::Visibility => "Visibility",
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            ChartKind::Frequency => "This line graph shows when past nearby accidents occurred.",
            ChartKind::Severity => "This bar graph shows how serious past nearby accidents were from 1-4, with 4 being the most severe.",
            ChartKind::Temperature => "This bar graph shows what the temperature was at the time of past nearby accidents.",
            ChartKind::Visibility => "This bar graph shows what the visibility was in miles at the time of past nearby accidents.",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            ChartKind::Frequency => "Not enough accident data available to plot accident frequency graph",
            ChartKind::Severity => "Not enough accident severity data available",
            ChartKind::Temperature => "Not enough temperature data available",
            ChartKind::Visibility => "Not enough visibility data available",
        }
    }

    fn x_label(self) -> &'static str {
        match self {
            ChartKind::Frequency => "Time",
            ChartKind::Severity => "Severity Ranking",
            ChartKind::Temperature => "Temperature [F]",
            ChartKind::Visibility => "Visibility",
        }
    }

    fn y_label(self) -> &'static str {
        match self {
            ChartKind::Frequency => "Number of accidents per month",
            _ => "#Accidents",
        }
    }

    fn color(self) -> &'static str {
        match self {
            ChartKind::Frequency => "steelblue",
            ChartKind::Severity => "#69b3a2",
            ChartKind::Temperature => "pink",
            ChartKind::Visibility => "lightblue",
        }
    }
}

/// Accidents in one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthCount {
    /// `YYYY-MM`
    pub month: String,
    pub count: usize,
}

/// Everything the D3 side needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ChartFrame {
    Placeholder {
        message: String,
    },
    #[serde(rename_all = "camelCase")]
    Histogram {
        bins: Vec<Bin>,
        domain: [f64; 2],
        /// Explicit x ticks; `None` lets the axis choose.
        tick_values: Option<Vec<f64>>,
        x_label: String,
        y_label: String,
        color: String,
    },
    #[serde(rename_all = "camelCase")]
    TimeSeries {
        points: Vec<MonthCount>,
        x_label: String,
        y_label: String,
        color: String,
    },
}

impl ChartFrame {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, ChartFrame::Placeholder { .. })
    }

    /// Number of data marks drawn: non-empty bars or month markers.
    pub fn element_count(&self) -> usize {
        match self {
            ChartFrame::Placeholder { .. } => 0,
            ChartFrame::Histogram { bins, .. } => bins.iter().filter(|b| b.count > 0).count(),
            ChartFrame::TimeSeries { points, .. } => points.len(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn placeholder(kind: ChartKind) -> Self {
        ChartFrame::Placeholder {
            message: kind.placeholder().to_string(),
        }
    }

    fn histogram(kind: ChartKind, bins: Vec<Bin>, domain: (f64, f64), tick_values: Option<Vec<f64>>) -> Self {
        ChartFrame::Histogram {
            bins,
            domain: [domain.0, domain.1],
            tick_values,
            x_label: kind.x_label().to_string(),
            y_label: kind.y_label().to_string(),
            color: kind.color().to_string(),
        }
    }
}

/// Build the frame for `kind` from the current accident list.
pub fn build_frame(kind: ChartKind, records: &[AccidentRecord]) -> ChartFrame {
    match kind {
        ChartKind::Frequency => frequency_frame(records),
        ChartKind::Severity => severity_frame(records),
        ChartKind::Temperature => temperature_frame(records),
        ChartKind::Visibility => visibility_frame(records),
    }
}

/// Accident counts per calendar month, oldest first.
pub fn monthly_counts(records: &[AccidentRecord]) -> Vec<MonthCount> {
    let mut months: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    for start in records.iter().filter_map(|r| r.start_time) {
        *months.entry((start.year(), start.month())).or_default() += 1;
    }
    months
        .into_iter()
        .map(|((year, month), count)| MonthCount {
            month: format!("{:04}-{:02}", year, month),
            count,
        })
        .collect()
}

fn frequency_frame(records: &[AccidentRecord]) -> ChartFrame {
    let points = monthly_counts(records);
    if points.len() < MIN_POINTS {
        return ChartFrame::placeholder(ChartKind::Frequency);
    }
    let kind = ChartKind::Frequency;
    ChartFrame::TimeSeries {
        points,
        x_label: kind.x_label().to_string(),
        y_label: kind.y_label().to_string(),
        color: kind.color().to_string(),
    }
}

fn severity_frame(records: &[AccidentRecord]) -> ChartFrame {
    let values: Vec<f64> = records
        .iter()
        .filter_map(|r| r.severity)
        .filter(|s| *s > 0)
        .map(|s| f64::from(s.min(4)))
        .collect();
    if values.len() < MIN_POINTS {
        return ChartFrame::placeholder(ChartKind::Severity);
    }
    // One bar per level: [1,2) [2,3) [3,4) [4,5]
    let bins = histogram(&values, (1.0, 5.0), &[2.0, 3.0, 4.0]);
    ChartFrame::histogram(
        ChartKind::Severity,
        bins,
        (0.0, 5.0),
        Some(vec![1.0, 2.0, 3.0, 4.0]),
    )
}

fn temperature_frame(records: &[AccidentRecord]) -> ChartFrame {
    let (lo, hi) = TEMPERATURE_DOMAIN;
    let values: Vec<f64> = records
        .iter()
        .filter_map(|r| r.temperature_f)
        .map(|t| t.clamp(lo, hi))
        .collect();
    if values.len() < MIN_POINTS {
        return ChartFrame::placeholder(ChartKind::Temperature);
    }
    let thresholds = nice_ticks(lo, hi, TARGET_BINS);
    let bins = histogram(&values, TEMPERATURE_DOMAIN, &thresholds);
    ChartFrame::histogram(ChartKind::Temperature, bins, TEMPERATURE_DOMAIN, None)
}

fn visibility_frame(records: &[AccidentRecord]) -> ChartFrame {
    let values: Vec<f64> = records.iter().filter_map(|r| r.visibility_mi).collect();
    if values.len() < MIN_POINTS {
        return ChartFrame::placeholder(ChartKind::Visibility);
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let domain = (min, max + 1.0);
    let thresholds = nice_ticks(domain.0, domain.1, TARGET_BINS);
    let bins = histogram(&values, domain, &thresholds);
    ChartFrame::histogram(ChartKind::Visibility, bins, domain, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sr_core::accident::parse_timestamp;

    fn full(ts: &str, severity: u8, temp: f64, vis: f64) -> AccidentRecord {
        AccidentRecord {
            start_time: parse_timestamp(ts),
            severity: Some(severity),
            temperature_f: Some(temp),
            visibility_mi: Some(vis),
            ..Default::default()
        }
    }

    fn sample() -> Vec<AccidentRecord> {
        vec![
            full("2019-01-03 07:15:00", 2, 34.0, 10.0),
            full("2019-01-20 18:40:00", 3, 41.0, 7.0),
            full("2019-03-02 12:00:00", 2, 58.0, 10.0),
            full("2020-07-14 16:30:00", 4, 91.0, 2.5),
            full("2018-11-30 23:05:00", 1, 105.0, 0.5),
        ]
    }

    #[test]
    fn empty_and_single_lists_are_placeholders() {
        let one = vec![full("2019-01-03 07:15:00", 2, 34.0, 10.0)];
        for kind in ChartKind::ALL {
            for records in [&[][..], &one[..]] {
                let frame = build_frame(kind, records);
                assert!(frame.is_placeholder(), "{:?} should be a placeholder", kind);
                assert_eq!(frame.element_count(), 0);
            }
        }
    }

    #[test]
    fn two_points_draw_every_chart() {
        // January and March 2019
        let two = &sample()[1..3];
        for kind in ChartKind::ALL {
            let frame = build_frame(kind, two);
            assert!(!frame.is_placeholder(), "{:?} should draw", kind);
            assert!(frame.element_count() >= 1);
        }
    }

    #[test]
    fn missing_values_do_not_count_as_usable() {
        let records = vec![
            full("2019-01-03 07:15:00", 2, 34.0, 10.0),
            AccidentRecord {
                severity: Some(3),
                ..Default::default()
            },
        ];
        assert!(build_frame(ChartKind::Temperature, &records).is_placeholder());
        assert!(build_frame(ChartKind::Visibility, &records).is_placeholder());
        assert!(build_frame(ChartKind::Frequency, &records).is_placeholder());
        assert!(!build_frame(ChartKind::Severity, &records).is_placeholder());
    }

    #[test]
    fn one_month_of_accidents_is_a_placeholder() {
        let same_month = &sample()[..2];
        let frame = build_frame(ChartKind::Frequency, same_month);
        assert!(frame.is_placeholder());
        assert_eq!(frame.element_count(), 0);
        assert!(!build_frame(ChartKind::Severity, same_month).is_placeholder());
    }

    #[test]
    fn months_are_grouped_and_sorted() {
        let counts = monthly_counts(&sample());
        let months: Vec<_> = counts.iter().map(|m| (m.month.as_str(), m.count)).collect();
        assert_eq!(
            months,
            vec![("2018-11", 1), ("2019-01", 2), ("2019-03", 1), ("2020-07", 1)]
        );
    }

    #[test]
    fn severity_has_one_bin_per_level() {
        match build_frame(ChartKind::Severity, &sample()) {
            ChartFrame::Histogram { bins, .. } => {
                let counts: Vec<_> = bins.iter().map(|b| b.count).collect();
                assert_eq!(counts, vec![1, 2, 1, 1]);
            }
            other => panic!("unexpected frame {:?}", other),
        }
    }

    #[test]
    fn temperature_clamps_into_domain() {
        match build_frame(ChartKind::Temperature, &sample()) {
            ChartFrame::Histogram { bins, domain, .. } => {
                assert_eq!(domain, [0.0, 100.0]);
                assert_eq!(bins.len(), 10);
                assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 5);
                // 105 F lands in the top bin with 91 F
                assert_eq!(bins[9].count, 2);
            }
            other => panic!("unexpected frame {:?}", other),
        }
    }

    #[test]
    fn visibility_domain_spans_observed_range() {
        match build_frame(ChartKind::Visibility, &sample()) {
            ChartFrame::Histogram { bins, domain, .. } => {
                assert_eq!(domain, [0.5, 11.0]);
                assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 5);
            }
            other => panic!("unexpected frame {:?}", other),
        }
    }

    #[test]
    fn frame_json_is_tagged() {
        let json = build_frame(ChartKind::Frequency, &[]).to_json();
        assert!(json.contains("\"type\":\"placeholder\""));
        let json = build_frame(ChartKind::Severity, &sample()).to_json();
        assert!(json.contains("\"type\":\"histogram\""));
        assert!(json.contains("\"tickValues\""));
    }
}
