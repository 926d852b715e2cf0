//! The summary table shown beside the map.

use sr_core::color::safety_color;
use sr_core::summary::Summary;

pub const NO_SCORE_TEXT: &str = "Not enough data found along route";

/// Typical share of accidents that happen in the rain, shown next to the route's.
pub const AVG_RAINY_PREFIX: &str = "Avg: 5%";
/// Typical share of accidents that happen after dark.
pub const AVG_NIGHTTIME_PREFIX: &str = "Avg: 60%";

/// One label/value line of the summary table.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub label: &'static str,
    /// `None` while the data behind it is still loading
    pub value: Option<String>,
    pub prefix: Option<&'static str>,
    pub help: &'static str,
    pub bold: bool,
    /// CSS color for the value
    pub color: Option<String>,
}

impl SummaryRow {
    fn new(label: &'static str, help: &'static str) -> Self {
        Self {
            label,
            value: None,
            prefix: None,
            help,
            bold: false,
            color: None,
        }
    }

    fn value(mut self, value: Option<String>) -> Self {
        self.value = value;
        self
    }

    fn prefix(mut self, prefix: &'static str) -> Self {
        self.prefix = Some(prefix);
        self
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn is_pending(&self) -> bool {
        self.value.is_none()
    }
}

/// Rows describing the active route.
///
/// `score` is `None` until the backend answers and `Some(None)` when it
/// found too little data to score the route.
pub fn route_rows(
    score: Option<Option<f64>>,
    duration: &str,
    distance_miles: f64,
    summary: Option<&Summary>,
) -> Vec<SummaryRow> {
    let mut score_row = SummaryRow::new(
        "Safety Score",
        "Describes your projected safety on this route (if you depart immediately) on a scale from 0-10, where 0 is very unsafe and 10 is very safe.",
    )
    .bold();
    match score {
        Some(Some(s)) => {
            score_row.value = Some(format!("{:.2}", s));
            score_row.color = Some(safety_color(s));
        }
        Some(None) => score_row.value = Some(NO_SCORE_TEXT.to_string()),
        None => {}
    }

    vec![
        score_row,
        SummaryRow::new(
            "Duration",
            "How long it takes to drive this route in minutes, on average.",
        )
        .value(Some(duration.to_string()))
        .bold(),
        SummaryRow::new("Length of Route", "The length of this route in miles.")
            .value(Some(format!("{:.2} miles", distance_miles))),
        SummaryRow::new(
            "Average Severity",
            "The average severity of these accidents from 1-4, with 4 being the most severe.",
        )
        .value(summary.map(Summary::severity_label)),
        SummaryRow::new(
            "Number of Accidents",
            "The number of accidents between 2016-2020 found within 1 mile of this route.",
        )
        .value(summary.map(|s| s.count.to_string())),
        SummaryRow::new(
            "% Rainy",
            "The percentage of accidents along this route that occurred while it was raining.",
        )
        .value(summary.map(Summary::rainy_percent))
        .prefix(AVG_RAINY_PREFIX),
        SummaryRow::new(
            "% Nighttime",
            "The percentage of accidents along this route that occurred while it was dark outside.",
        )
        .value(summary.map(Summary::nighttime_percent))
        .prefix(AVG_NIGHTTIME_PREFIX),
    ]
}

/// Rows describing an expanded cluster.
pub fn cluster_rows(location: &str, avg_severity: f64, summary: Option<&Summary>) -> Vec<SummaryRow> {
    vec![
        SummaryRow::new(
            "Center of Cluster",
            "The latitude and longitude of the center of this cluster of accident records.",
        )
        .value(Some(location.to_string())),
        SummaryRow::new(
            "Average Severity",
            "The average severity of these accidents, from 1-4.",
        )
        .value(Some(format!("{:.2}", avg_severity))),
        SummaryRow::new("Number of Accidents", "The number of accidents in this cluster.")
            .value(summary.map(|s| s.count.to_string())),
        SummaryRow::new(
            "% Rainy",
            "The percentage of accidents in this cluster that occurred while it was raining.",
        )
        .value(summary.map(Summary::rainy_percent))
        .prefix(AVG_RAINY_PREFIX),
        SummaryRow::new(
            "% Nighttime",
            "The percentage of accidents in this cluster that occurred while it was dark outside.",
        )
        .value(summary.map(Summary::nighttime_percent))
        .prefix(AVG_NIGHTTIME_PREFIX),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value<'a>(rows: &'a [SummaryRow], label: &str) -> Option<&'a str> {
        rows.iter()
            .find(|r| r.label == label)
            .and_then(|r| r.value.as_deref())
    }

    #[test]
    fn pending_route_rows_show_known_values_only() {
        let rows = route_rows(None, "240 mins", 250.4125, None);
        assert_eq!(rows.len(), 7);
        assert!(rows[0].is_pending());
        assert!(rows[0].bold && rows[1].bold);
        assert_eq!(value(&rows, "Duration"), Some("240 mins"));
        assert_eq!(value(&rows, "Length of Route"), Some("250.41 miles"));
        assert_eq!(rows.iter().filter(|r| r.is_pending()).count(), 5);
        assert_eq!(rows[5].prefix, Some(AVG_RAINY_PREFIX));
        assert_eq!(rows[6].prefix, Some(AVG_NIGHTTIME_PREFIX));
    }

    #[test]
    fn scored_route_is_colored() {
        let summary = Summary {
            count: 12,
            rainy_fraction: 0.25,
            nighttime_fraction: 0.5,
            average_severity: 2.4166,
        };
        let rows = route_rows(Some(Some(7.23)), "240 mins", 250.4, Some(&summary));
        assert_eq!(value(&rows, "Safety Score"), Some("7.23"));
        assert!(rows[0].color.is_some());
        assert_eq!(value(&rows, "Average Severity"), Some("2.42"));
        assert_eq!(value(&rows, "Number of Accidents"), Some("12"));
        assert_eq!(value(&rows, "% Rainy"), Some("25%"));
        assert_eq!(value(&rows, "% Nighttime"), Some("50%"));
    }

    #[test]
    fn missing_score_says_so() {
        let rows = route_rows(Some(None), "12 mins", 8.0, Some(&Summary::default()));
        assert_eq!(value(&rows, "Safety Score"), Some(NO_SCORE_TEXT));
        assert!(rows[0].color.is_none());
    }

    #[test]
    fn cluster_scaffold_then_filled() {
        let rows = cluster_rows("33.74900, -84.38800", 2.5, None);
        assert_eq!(rows.len(), 5);
        assert_eq!(value(&rows, "Average Severity"), Some("2.50"));
        assert_eq!(rows.iter().filter(|r| r.is_pending()).count(), 3);

        let rows = cluster_rows("33.74900, -84.38800", 2.5, Some(&Summary::default()));
        assert_eq!(value(&rows, "Number of Accidents"), Some("0"));
        assert_eq!(value(&rows, "% Rainy"), Some("0%"));
        assert_eq!(value(&rows, "% Nighttime"), Some("0%"));
    }

    #[test]
    fn cluster_percentages_carry_national_averages() {
        let rows = cluster_rows("33.74900, -84.38800", 2.5, Some(&Summary::default()));
        assert_eq!(rows[3].prefix, Some(AVG_RAINY_PREFIX));
        assert_eq!(rows[4].prefix, Some(AVG_NIGHTTIME_PREFIX));
        assert!(rows[..3].iter().all(|r| r.prefix.is_none()));
    }
}
