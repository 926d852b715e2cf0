//! Route entry form and candidate routes returned by the directions provider.

use crate::geo::{Bounds, LatLng};
use serde::{Deserialize, Serialize};

pub const METER_TO_MILE: f64 = 0.000621371;

/// The provider returns at most this many alternatives.
pub const MAX_ROUTES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Start,
    Dest,
}

/// Start and destination as typed (or autocompleted) by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteForm {
    pub start: String,
    pub dest: String,
}

impl RouteForm {
    pub fn new(start: impl Into<String>, dest: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            dest: dest.into(),
        }
    }

    /// Both endpoints are filled in.
    pub fn is_complete(&self) -> bool {
        !self.start.trim().is_empty() && !self.dest.trim().is_empty()
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        match field {
            FormField::Start => self.start = value.into(),
            FormField::Dest => self.dest = value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteLeg {
    pub distance_m: f64,
    pub duration_s: f64,
}

/// One alternative driving route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRoute {
    /// Provider's short description, usually the main road taken.
    #[serde(default)]
    pub summary: String,
    pub bounds: Bounds,
    pub path: Vec<LatLng>,
    pub legs: Vec<RouteLeg>,
}

impl CandidateRoute {
    pub fn distance_miles(&self) -> f64 {
        self.legs
            .iter()
            .map(|leg| leg.distance_m * METER_TO_MILE)
            .sum()
    }

    pub fn duration_minutes(&self) -> f64 {
        self.legs.iter().map(|leg| leg.duration_s / 60.0).sum()
    }

    /// Duration as displayed, e.g. `"240 mins"`.
    pub fn duration_label(&self) -> String {
        format!("{:.0} mins", self.duration_minutes())
    }

    /// Label of the selector button for the route at `idx`.
    pub fn button_label(&self, idx: usize) -> String {
        format!("Option {}: {}", idx + 1, self.summary)
    }

    /// Path points in the backend's `[lat, lng]` format.
    pub fn point_pairs(&self) -> Vec<[f64; 2]> {
        self.path.iter().map(|p| p.to_pair()).collect()
    }
}

/// Normalized directions response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectionsResult {
    pub routes: Vec<CandidateRoute>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(summary: &str, legs: &[(f64, f64)]) -> CandidateRoute {
        CandidateRoute {
            summary: summary.to_string(),
            bounds: Bounds::new(LatLng::new(32.0, -84.5), LatLng::new(33.8, -81.0)),
            path: vec![LatLng::new(33.749, -84.388), LatLng::new(32.0809, -81.0912)],
            legs: legs
                .iter()
                .map(|&(distance_m, duration_s)| RouteLeg {
                    distance_m,
                    duration_s,
                })
                .collect(),
        }
    }

    #[test]
    fn form_is_complete_only_with_both_fields() {
        assert!(!RouteForm::default().is_complete());
        assert!(!RouteForm::new("Atlanta, GA", "").is_complete());
        assert!(!RouteForm::new("   ", "Savannah, GA").is_complete());
        assert!(RouteForm::new("Atlanta, GA", "Savannah, GA").is_complete());
    }

    #[test]
    fn form_fields_update_independently() {
        let mut form = RouteForm::default();
        form.set(FormField::Start, "Atlanta, GA");
        form.set(FormField::Dest, "Savannah, GA");
        form.set(FormField::Start, "Macon, GA");
        assert_eq!(form.start, "Macon, GA");
        assert_eq!(form.dest, "Savannah, GA");
    }

    #[test]
    fn legs_are_summed_into_miles_and_minutes() {
        let r = route("I-16 E", &[(200_000.0, 7_200.0), (203_000.0, 7_200.0)]);
        assert!((r.distance_miles() - 250.41251).abs() < 1e-3);
        assert_eq!(r.duration_label(), "240 mins");
        assert_eq!(r.button_label(0), "Option 1: I-16 E");
    }

    #[test]
    fn point_pairs_follow_path_order() {
        let r = route("I-16 E", &[(1.0, 1.0)]);
        assert_eq!(
            r.point_pairs(),
            vec![[33.749, -84.388], [32.0809, -81.0912]]
        );
    }

    #[test]
    fn route_deserializes_from_bridge_json() {
        let json = r#"{
            "summary": "I-75 S",
            "bounds": {"southWest": {"lat": 32.0, "lng": -84.5}, "northEast": {"lat": 33.8, "lng": -81.0}},
            "path": [{"lat": 33.7, "lng": -84.4}],
            "legs": [{"distanceM": 1609.34, "durationS": 60.0}]
        }"#;
        let r: CandidateRoute = serde_json::from_str(json).unwrap();
        assert_eq!(r.summary, "I-75 S");
        assert!((r.distance_miles() - 1.0).abs() < 1e-3);
        assert_eq!(r.duration_label(), "1 mins");
    }
}
