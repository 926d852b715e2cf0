//! JSON bodies exchanged with the scoring backend.

use serde::{Deserialize, Serialize};

use crate::accident::AccidentRecord;
use crate::cluster::ClusterId;
use crate::geo::LatLng;
use crate::route::CandidateRoute;

/// Body of `POST /score-routes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRoutesRequest {
    /// One `[lat, lng]` sequence per route.
    pub routes: Vec<Vec<[f64; 2]>>,
    /// Route lengths in miles, same order as `routes`.
    pub distances: Vec<f64>,
}

impl ScoreRoutesRequest {
    pub fn from_routes(routes: &[CandidateRoute]) -> Self {
        Self {
            routes: routes.iter().map(CandidateRoute::point_pairs).collect(),
            distances: routes.iter().map(CandidateRoute::distance_miles).collect(),
        }
    }
}

/// Response of `POST /score-routes`, one entry per requested route.
///
/// A `null` score means the backend found too little data along the route.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ScoreRoutesResponse {
    pub scores: Vec<Option<f64>>,
    pub accidents: Vec<Vec<AccidentRecord>>,
}

impl ScoreRoutesResponse {
    /// Scores and accident lists both line up with `route_count`.
    pub fn matches(&self, route_count: usize) -> bool {
        self.scores.len() == route_count && self.accidents.len() == route_count
    }
}

/// Body of `POST /accidents/cluster`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterAccidentsRequest {
    #[serde(rename = "clusterId")]
    pub cluster_id: ClusterId,
}

/// Body of `POST /accidents/box`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxAccidentsRequest {
    pub p1: LatLng,
    pub p2: LatLng,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accident::tests::sample_row;
    use crate::geo::Bounds;
    use crate::route::RouteLeg;
    use serde_json::json;

    #[test]
    fn score_request_serializes_points_and_distances() {
        let route = CandidateRoute {
            summary: "I-16 E".into(),
            bounds: Bounds::new(LatLng::new(32.0, -84.4), LatLng::new(33.8, -81.0)),
            path: vec![LatLng::new(33.749, -84.388), LatLng::new(32.0809, -81.0912)],
            legs: vec![RouteLeg {
                distance_m: 1609.344,
                duration_s: 60.0,
            }],
        };
        let request = ScoreRoutesRequest::from_routes(&[route]);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["routes"], json!([[[33.749, -84.388], [32.0809, -81.0912]]]));
        assert_eq!(value["distances"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn score_response_decodes_rows_and_null_scores() {
        let body = json!({
            "scores": [7.23, null],
            "accidents": [[sample_row(), sample_row()], []],
            "conditions": {"weather": "Clear"}
        });
        let response: ScoreRoutesResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.scores, vec![Some(7.23), None]);
        assert_eq!(response.accidents[0].len(), 2);
        assert!(response.matches(2));
        assert!(!response.matches(3));
    }

    #[test]
    fn cluster_request_uses_camel_case_key() {
        let body = ClusterAccidentsRequest {
            cluster_id: ClusterId::from(42),
        };
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({"clusterId": 42}));
    }
}
