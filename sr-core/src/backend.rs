/// Scoring backend contract and the native HTTP client for it
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::accident::AccidentRecord;
use crate::cluster::ClusterId;
use crate::wire::{ScoreRoutesRequest, ScoreRoutesResponse};

#[cfg(feature = "api")]
use crate::config::join_url;
#[cfg(feature = "api")]
use crate::geo::LatLng;
#[cfg(feature = "api")]
use crate::wire::{BoxAccidentsRequest, ClusterAccidentsRequest};
#[cfg(feature = "api")]
use log::debug;
#[cfg(feature = "api")]
use serde::Serialize;

pub const SCORE_ROUTES_PATH: &str = "/score-routes";
pub const CLUSTER_ACCIDENTS_PATH: &str = "/accidents/cluster";
pub const BOX_ACCIDENTS_PATH: &str = "/accidents/box";

/// Errors from a backend round trip. None of them are retried.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The request never produced a response
    #[error("request failed: {0}")]
    Network(String),

    /// Any non-2xx status
    #[error("backend responded with status {0}")]
    Status(u16),

    /// The body was not the expected JSON
    #[error("failed to decode backend response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Scores and accident lists don't line up with the routes sent
    #[error("backend returned {found} results for {expected} routes")]
    Mismatch { expected: usize, found: usize },
}

#[cfg(feature = "api")]
impl From<reqwest::Error> for BackendError {
    fn from(value: reqwest::Error) -> Self {
        BackendError::Network(value.to_string())
    }
}

/// The two endpoints the front end depends on.
#[allow(async_fn_in_trait)]
pub trait ScoringBackend {
    async fn score_routes(
        &self,
        request: &ScoreRoutesRequest,
    ) -> Result<ScoreRoutesResponse, BackendError>;

    async fn cluster_accidents(
        &self,
        cluster_id: &ClusterId,
    ) -> Result<Vec<AccidentRecord>, BackendError>;
}

/// Decode a response body, mapping any JSON problem to [`BackendError::Decode`].
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, BackendError> {
    Ok(serde_json::from_str(body)?)
}

/// Decode a `/score-routes` body and check it covers every route sent.
pub fn decode_scores(body: &str, route_count: usize) -> Result<ScoreRoutesResponse, BackendError> {
    let response: ScoreRoutesResponse = decode(body)?;
    if !response.matches(route_count) {
        return Err(BackendError::Mismatch {
            expected: route_count,
            found: response.scores.len().min(response.accidents.len()),
        });
    }
    Ok(response)
}

/// Backend client for native tools, built on `reqwest`.
#[cfg(feature = "api")]
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

#[cfg(feature = "api")]
impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<String, BackendError> {
        let url = join_url(&self.base_url, path);
        debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .json(body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }

    /// Accidents inside the box spanned by two corners.
    pub async fn accidents_in_box(
        &self,
        p1: LatLng,
        p2: LatLng,
    ) -> Result<Vec<AccidentRecord>, BackendError> {
        let body = self
            .post(BOX_ACCIDENTS_PATH, &BoxAccidentsRequest { p1, p2 })
            .await?;
        decode(&body)
    }
}

#[cfg(feature = "api")]
impl ScoringBackend for HttpBackend {
    async fn score_routes(
        &self,
        request: &ScoreRoutesRequest,
    ) -> Result<ScoreRoutesResponse, BackendError> {
        let body = self.post(SCORE_ROUTES_PATH, request).await?;
        decode_scores(&body, request.routes.len())
    }

    async fn cluster_accidents(
        &self,
        cluster_id: &ClusterId,
    ) -> Result<Vec<AccidentRecord>, BackendError> {
        let request = ClusterAccidentsRequest {
            cluster_id: cluster_id.clone(),
        };
        let body = self.post(CLUSTER_ACCIDENTS_PATH, &request).await?;
        decode(&body)
    }
}
