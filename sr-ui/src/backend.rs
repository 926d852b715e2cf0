/// Scoring backend client for the browser, built on `fetch`
use log::debug;
use serde::Serialize;
use sr_core::accident::AccidentRecord;
use sr_core::backend::{
    decode, decode_scores, BackendError, ScoringBackend, CLUSTER_ACCIDENTS_PATH, SCORE_ROUTES_PATH,
};
use sr_core::cluster::ClusterId;
use sr_core::config::join_url;
use sr_core::wire::{ClusterAccidentsRequest, ScoreRoutesRequest, ScoreRoutesResponse};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCache, RequestInit, RequestMode, Response};

use crate::js_bridge::describe_js_error;

#[derive(Debug, Clone)]
pub struct FetchBackend {
    base_url: String,
}

impl FetchBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// POST `body` as JSON and return the response text.
    ///
    /// Sent as a simple CORS request with caching disabled.
    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<String, BackendError> {
        let url = join_url(&self.base_url, path);
        let payload = serde_json::to_string(body)?;
        debug!("POST {}", url);

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_cache(RequestCache::NoCache);
        opts.set_body(&JsValue::from_str(&payload));

        let request = Request::new_with_str_and_init(&url, &opts).map_err(network)?;
        let window = web_sys::window().ok_or_else(|| BackendError::Network("no window".into()))?;
        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(network)?
            .dyn_into()
            .map_err(network)?;

        if !response.ok() {
            return Err(BackendError::Status(response.status()));
        }
        let text = JsFuture::from(response.text().map_err(network)?)
            .await
            .map_err(network)?;
        text.as_string()
            .ok_or_else(|| BackendError::Network("response body is not text".into()))
    }
}

fn network(err: JsValue) -> BackendError {
    BackendError::Network(describe_js_error(&err))
}

impl ScoringBackend for FetchBackend {
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
