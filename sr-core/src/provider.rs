//! Contract of the third-party geocoding and directions provider.

use thiserror::Error;

use crate::geo::LatLng;
use crate::route::{DirectionsResult, RouteForm};

#[derive(Error, Debug)]
pub enum GatewayError {
    /// The provider's script has not finished loading
    #[error("maps provider is not loaded")]
    NotLoaded,

    /// The provider rejected the request (e.g. `NOT_FOUND`, `ZERO_RESULTS`)
    #[error("directions request failed: {0}")]
    Provider(String),

    /// The normalized response could not be decoded
    #[error("malformed provider response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Geocoding and routing as seen by the rest of the app.
#[allow(async_fn_in_trait)]
pub trait MappingGateway {
    /// Coordinates of a free-text address. Never fails: on error the
    /// implementation logs and returns [`crate::geo::FALLBACK_COORD`].
    async fn geocode(&self, address: &str) -> LatLng;

    /// Driving alternatives between the form's endpoints.
    ///
    /// `Ok(None)` when either field is empty; provider errors propagate.
    async fn directions(&self, form: &RouteForm) -> Result<Option<DirectionsResult>, GatewayError>;
}
