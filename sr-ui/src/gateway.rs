//! Google Maps geocoding, directions and autocomplete, through the JS bridge.

use log::{debug, warn};
use sr_core::geo::{LatLng, FALLBACK_COORD};
use sr_core::provider::{GatewayError, MappingGateway};
use sr_core::route::{DirectionsResult, FormField, RouteForm};
use wasm_bindgen::prelude::*;

use crate::js_bridge::{self, JsHook, PLACE_SELECTED_HOOK};

pub const START_INPUT_ID: &str = "source";
pub const DEST_INPUT_ID: &str = "destination";

#[derive(Debug, Clone, Copy, Default)]
pub struct GoogleMapsGateway;

impl GoogleMapsGateway {
    /// Start loading the Google Maps script with `api_key`.
    pub fn load(api_key: &str) -> Self {
        js_bridge::load_google_maps(api_key);
        GoogleMapsGateway
    }

    pub fn is_ready(&self) -> bool {
        js_bridge::google_ready()
    }

    /// Attach US address autocomplete to both form inputs once Google Maps
    /// and the inputs are available.
    pub fn attach_autocomplete(&self) {
        js_bridge::call_js(&format!(
            r#"
            (function() {{
                var poll = setInterval(function() {{
                    if (window.__srScriptsReady && window.srGoogleReady() &&
                        document.getElementById({start}) && document.getElementById({dest})) {{
                        clearInterval(poll);
                        window.srAttachAutocomplete({start}, 'start');
                        window.srAttachAutocomplete({dest}, 'dest');
                    }}
                }}, 200);
            }})();
            "#,
            start = js_bridge::js_string(START_INPUT_ID),
            dest = js_bridge::js_string(DEST_INPUT_ID),
        ));
    }

    /// Install the hook autocomplete selections are reported through.
    pub fn on_place_selected(mut handler: impl FnMut(FormField, String) + 'static) -> JsHook<dyn FnMut(String, String)> {
        let closure = Closure::wrap(Box::new(move |field: String, address: String| {
            match parse_field(&field) {
                Some(field) => handler(field, address),
                None => warn!("autocomplete reported unknown field {}", field),
            }
        }) as Box<dyn FnMut(String, String)>);
        JsHook::install(PLACE_SELECTED_HOOK, closure)
    }
}

fn parse_field(name: &str) -> Option<FormField> {
    match name {
        "start" => Some(FormField::Start),
        "dest" => Some(FormField::Dest),
        _ => None,
    }
}

impl MappingGateway for GoogleMapsGateway {
    async fn geocode(&self, address: &str) -> LatLng {
        if !self.is_ready() {
            warn!("Geocoding '{}' before Google Maps loaded, using fallback", address);
            return FALLBACK_COORD;
        }
        let code = format!("window.srGeocode({})", js_bridge::js_string(address));
        match js_bridge::eval_promise(&code).await {
            Ok(json) => match serde_json::from_str::<LatLng>(&json) {
                Ok(coord) => coord,
                Err(err) => {
                    warn!("Malformed geocode result for '{}': {}", address, err);
                    FALLBACK_COORD
                }
            },
            Err(err) => {
                warn!(
                    "Geocoding '{}' failed: {}",
                    address,
                    js_bridge::describe_js_error(&err)
                );
                FALLBACK_COORD
            }
        }
    }

    async fn directions(&self, form: &RouteForm) -> Result<Option<DirectionsResult>, GatewayError> {
        if !form.is_complete() {
            return Ok(None);
        }
        if !self.is_ready() {
            return Err(GatewayError::NotLoaded);
        }
        let code = format!(
            "window.srDirections({}, {})",
            js_bridge::js_string(&form.start),
            js_bridge::js_string(&form.dest)
        );
        let json = js_bridge::eval_promise(&code)
            .await
            .map_err(|err| GatewayError::Provider(js_bridge::describe_js_error(&err)))?;
        let result: DirectionsResult = serde_json::from_str(&json)?;
        debug!("Directions returned {} routes", result.routes.len());
        Ok(Some(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autocomplete_fields_map_to_form() {
        assert_eq!(parse_field("start"), Some(FormField::Start));
        assert_eq!(parse_field("dest"), Some(FormField::Dest));
        assert_eq!(parse_field("source"), None);
    }
}
