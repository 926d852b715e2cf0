//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The D3 chart code, the Leaflet surface and the Google Maps helpers live in
//! `assets/js/*.js`. They are evaluated as globals once D3 and Leaflet are on
//! the page; this module serializes data for them and calls into them.

use js_sys::{Promise, Reflect};
use log::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

static ACCIDENT_CHARTS_JS: &str = include_str!("../assets/js/accident-charts.js");
static LEAFLET_MAP_JS: &str = include_str!("../assets/js/leaflet-map.js");
static GOOGLE_MAPS_JS: &str = include_str!("../assets/js/google-maps.js");

/// Global the map surface reports clicks through.
pub const MAP_EVENT_HOOK: &str = "__srMapEvent";
/// Global the autocomplete widgets report place selections through.
pub const PLACE_SELECTED_HOOK: &str = "__srPlaceSelected";

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('SR JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Quote `s` as a JS string literal.
pub fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

/// Load the chart, map and Google helpers once D3 and Leaflet are present.
///
/// The scripts use `function` declarations, so they are evaluated at global
/// scope through an indirect eval and then promoted to `window.*`.
pub fn init_scripts() {
    let all_js = [ACCIDENT_CHARTS_JS, LEAFLET_MAP_JS, GOOGLE_MAPS_JS].join("\n");
    let store_js = format!("window.__srScripts = {};", js_string(&all_js));
    let _ = js_sys::eval(&store_js);

    let init_js = r#"
        (function() {
            if (window.__srScriptsReady || window.__srScriptsPending) return;
            window.__srScriptsPending = true;
            var waitForLibs = setInterval(function() {
                if (typeof d3 !== 'undefined' && typeof L !== 'undefined') {
                    clearInterval(waitForLibs);
                    (0, eval)(window.__srScripts);
                    delete window.__srScripts;
                    window.renderAccidentChart = renderAccidentChart;
                    window.destroyAccidentChart = destroyAccidentChart;
                    window.srMapApply = srMapApply;
                    window.srGoogleReady = srGoogleReady;
                    window.srGeocode = srGeocode;
                    window.srDirections = srDirections;
                    window.srAttachAutocomplete = srAttachAutocomplete;
                    window.__srScriptsReady = true;
                    console.log('SR scripts initialized');
                }
            }, 100);
        })();
    "#;
    let _ = js_sys::eval(init_js);
}

/// Inject the Google Maps script (with the Places library) once.
pub fn load_google_maps(api_key: &str) {
    let src = format!(
        "https://maps.googleapis.com/maps/api/js?key={}&libraries=places",
        api_key
    );
    call_js(&format!(
        r#"
        if (!window.__srGoogleRequested) {{
            window.__srGoogleRequested = true;
            var script = document.createElement('script');
            script.type = 'text/javascript';
            script.async = true;
            script.src = {src};
            document.head.appendChild(script);
        }}
        "#,
        src = js_string(&src),
    ));
}

/// Draw a chart frame into `container_id`, waiting for the scripts and the
/// container element to exist.
///
/// Only the newest pending draw survives: a later call or
/// [`destroy_chart`] cancels any draw still waiting for its container.
pub fn render_chart(container_id: &str, frame_json: &str) {
    call_js(&render_chart_js(container_id, frame_json));
}

fn render_chart_js(container_id: &str, frame_json: &str) -> String {
    format!(
        r#"
        (function() {{
            var gen = window.__srChartGen = (window.__srChartGen || 0) + 1;
            var poll = setInterval(function() {{
                if (gen !== window.__srChartGen) {{
                    clearInterval(poll);
                    return;
                }}
                if (window.__srScriptsReady && document.getElementById({id})) {{
                    clearInterval(poll);
                    try {{
                        window.renderAccidentChart({id}, {frame});
                    }} catch(e) {{ console.error('[SR] renderAccidentChart error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
        id = js_string(container_id),
        frame = js_string(frame_json),
    )
}

pub fn destroy_chart(container_id: &str) {
    call_js(&format!(
        "window.__srChartGen = (window.__srChartGen || 0) + 1; \
         if (window.destroyAccidentChart) {{ window.destroyAccidentChart({}); }}",
        js_string(container_id)
    ));
}

/// Queue one map command. Commands run in order once the scripts are loaded
/// and `container_id` is in the DOM.
pub fn apply_map_command(container_id: &str, command_json: &str) {
    call_js(&format!(
        r#"
        (function() {{
            var queue = window.__srMapQueue = window.__srMapQueue || [];
            queue.push({cmd});
            var drain = function() {{
                while (queue.length) {{
                    try {{ window.srMapApply(queue.shift()); }}
                    catch(e) {{ console.error('[SR] map command failed:', e); }}
                }}
            }};
            var ready = function() {{
                return window.__srScriptsReady && document.getElementById({id});
            }};
            if (ready()) {{ drain(); return; }}
            if (window.__srMapWaiting) return;
            window.__srMapWaiting = true;
            var poll = setInterval(function() {{
                if (ready()) {{
                    clearInterval(poll);
                    window.__srMapWaiting = false;
                    drain();
                }}
            }}, 100);
        }})();
        "#,
        cmd = js_string(command_json),
        id = js_string(container_id),
    ));
}

/// Whether the Google Maps API and the helper scripts are usable.
pub fn google_ready() -> bool {
    js_sys::eval("!!(window.__srScriptsReady && window.srGoogleReady && window.srGoogleReady())")
        .ok()
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}

/// Evaluate `code`, await the promise it yields and return its string result.
pub async fn eval_promise(code: &str) -> Result<String, JsValue> {
    let value = js_sys::eval(code)?;
    let resolved = JsFuture::from(Promise::resolve(&value)).await?;
    resolved
        .as_string()
        .ok_or_else(|| JsValue::from_str("promise resolved to a non-string value"))
}

/// Render a rejected promise or thrown value as text for logs and errors.
pub fn describe_js_error(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            Reflect::get(err, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", err))
}

/// A Rust callback installed as a `window` global, removed again on drop.
pub struct JsHook<F: ?Sized> {
    name: &'static str,
    _closure: Closure<F>,
}

impl<F: ?Sized> JsHook<F>
where
    Closure<F>: AsRef<JsValue>,
{
    pub fn install(name: &'static str, closure: Closure<F>) -> Self {
        let target = js_sys::global();
        if Reflect::set(&target, &JsValue::from_str(name), closure.as_ref()).is_err() {
            warn!("could not install JS hook {}", name);
        }
        Self {
            name,
            _closure: closure,
        }
    }
}

impl<F: ?Sized> Drop for JsHook<F> {
    fn drop(&mut self) {
        let _ = Reflect::delete_property(&js_sys::global(), &JsValue::from_str(self.name));
    }
}
