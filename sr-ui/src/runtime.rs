//! The single update loop: messages in, state committed, effects out.

use std::rc::Rc;

use dioxus::prelude::*;
use futures::channel::mpsc::{unbounded, UnboundedSender};
use futures::StreamExt;
use log::{error, info, warn};
use sr_core::backend::ScoringBackend;
use sr_core::cluster::AccidentCluster;
use sr_core::config::AppConfig;
use sr_core::provider::MappingGateway;
use sr_data::chart::{build_frame, ChartKind};
use sr_view::{Effect, Msg, ViewState};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::backend::FetchBackend;
use crate::gateway::GoogleMapsGateway;
use crate::js_bridge::{self, JsHook, MAP_EVENT_HOOK};
use crate::map::{LeafletSurface, MapEvent, MapOptions, MapRenderer};

pub const MAP_CONTAINER_ID: &str = "leaflet-map-element";

/// Owns the map, the gateway and the backend client for one mounted app.
///
/// Dropping it tears the map down and unregisters the JS hooks.
pub struct Runtime {
    view: Signal<ViewState>,
    map: MapRenderer<LeafletSurface>,
    backend: FetchBackend,
    gateway: GoogleMapsGateway,
    outbox: UnboundedSender<Msg>,
    _map_hook: JsHook<dyn FnMut(String)>,
    _place_hook: JsHook<dyn FnMut(String, String)>,
}

impl Runtime {
    pub fn start(
        view: Signal<ViewState>,
        config: &AppConfig,
        clusters: &[AccidentCluster],
        outbox: UnboundedSender<Msg>,
    ) -> Self {
        js_bridge::init_scripts();

        let gateway = match &config.google_api_key {
            Some(key) => GoogleMapsGateway::load(key),
            None => {
                warn!("No Google Maps API key configured, route lookups will fail");
                GoogleMapsGateway
            }
        };
        gateway.attach_autocomplete();

        let mut map = MapRenderer::new(LeafletSurface::new(MAP_CONTAINER_ID));
        map.create(&MapOptions {
            container_id: MAP_CONTAINER_ID.to_string(),
            mapbox_token: config.mapbox_token.clone(),
            locate: true,
        });
        if let Err(err) = map.draw_clusters(clusters) {
            error!("Unable to draw accident clusters: {}", err);
        }
        info!("Map created with {} accident clusters", clusters.len());

        let map_tx = outbox.clone();
        let map_hook = JsHook::install(
            MAP_EVENT_HOOK,
            Closure::wrap(Box::new(move |json: String| match MapEvent::parse(&json) {
                Ok(event) => send(&map_tx, Msg::from(event)),
                Err(err) => warn!("Ignoring malformed map event {}: {}", json, err),
            }) as Box<dyn FnMut(String)>),
        );

        let place_tx = outbox.clone();
        let place_hook = GoogleMapsGateway::on_place_selected(move |field, value| {
            send(&place_tx, Msg::FormChanged { field, value });
        });

        Self {
            view,
            map,
            backend: FetchBackend::new(config.api_base_url.clone()),
            gateway,
            outbox,
            _map_hook: map_hook,
            _place_hook: place_hook,
        }
    }

    /// Commit `msg` to the view state, then perform the resulting effects.
    pub fn dispatch(&mut self, msg: Msg) {
        let effects = self.view.write().update(msg);
        for effect in effects {
            self.run(effect);
        }
    }

    fn run(&mut self, effect: Effect) {
        match effect {
            Effect::FetchDirections(form) => {
                let gateway = self.gateway;
                let outbox = self.outbox.clone();
                spawn_local(async move {
                    let start = gateway.geocode(&form.start).await;
                    let dest = gateway.geocode(&form.dest).await;
                    let msg = match gateway.directions(&form).await {
                        Ok(Some(result)) => Msg::RoutesLoaded {
                            start,
                            dest,
                            routes: result.routes,
                        },
                        Ok(None) => return,
                        Err(err) => Msg::DirectionsFailed(err.to_string()),
                    };
                    send(&outbox, msg);
                });
            }
            Effect::FetchScores { request, body } => {
                let backend = self.backend.clone();
                let outbox = self.outbox.clone();
                spawn_local(async move {
                    let msg = match backend.score_routes(&body).await {
                        Ok(response) => Msg::ScoresLoaded { request, response },
                        Err(err) => Msg::ScoresFailed {
                            request,
                            error: err.to_string(),
                        },
                    };
                    send(&outbox, msg);
                });
            }
            Effect::FetchClusterAccidents {
                request,
                cluster_id,
            } => {
                let backend = self.backend.clone();
                let outbox = self.outbox.clone();
                spawn_local(async move {
                    let msg = match backend.cluster_accidents(&cluster_id).await {
                        Ok(accidents) => Msg::ClusterLoaded { request, accidents },
                        Err(err) => Msg::ClusterFailed {
                            request,
                            error: err.to_string(),
                        },
                    };
                    send(&outbox, msg);
                });
            }
            Effect::ShowRoutes {
                bounds,
                paths,
                active,
            } => {
                if let Err(err) = self.map.show_routes(bounds, &paths, active) {
                    error!("Unable to show routes: {}", err);
                }
            }
            Effect::SelectMapRoute(idx) => {
                if let Err(err) = self.map.select_active_route(idx) {
                    error!("Unable to select route: {}", err);
                }
            }
            Effect::RenderChart { kind, accidents } => {
                let frame = build_frame(kind, &accidents);
                js_bridge::render_chart(kind.container_id(), &frame.to_json());
            }
        }
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        for kind in ChartKind::ALL {
            js_bridge::destroy_chart(kind.container_id());
        }
    }
}

fn send(outbox: &UnboundedSender<Msg>, msg: Msg) {
    if outbox.unbounded_send(msg).is_err() {
        warn!("View loop has stopped, dropping message");
    }
}

/// Start the view loop for this component tree.
///
/// Components send [`Msg`]s through `use_coroutine_handle::<Msg>()`.
pub fn use_view_loop(
    view: Signal<ViewState>,
    config: AppConfig,
    clusters: Rc<[AccidentCluster]>,
) -> Coroutine<Msg> {
    use_coroutine(move |inbox: UnboundedReceiver<Msg>| {
        let config = config.clone();
        let clusters = clusters.clone();
        async move {
            let (outbox, internal) = unbounded::<Msg>();
            let mut runtime = Runtime::start(view, &config, &clusters, outbox);
            let mut messages = futures::stream::select(inbox, internal);
            while let Some(msg) = messages.next().await {
                runtime.dispatch(msg);
            }
        }
    })
}
