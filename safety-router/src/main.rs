//! Safety Router
//!
//! Enter a start and a destination, compare up to three driving routes by
//! the accident history along them, and click accident hotspots on the map
//! to inspect the accidents behind them.
//!
//! Data flow:
//! 1. `build.rs` copies `accident_hotspots.csv` into `OUT_DIR`.
//! 2. `include_str!` embeds it; on mount the clusters are parsed and drawn.
//! 3. Form submits, route picks and map clicks go to the view loop, which
//!    calls Google Directions and the scoring backend and redraws.

use std::rc::Rc;

use anyhow::Context;
use dioxus::prelude::*;
use log::{error, info};
use sr_core::cluster::{load_clusters, AccidentCluster};
use sr_core::config::AppConfig;
use sr_ui::components::{AppHeader, DetailPanel, RouteEntryForm};
use sr_ui::runtime::{use_view_loop, MAP_CONTAINER_ID};
use sr_ui::state::AppState;

const HOTSPOTS_CSV: &str = include_str!(concat!(env!("OUT_DIR"), "/accident_hotspots.csv"));

const D3_JS: &str = "https://d3js.org/d3.v7.min.js";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("safety-router-root"))
        .launch(App);
}

fn load_hotspots(csv_data: &str) -> anyhow::Result<Rc<[AccidentCluster]>> {
    let clusters = load_clusters(csv_data).context("bundled accident_hotspots.csv is malformed")?;
    Ok(clusters.into())
}

#[component]
fn App() -> Element {
    let state = use_context_provider(|| AppState::new(AppConfig::from_build_env()));

    let clusters = use_hook(|| match load_hotspots(HOTSPOTS_CSV) {
        Ok(clusters) => {
            info!("Loaded {} accident hotspots", clusters.len());
            clusters
        }
        Err(err) => {
            error!("{:#}", err);
            Rc::from(Vec::new())
        }
    });

    let config = state.config.peek().clone();
    use_view_loop(state.view, config, clusters);

    rsx! {
        document::Stylesheet { href: LEAFLET_CSS }
        document::Script { src: D3_JS }
        document::Script { src: LEAFLET_JS }

        div { class: "safety-router",
            AppHeader {}
            div { class: "layout",
                style: "display: flex; gap: 16px; align-items: flex-start;",
                div { class: "map-column", style: "flex: 3; min-width: 0;",
                    RouteEntryForm {}
                    div {
                        id: MAP_CONTAINER_ID,
                        style: "width: 100%; height: 600px;",
                    }
                }
                div { class: "detail-column", style: "flex: 2; min-width: 320px;",
                    DetailPanel {}
                }
            }
        }
    }
}
