//! Route or cluster details: selector, summary table and charts.

use crate::components::{ChartTabs, RouteSelector, SummaryTable};
use crate::state::AppState;
use dioxus::prelude::*;
use sr_view::{DetailView, Msg};

#[component]
pub fn DetailPanel() -> Element {
    let state = use_context::<AppState>();
    let view_loop = use_coroutine_handle::<Msg>();
    let (heading, can_return, empty) = match &state.view.read().detail {
        DetailView::None => ("Route", false, true),
        DetailView::Route(_) => ("Route", false, false),
        DetailView::Cluster { prior_route, .. } => ("Cluster", prior_route.is_some(), false),
    };

    rsx! {
        h3 { "{heading} Details" }
        if can_return {
            button {
                class: "return-route",
                onclick: move |_| view_loop.send(Msg::ReturnToRoute),
                "Show Routes"
            }
        }
        div {
            class: "viz-container",
            style: "display: flex; flex-wrap: wrap; gap: 16px;",
            if empty {
                h4 { "Enter a route or select a cluster..." }
            } else {
                div {
                    class: "viz-text-container",
                    RouteSelector {}
                    SummaryTable {}
                }
                ChartTabs {}
            }
        }
    }
}
