//! Tabs switching between the four accident charts.

use crate::components::{ChartContainer, LoadingSpinner};
use crate::state::AppState;
use dioxus::prelude::*;
use sr_data::chart::ChartKind;
use sr_view::Msg;

#[component]
pub fn ChartTabs() -> Element {
    let state = use_context::<AppState>();
    let view_loop = use_coroutine_handle::<Msg>();
    let (selected, loading) = {
        let view = state.view.read();
        (view.chart, view.is_loading())
    };

    rsx! {
        div {
            class: "viz-graph-container",
            style: "flex: 1; min-width: 320px;",
            div {
                role: "tablist",
                style: "display: flex; gap: 4px; border-bottom: 1px solid #e0e0e0;",
                for kind in ChartKind::ALL {
                    button {
                        key: "{kind.container_id()}",
                        role: "tab",
                        class: if kind == selected { "tab active" } else { "tab" },
                        style: if kind == selected { "border-bottom: 2px solid #1976d2;" } else { "" },
                        onclick: move |_| view_loop.send(Msg::SelectChart(kind)),
                        "{kind.tab_label()}"
                    }
                }
            }
            div {
                role: "tabpanel",
                if loading {
                    LoadingSpinner {}
                } else {
                    ChartContainer { id: selected.container_id().to_string() }
                    span {
                        class: "tooltip-icon graph-tooltip",
                        title: "{selected.help()}",
                        style: "cursor: help; color: #888;",
                        "?"
                    }
                }
            }
        }
    }
}
