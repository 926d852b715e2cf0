//! One button per candidate route.

use crate::state::AppState;
use dioxus::prelude::*;
use sr_view::Msg;

#[component]
pub fn RouteSelector() -> Element {
    let state = use_context::<AppState>();
    let view_loop = use_coroutine_handle::<Msg>();
    let view = state.view.read();
    let Some(route) = view.route() else {
        return rsx! {};
    };
    let loading = view.is_loading();
    let active = route.active_route;
    let buttons = route.buttons.clone();

    rsx! {
        div {
            class: "route-selector",
            style: "display: flex; flex-direction: column; gap: 4px; width: 20rem;",
            for (idx, label) in buttons.into_iter().enumerate() {
                button {
                    key: "{idx}",
                    class: if idx == active { "primary-button active" } else { "primary-button" },
                    disabled: loading,
                    onclick: move |_| view_loop.send(Msg::SelectRoute(idx)),
                    "{label}"
                }
            }
        }
        if route.route_count() == 1 {
            h3 { "Only found one possible route. Please try another query to compare multiple options." }
        }
    }
}
