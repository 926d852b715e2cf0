//! Page header with the tutorial toggle.

use crate::state::AppState;
use dioxus::prelude::*;
use sr_view::Msg;

const TUTORIAL_TEXT: &str = "You can use this tool to calculate the \"Safety Score\" for any US driving route, \
which describes the relative chance of serious accident given current weather conditions and past accidents \
found along that route. From there, you can compare and contrast alternative routes, inspect accident hotspots \
in the area, and view graphs.";

#[component]
pub fn AppHeader() -> Element {
    let state = use_context::<AppState>();
    let view_loop = use_coroutine_handle::<Msg>();
    let show_tutorial = state.view.read().show_tutorial;

    rsx! {
        header {
            class: "app-header",
            style: "display: flex; align-items: center; gap: 16px; padding: 8px 16px; border-bottom: 1px solid #e0e0e0;",
            span {
                class: "title",
                style: "font-size: 20px; font-weight: bold; flex: 1;",
                "Web Tool for Driver Safety and Accident Transparency"
            }
            button {
                class: "outlined-button",
                onclick: move |_| view_loop.send(Msg::ToggleTutorial),
                if show_tutorial { "Hide" } else { "What is this?" }
            }
        }
        if show_tutorial {
            p {
                class: "tutorial",
                style: "padding: 0 16px;",
                "{TUTORIAL_TEXT}"
            }
        }
    }
}
