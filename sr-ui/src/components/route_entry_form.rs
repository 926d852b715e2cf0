//! Start and destination inputs.

use crate::gateway::{DEST_INPUT_ID, START_INPUT_ID};
use crate::state::AppState;
use dioxus::prelude::*;
use sr_core::route::FormField;
use sr_view::Msg;

#[component]
pub fn RouteEntryForm() -> Element {
    let state = use_context::<AppState>();
    let view_loop = use_coroutine_handle::<Msg>();
    let (start, dest) = {
        let view = state.view.read();
        (view.form.start.clone(), view.form.dest.clone())
    };

    let on_start = move |evt: Event<FormData>| {
        view_loop.send(Msg::FormChanged {
            field: FormField::Start,
            value: evt.value(),
        });
    };
    let on_dest = move |evt: Event<FormData>| {
        view_loop.send(Msg::FormChanged {
            field: FormField::Dest,
            value: evt.value(),
        });
    };
    let on_key = move |evt: KeyboardEvent| {
        if evt.key() == Key::Enter {
            view_loop.send(Msg::Submit);
        }
    };

    rsx! {
        div {
            class: "route-entry-form",
            style: "display: flex; gap: 12px; align-items: center; margin: 12px 0;",
            label {
                style: "font-weight: bold;",
                "Start Point "
                input {
                    id: START_INPUT_ID,
                    r#type: "text",
                    name: "start",
                    value: "{start}",
                    oninput: on_start,
                    onkeyup: on_key,
                }
            }
            label {
                style: "font-weight: bold;",
                "Destination "
                input {
                    id: DEST_INPUT_ID,
                    r#type: "text",
                    name: "dest",
                    value: "{dest}",
                    oninput: on_dest,
                    onkeyup: on_key,
                }
            }
            button {
                class: "primary-button",
                onclick: move |_| view_loop.send(Msg::Submit),
                "Calculate Safety Score"
            }
        }
    }
}
