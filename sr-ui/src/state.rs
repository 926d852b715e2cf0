//! Application state managed via Dioxus context.
//!
//! `AppState` bundles the reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`
//! and change the view only by sending a [`Msg`](sr_view::Msg) to the view loop.

use dioxus::prelude::*;
use sr_core::config::AppConfig;
use sr_view::ViewState;

#[derive(Clone, Copy)]
pub struct AppState {
    /// Everything the panel, selectors and charts render from
    pub view: Signal<ViewState>,
    pub config: Signal<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            view: Signal::new(ViewState::new()),
            config: Signal::new(config),
        }
    }
}
