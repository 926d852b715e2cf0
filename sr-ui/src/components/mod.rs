//! Dioxus RSX components for the Safety Router app.

mod app_header;
mod chart_container;
mod chart_tabs;
mod detail_panel;
mod loading_spinner;
mod route_entry_form;
mod route_selector;
mod summary_table;

pub use app_header::AppHeader;
pub use chart_container::ChartContainer;
pub use chart_tabs::ChartTabs;
pub use detail_panel::DetailPanel;
pub use loading_spinner::LoadingSpinner;
pub use route_entry_form::RouteEntryForm;
pub use route_selector::RouteSelector;
pub use summary_table::SummaryTable;
