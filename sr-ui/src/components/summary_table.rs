//! Label/value table for the active route or the expanded cluster.

use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn SummaryTable() -> Element {
    let state = use_context::<AppState>();
    let rows = state.view.read().rows().to_vec();
    if rows.is_empty() {
        return rsx! {};
    }

    rsx! {
        table {
            class: "viz-text-info",
            style: "width: 20rem; border-collapse: collapse; font-size: 14px;",
            colgroup {
                col { style: "width: 60%;" }
                col { style: "width: 40%;" }
            }
            tbody {
                for row in rows {
                    tr {
                        key: "{row.label}",
                        class: if row.bold { "bold-row" } else { "" },
                        style: if row.bold { "font-weight: bold;" } else { "" },
                        th {
                            scope: "row",
                            style: "text-align: left; padding: 4px;",
                            "{row.label} "
                            span {
                                class: "tooltip-icon",
                                title: "{row.help}",
                                style: "cursor: help; color: #888;",
                                "?"
                            }
                        }
                        td {
                            style: "text-align: right; padding: 4px;",
                            if let Some(prefix) = row.prefix {
                                span { class: "prefix", style: "color: #888; margin-right: 6px;", "{prefix}" }
                            }
                            span {
                                style: value_style(row.color.as_deref()),
                                {row.value.clone().unwrap_or_default()}
                            }
                        }
                    }
                }
            }
        }
    }
}

fn value_style(color: Option<&str>) -> String {
    color.map(|c| format!("color: {};", c)).unwrap_or_default()
}
