//! Browser side of the Safety Router: Dioxus components plus the bridges to
//! Leaflet, D3.js and Google Maps.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for the page's JS libraries via `js_sys::eval()`
//! - `map`: the map renderer and its Leaflet surface
//! - `gateway`: geocoding, directions and autocomplete
//! - `backend`: `fetch`-based client for the scoring backend
//! - `runtime`: the coroutine that applies messages and runs effects
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: RSX components for the form, details panel and charts

pub mod backend;
pub mod components;
pub mod gateway;
pub mod js_bridge;
pub mod map;
pub mod runtime;
pub mod state;
