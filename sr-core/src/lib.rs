pub mod accident;
pub mod backend;
pub mod cluster;
pub mod color;
pub mod config;
pub mod geo;
pub mod provider;
pub mod route;
pub mod summary;
pub mod wire;
