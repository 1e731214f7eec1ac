//! HTTP relay for National Weather Service forecasts and alerts.
//!
//! Browser requests come in as JSON, are forwarded to `api.weather.gov`,
//! and the geo-JSON answers are reshaped into plain-text summaries. A small
//! set of front-end files is served from the public directory.

pub mod config;
pub mod constants;
pub mod error;
pub mod formatters;
pub mod models;
pub mod server;
pub mod service;
pub mod static_files;

pub use config::Config;
pub use error::GatewayError;
pub use server::{app, AppState};
pub use service::Weather;
