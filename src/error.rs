//! Error types for the gateway.
//!
//! Lookup failures keep their cause so callers can tell validation, coverage
//! and upstream problems apart; the HTTP mapping below folds all of them into
//! `400 {"error": ...}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorEnvelope;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Malformed or out-of-range request body.
    #[error("{0}")]
    InvalidInput(String),

    /// The weather API has no forecast for the coordinate.
    #[error("Unable to get forecast for location: {latitude}, {longitude}. Only U.S. locations are supported.")]
    UnsupportedLocation { latitude: f64, longitude: f64 },

    /// The forecast resource returned no periods.
    #[error("No forecast periods available")]
    NoData,

    /// Transport failure or non-success status from the weather API.
    #[error("{message}")]
    Upstream {
        status: Option<reqwest::StatusCode>,
        message: String,
    },

    #[error("Not Found")]
    NotFound,

    #[error("Forbidden")]
    Forbidden,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GatewayError {
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_)
            | Self::UnsupportedLocation { .. }
            | Self::NoData
            | Self::Upstream { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        Self::Upstream {
            status: err.status(),
            message: format!("Weather API request failed: {}", err),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            Self::Io(err) => {
                tracing::error!("Static asset read failed: {}", err);
                (status, "Internal Server Error").into_response()
            }
            Self::NotFound | Self::Forbidden => (status, self.to_string()).into_response(),
            _ => {
                let body = ErrorEnvelope {
                    error: self.to_string(),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}
