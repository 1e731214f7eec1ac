use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use std::sync::Arc;

use crate::constants::{GEO_JSON, USER_AGENT};
use crate::error::GatewayError;
use crate::formatters::{format_alerts, format_forecast};
use crate::models::{
    AlertResponse, ForecastResponse, GetAlertsRequest, GetForecastRequest, PointsResponse,
};

/// Weather lookups backed by the National Weather Service API
#[derive(Clone)]
pub struct Weather {
    client: Arc<Client>,
    api_base: Arc<str>,
}

impl Weather {
    /// Creates a new Weather service instance talking to `api_base`
    pub fn new(api_base: &str) -> anyhow::Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static(GEO_JSON));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            api_base: Arc::from(api_base.trim_end_matches('/')),
        })
    }

    /// Makes an HTTP GET request and deserializes the JSON response
    async fn make_request<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
    ) -> Result<T, GatewayError> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Weather API returned {} for {}", status, url);
            return Err(GatewayError::Upstream {
                status: Some(status),
                message: format!("Weather API request failed with status: {}", status),
            });
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }

    /// Gets the forecast text for a coordinate
    pub async fn forecast(&self, request: GetForecastRequest) -> Result<String, GatewayError> {
        let GetForecastRequest {
            latitude,
            longitude,
        } = request;
        validate_coordinate(latitude, longitude)?;

        tracing::info!("Getting forecast for coordinates: {}, {}", latitude, longitude);

        let points_url = format!("{}/points/{:.4},{:.4}", self.api_base, latitude, longitude);
        let unsupported = GatewayError::UnsupportedLocation {
            latitude,
            longitude,
        };

        let points = match self.make_request::<PointsResponse>(&points_url).await {
            Ok(points) => points,
            Err(GatewayError::Upstream {
                status: Some(StatusCode::NOT_FOUND),
                ..
            }) => return Err(unsupported),
            Err(e) => return Err(e),
        };

        let forecast_url = match points.properties.forecast {
            Some(url) if !url.trim().is_empty() => url,
            _ => return Err(unsupported),
        };
        tracing::debug!(
            "Resolved grid point {} -> {}",
            points.properties.grid_id.as_deref().unwrap_or("?"),
            forecast_url
        );

        let forecast = self.make_request::<ForecastResponse>(&forecast_url).await?;
        let periods = forecast.properties.periods;
        if periods.is_empty() {
            return Err(GatewayError::NoData);
        }

        Ok(format_forecast(latitude, longitude, &periods))
    }

    /// Gets active alerts text for a two-letter state code
    pub async fn alerts(&self, request: GetAlertsRequest) -> Result<String, GatewayError> {
        let state = normalize_state(&request.state)?;

        tracing::info!("Getting alerts for state: {}", state);

        let url = format!("{}/alerts?area={}", self.api_base, state);
        let alerts = self.make_request::<AlertResponse>(&url).await?;

        Ok(format_alerts(&state, &alerts.features))
    }
}

fn validate_coordinate(latitude: f64, longitude: f64) -> Result<(), GatewayError> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(GatewayError::invalid_input(
            "Latitude must be a number between -90 and 90",
        ));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(GatewayError::invalid_input(
            "Longitude must be a number between -180 and 180",
        ));
    }
    Ok(())
}

fn normalize_state(state: &str) -> Result<String, GatewayError> {
    if state.len() != 2 || !state.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(GatewayError::invalid_input(
            "State must be a two-letter code (e.g. CA, NY)",
        ));
    }
    Ok(state.to_ascii_uppercase())
}
