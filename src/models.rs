use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// National Weather Service API Models
// ============================================================================
//
// Every field is optional: the gateway renders placeholders instead of
// rejecting partial documents.

#[derive(Debug, Default, Deserialize)]
pub struct PointsResponse {
    #[serde(default)]
    pub properties: PointsProperties,
}

#[derive(Debug, Default, Deserialize)]
pub struct PointsProperties {
    /// Locator of the gridpoint forecast resource.
    pub forecast: Option<String>,
    #[serde(rename = "gridId")]
    pub grid_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub properties: ForecastProperties,
}

#[derive(Debug, Default, Deserialize)]
pub struct ForecastProperties {
    #[serde(default)]
    pub periods: Vec<ForecastPeriod>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ForecastPeriod {
    pub name: Option<String>,
    /// Usually an integer, but the API has been known to send strings.
    pub temperature: Option<Value>,
    #[serde(rename = "temperatureUnit")]
    pub temperature_unit: Option<String>,
    #[serde(rename = "windSpeed")]
    pub wind_speed: Option<String>,
    #[serde(rename = "windDirection")]
    pub wind_direction: Option<String>,
    #[serde(rename = "shortForecast")]
    pub short_forecast: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AlertResponse {
    #[serde(default)]
    pub features: Vec<AlertFeature>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AlertFeature {
    #[serde(default)]
    pub properties: AlertProperties,
}

#[derive(Debug, Default, Deserialize)]
pub struct AlertProperties {
    pub event: Option<String>,
    #[serde(rename = "areaDesc")]
    pub area_desc: Option<String>,
    pub severity: Option<String>,
    pub status: Option<String>,
    pub headline: Option<String>,
}

// ============================================================================
// Gateway Request/Response Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize)]
pub struct GetAlertsRequest {
    pub state: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct GetForecastRequest {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct ForecastEnvelope {
    pub forecast: String,
}

#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct AlertsEnvelope {
    pub alerts: String,
}

#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct ErrorEnvelope {
    pub error: String,
}
