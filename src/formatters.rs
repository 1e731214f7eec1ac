use serde_json::Value;

use crate::models::{AlertFeature, ForecastPeriod};

const UNKNOWN: &str = "Unknown";
const NO_FORECAST: &str = "No forecast available";
const SEPARATOR: &str = "---";

/// Formats forecast periods into a human-readable string
pub fn format_forecast(latitude: f64, longitude: f64, periods: &[ForecastPeriod]) -> String {
    let blocks: Vec<String> = periods.iter().map(format_period).collect();
    format!(
        "Forecast for {}, {}:\n\n{}",
        latitude,
        longitude,
        blocks.join("\n")
    )
}

/// Formats active alerts for a state into a human-readable string
pub fn format_alerts(state: &str, features: &[AlertFeature]) -> String {
    if features.is_empty() {
        return format!("No active alerts for {}", state);
    }

    let blocks: Vec<String> = features.iter().map(format_alert).collect();
    format!("Active alerts for {}:\n\n{}", state, blocks.join("\n"))
}

fn format_period(period: &ForecastPeriod) -> String {
    format!(
        "{}:\nTemperature: {}\u{00b0}{}\nWind: {} {}\n{}\n{}",
        or_unknown(&period.name),
        temperature(period.temperature.as_ref()),
        or_unknown(&period.temperature_unit),
        or_unknown(&period.wind_speed),
        or_unknown(&period.wind_direction),
        period.short_forecast.as_deref().unwrap_or(NO_FORECAST),
        SEPARATOR
    )
}

fn format_alert(feature: &AlertFeature) -> String {
    let props = &feature.properties;
    format!(
        "Event: {}\nArea: {}\nSeverity: {}\nStatus: {}\nHeadline: {}\n{}",
        or_unknown(&props.event),
        or_unknown(&props.area_desc),
        or_unknown(&props.severity),
        or_unknown(&props.status),
        or_unknown(&props.headline),
        SEPARATOR
    )
}

fn or_unknown(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or(UNKNOWN)
}

fn temperature(value: Option<&Value>) -> String {
    match value {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.clone(),
        _ => UNKNOWN.to_string(),
    }
}
