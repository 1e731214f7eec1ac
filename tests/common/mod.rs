//! Shared utilities for gateway integration tests.

use axum::{
    body::{Body, Bytes},
    extract::{Path, Query, State},
    http::{header, HeaderMap, Request, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tower::ServiceExt;

use weather_gateway::{app, AppState, Config};

/// Headers of one request received by the mock weather API.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub path: String,
    pub user_agent: Option<String>,
    pub accept: Option<String>,
}

#[derive(Clone)]
struct MockState {
    base: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

/// A running mock of the weather API.
pub struct MockWeatherApi {
    pub base: String,
    pub seen: Arc<Mutex<Vec<SeenRequest>>>,
}

/// Start a mock weather API on an ephemeral port.
///
/// - `/points/39.7456,-97.0892` resolves to a grid with two periods
/// - `/points/0.0000,0.0000` resolves to a grid with no periods
/// - `/points/10.0000,10.0000` has no forecast locator
/// - any other point is a 404
/// - `/alerts?area=KS` has two alerts, `ZZ` fails with 500, others are empty
pub async fn start_mock_weather_api() -> MockWeatherApi {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let seen = Arc::new(Mutex::new(Vec::new()));

    let state = MockState {
        base: base.clone(),
        seen: seen.clone(),
    };
    let router = Router::new()
        .route("/points/{coords}", get(points))
        .route("/gridpoints/{office}/{xy}/forecast", get(gridpoint_forecast))
        .route("/alerts", get(alerts))
        .with_state(state);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    MockWeatherApi { base, seen }
}

fn record(state: &MockState, path: String, headers: &HeaderMap) {
    let value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    state.seen.lock().unwrap().push(SeenRequest {
        path,
        user_agent: value(header::USER_AGENT),
        accept: value(header::ACCEPT),
    });
}

async fn points(
    State(state): State<MockState>,
    Path(coords): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    record(&state, format!("/points/{}", coords), &headers);
    match coords.as_str() {
        "39.7456,-97.0892" => (
            StatusCode::OK,
            Json(json!({
                "properties": {
                    "gridId": "TOP",
                    "forecast": format!("{}/gridpoints/TOP/31,80/forecast", state.base)
                }
            })),
        ),
        "0.0000,0.0000" => (
            StatusCode::OK,
            Json(json!({
                "properties": {
                    "gridId": "EMPTY",
                    "forecast": format!("{}/gridpoints/EMPTY/1,1/forecast", state.base)
                }
            })),
        ),
        "10.0000,10.0000" => (StatusCode::OK, Json(json!({ "properties": {} }))),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({ "title": "Data Unavailable For Requested Point" })),
        ),
    }
}

async fn gridpoint_forecast(
    State(state): State<MockState>,
    Path((office, xy)): Path<(String, String)>,
    headers: HeaderMap,
) -> Json<Value> {
    record(&state, format!("/gridpoints/{}/{}/forecast", office, xy), &headers);
    if office == "EMPTY" {
        return Json(json!({ "properties": { "periods": [] } }));
    }
    Json(json!({
        "properties": {
            "periods": [
                {
                    "name": "Tonight",
                    "temperature": 54,
                    "temperatureUnit": "F",
                    "windSpeed": "5 to 10 mph",
                    "windDirection": "SW",
                    "shortForecast": "Mostly Clear"
                },
                {
                    "name": "Saturday",
                    "temperature": 78,
                    "temperatureUnit": "F",
                    "windSpeed": "10 mph",
                    "windDirection": "S"
                }
            ]
        }
    }))
}

async fn alerts(
    State(state): State<MockState>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let area = query.get("area").cloned().unwrap_or_default();
    record(&state, format!("/alerts?area={}", area), &headers);
    match area.as_str() {
        "KS" => (
            StatusCode::OK,
            Json(json!({
                "features": [
                    { "properties": {
                        "event": "Flood Warning",
                        "areaDesc": "Riley, KS",
                        "severity": "Severe",
                        "status": "Actual",
                        "headline": "Flood Warning issued for Riley County"
                    } },
                    { "properties": {
                        "event": "Wind Advisory",
                        "areaDesc": "Geary, KS",
                        "severity": "Moderate",
                        "status": "Actual"
                    } }
                ]
            })),
        ),
        "ZZ" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "title": "Unexpected Problem" })),
        ),
        _ => (StatusCode::OK, Json(json!({ "features": [] }))),
    }
}

/// Build the gateway router pointed at `api_base`, serving the bundled assets.
pub fn gateway(api_base: &str) -> Router {
    let config = Config {
        api_base: api_base.to_string(),
        public_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("public"),
        ..Config::default()
    };
    app(AppState::from_config(&config).unwrap())
}

/// Response parts collected for assertions.
#[allow(dead_code)]
pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Reply {
    #[allow(dead_code)]
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

pub async fn send(router: &Router, request: Request<Body>) -> Reply {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    Reply {
        status,
        headers,
        body,
    }
}

#[allow(dead_code)]
pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[allow(dead_code)]
pub fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}
