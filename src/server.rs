//! HTTP gateway: routes, middleware and the serve loop.
//!
//! - `POST /api/forecast` and `POST /api/alerts` call the weather service
//! - `OPTIONS` on any path is answered as a CORS preflight
//! - everything else falls through to static assets
//!
//! Every response carries the CORS headers, including preflights and panics.

use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode, Uri},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::de::DeserializeOwned;
use std::any::Any;
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};

use crate::config::Config;
use crate::error::GatewayError;
use crate::models::{AlertsEnvelope, ForecastEnvelope, GetAlertsRequest, GetForecastRequest};
use crate::service::Weather;
use crate::static_files::StaticFiles;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub weather: Weather,
    pub assets: StaticFiles,
}

impl AppState {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            weather: Weather::new(&config.api_base)?,
            assets: StaticFiles::new(config.public_dir.clone()),
        })
    }
}

/// Build the gateway router with all middleware layers.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/forecast", post(forecast_handler).fallback(static_handler))
        .route("/api/alerts", post(alerts_handler).fallback(static_handler))
        .fallback(static_handler)
        .with_state(state)
        .layer(middleware::from_fn(preflight))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
}

/// Bind to the configured port and serve until Ctrl-C / SIGTERM.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let state = AppState::from_config(&config)?;
    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        public_dir = %config.public_dir.display(),
        "HTTP server starting"
    );

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn forecast_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ForecastEnvelope>, GatewayError> {
    let request: GetForecastRequest = parse_body(&body)?;
    let forecast = state.weather.forecast(request).await?;
    Ok(Json(ForecastEnvelope { forecast }))
}

async fn alerts_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AlertsEnvelope>, GatewayError> {
    let request: GetAlertsRequest = parse_body(&body)?;
    let alerts = state.weather.alerts(request).await?;
    Ok(Json(AlertsEnvelope { alerts }))
}

async fn static_handler(State(state): State<AppState>, uri: Uri) -> Result<Response, GatewayError> {
    state.assets.serve(uri.path()).await
}

/// Answers CORS preflights before routing sees them.
async fn preflight(req: Request<Body>, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    next.run(req).await
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, GatewayError> {
    serde_json::from_slice(body)
        .map_err(|e| GatewayError::invalid_input(format!("Invalid request body: {}", e)))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    tracing::error!("Handler panicked: {}", detail);

    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
