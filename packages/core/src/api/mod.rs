//! HTTP surface of the service.
//!
//! Routes:
//! - `GET /`                  — banner
//! - `GET /health`            — liveness
//! - `GET /metrics`           — Prometheus exposition
//! - `GET /energy-mix`        — daily clean-energy summary
//! - `GET /optimal-charging`  — cleanest charging window (`hours=1..6`)
//!
//! CORS is permissive on every route.

pub mod energy;
pub mod health;
pub mod validation;

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{MatchedPath, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;

use crate::energy::EnergyService;
use crate::metrics::{AppMetrics, METRICS_CONTENT_TYPE};

/// Shared state for all routes. Holds no per-request data.
#[derive(Clone)]
pub struct AppState {
    pub service: EnergyService,
    pub metrics: Arc<AppMetrics>,
}

/// Assemble the complete router, ready to serve.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::index))
        .route("/health", get(health::health))
        .route("/metrics", get(render_metrics))
        .route("/energy-mix", get(energy::energy_mix))
        .route("/optimal-charging", get(energy::optimal_charging))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            track_http_metrics,
        ))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn render_metrics(State(state): State<AppState>) -> Response {
    match state.metrics.render() {
        Ok(body) => (
            [(header::CONTENT_TYPE, METRICS_CONTENT_TYPE)],
            Body::from(body),
        )
            .into_response(),
        Err(err) => {
            tracing::error!("Failed to render metrics: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "metrics error").into_response()
        }
    }
}

/// Record count and latency of every routed request.
async fn track_http_metrics(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let started = Instant::now();
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let response = next.run(request).await;

    let status = response.status().as_u16().to_string();
    state
        .metrics
        .http_requests_total
        .with_label_values(&[&method, &path, &status])
        .inc();
    state
        .metrics
        .http_request_duration
        .observe(started.elapsed().as_secs_f64());

    tracing::debug!("{} {} -> {}", method, path, status);
    response
}
