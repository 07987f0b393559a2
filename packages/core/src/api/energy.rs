//! Energy mix API endpoints
//!
//! Every pipeline failure is logged with its cause and answered with a
//! fixed, client-safe 500 message. Only parameter validation yields a 400.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::energy::{DailyEnergyMix, OptimalChargingWindow};
use crate::metrics::{PIPELINE_ENERGY_MIX, PIPELINE_OPTIMAL_CHARGING};
use super::validation::{first_param, parse_hours};
use super::AppState;

pub const ENERGY_MIX_ERROR: &str = "Failed to fetch energy mix data";
pub const OPTIMAL_CHARGING_ERROR: &str = "Failed to calculate optimal charging window";

type ApiError = (StatusCode, Json<Value>);

fn internal_error(message: &str) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
}

/// `GET /energy-mix` — daily generation mix for yesterday, today and tomorrow.
pub async fn energy_mix(
    State(state): State<AppState>,
) -> Result<Json<Vec<DailyEnergyMix>>, ApiError> {
    let result = state.service.daily_mix().await;
    state.metrics.record_pipeline(PIPELINE_ENERGY_MIX, result.is_ok());

    result.map(Json).map_err(|err| {
        tracing::error!("Error fetching energy mix: {}", err);
        internal_error(ENERGY_MIX_ERROR)
    })
}

/// `GET /optimal-charging?hours=N` — cleanest N-hour window in the next two days.
///
/// The query is taken as raw pairs so a repeated `hours` resolves to its
/// first value instead of failing extraction.
pub async fn optimal_charging(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<OptimalChargingWindow>, ApiError> {
    let duration = parse_hours(first_param(&params, "hours")).map_err(|errors| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": errors })),
        )
    })?;

    let result = state.service.optimal_window(duration).await;
    state
        .metrics
        .record_pipeline(PIPELINE_OPTIMAL_CHARGING, result.is_ok());

    result.map(Json).map_err(|err| {
        tracing::error!("Error calculating optimal window: {}", err);
        internal_error(OPTIMAL_CHARGING_ERROR)
    })
}
