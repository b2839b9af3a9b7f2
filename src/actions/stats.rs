use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::error;

use crate::actions::{DataListResponse, json_error};
use crate::trip_types::TripType;
use crate::web::AppState;

// ============================================================================
// Query Parameters
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct MaterialStatsParams {
    pub trip_type: String,
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OperatorStatsParams {
    pub username: Option<String>,
}

/// An empty `username=` query parameter means "all users"
fn username_filter(username: Option<String>) -> Option<String> {
    username.filter(|u| !u.trim().is_empty())
}

// ============================================================================
// Handler Functions
// ============================================================================

/// GET /data/stats/materials
/// Material (vehicle/aircraft type) usage of completed trips
pub async fn get_material_stats(
    Query(params): Query<MaterialStatsParams>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    metrics::counter!("stats.api.materials.requests_total").increment(1);

    let trip_type = match params.trip_type.parse::<TripType>() {
        Ok(trip_type) => trip_type,
        Err(e) => return json_error(StatusCode::BAD_REQUEST, &e.to_string()).into_response(),
    };

    match state
        .stats
        .get_material_usage(username_filter(params.username), trip_type)
        .await
    {
        Ok(data) => (StatusCode::OK, Json(DataListResponse { data })).into_response(),
        Err(e) => {
            metrics::counter!("stats.api.errors_total").increment(1);
            error!("Failed to get material stats: {:#}", e);
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("Failed to get material stats: {}", e),
            )
            .into_response()
        }
    }
}

/// GET /data/stats/operators
/// Operator usage of completed trips
pub async fn get_operator_stats(
    Query(params): Query<OperatorStatsParams>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    metrics::counter!("stats.api.operators.requests_total").increment(1);

    match state
        .stats
        .get_operator_usage(username_filter(params.username))
        .await
    {
        Ok(data) => (StatusCode::OK, Json(DataListResponse { data })).into_response(),
        Err(e) => {
            metrics::counter!("stats.api.errors_total").increment(1);
            error!("Failed to get operator stats: {:#}", e);
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("Failed to get operator stats: {}", e),
            )
            .into_response()
        }
    }
}
