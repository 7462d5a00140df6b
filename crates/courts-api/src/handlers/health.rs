use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::dto::{HealthResponse, ReadinessResponse, ServiceInfoResponse};
use crate::state::AppState;

pub async fn service_info() -> impl IntoResponse {
    Json(ServiceInfoResponse::default())
}

pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse::default())
}

/// Readiness: 200 when the persistence store answers, 503 otherwise
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.facilities.check_store().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ReadinessResponse { status: "ready", store: "available", details: None }),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadinessResponse {
                    status: "unavailable",
                    store: "unavailable",
                    details: Some(e.to_string()),
                }),
            )
        }
    }
}
