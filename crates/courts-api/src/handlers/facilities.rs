use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::dto::{FacilityRequest, FacilityResponse};
use crate::error::ApiError;
use crate::state::AppState;

use super::log_failure;

pub async fn create_facility(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FacilityRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<FacilityResponse>), ApiError> {
    let Json(request) = payload?;
    tracing::info!(name = ?request.name, "Creating facility");

    let facility = state.facilities.create_facility(request.into()).await.map_err(|e| {
        log_failure(&e, "create_facility");
        ApiError::from(e)
    })?;

    Ok((StatusCode::CREATED, Json(FacilityResponse::from(&facility))))
}

pub async fn list_facilities(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<FacilityResponse>>, ApiError> {
    tracing::info!("Listing facilities");

    let facilities = state.facilities.list_facilities().await.map_err(|e| {
        log_failure(&e, "list_facilities");
        ApiError::from(e)
    })?;

    Ok(Json(facilities.iter().map(FacilityResponse::from).collect()))
}

pub async fn get_facility(
    State(state): State<Arc<AppState>>,
    Path(facility_id): Path<String>,
) -> Result<Json<FacilityResponse>, ApiError> {
    tracing::info!(facility_id = %facility_id, "Fetching facility");

    let facility = state.facilities.get_facility(&facility_id).await.map_err(|e| {
        log_failure(&e, "get_facility");
        ApiError::from(e)
    })?;

    Ok(Json(FacilityResponse::from(&facility)))
}

pub async fn replace_facility(
    State(state): State<Arc<AppState>>,
    Path(facility_id): Path<String>,
    payload: Result<Json<FacilityRequest>, JsonRejection>,
) -> Result<Json<FacilityResponse>, ApiError> {
    let Json(request) = payload?;
    tracing::info!(facility_id = %facility_id, "Replacing facility");

    let facility =
        state.facilities.replace_facility(&facility_id, request.into()).await.map_err(|e| {
            log_failure(&e, "replace_facility");
            ApiError::from(e)
        })?;

    Ok(Json(FacilityResponse::from(&facility)))
}
