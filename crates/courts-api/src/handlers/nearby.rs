use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use geojson::FeatureCollection;

use crate::dto::{NearbyCourtsResponse, NearbyRequest};
use crate::error::ApiError;
use crate::services::nearby_to_geojson;
use crate::state::AppState;

use super::log_failure;

pub async fn find_nearby(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NearbyRequest>, JsonRejection>,
) -> Result<Json<NearbyCourtsResponse>, ApiError> {
    let Json(request) = payload?;
    tracing::info!(
        latitude = ?request.latitude,
        longitude = ?request.longitude,
        radius_km = ?request.radius_km,
        "Processing nearby request"
    );

    let (query, result) = state.facilities.search_nearby(request.into()).await.map_err(|e| {
        log_failure(&e, "find_nearby");
        ApiError::from(e)
    })?;

    Ok(Json(NearbyCourtsResponse::new(&query, &result)))
}

pub async fn find_nearby_geojson(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NearbyRequest>, JsonRejection>,
) -> Result<Json<FeatureCollection>, ApiError> {
    let Json(request) = payload?;
    tracing::info!(
        latitude = ?request.latitude,
        longitude = ?request.longitude,
        radius_km = ?request.radius_km,
        "Processing nearby GeoJSON request"
    );

    let result = state.facilities.find_nearby(request.into()).await.map_err(|e| {
        log_failure(&e, "find_nearby_geojson");
        ApiError::from(e)
    })?;

    Ok(Json(nearby_to_geojson(&result)?))
}
