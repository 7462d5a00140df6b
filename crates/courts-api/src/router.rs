use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>, config: &ApiConfig) -> Router {
    let facilities = Router::new()
        .route("/facilities", post(handlers::create_facility).get(handlers::list_facilities))
        .route("/facilities/{id}", get(handlers::get_facility).put(handlers::replace_facility))
        .route("/nearby", post(handlers::find_nearby))
        .route("/nearby/geojson", post(handlers::find_nearby_geojson))
        .route("/health", get(handlers::health_check));

    Router::new()
        .route("/", get(handlers::service_info))
        .route("/health", get(handlers::health_check))
        .route("/health/ready", get(handlers::readiness_check))
        .nest(&config.facilities_prefix(), facilities)
        .with_state(state)
}

/// Apply tracing, request timeout and CORS
pub fn with_middleware(router: Router, config: &ApiConfig) -> Router {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    router
        .layer(cors)
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
