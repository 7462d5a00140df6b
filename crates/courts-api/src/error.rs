use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use courts_core::error::CourtsError;
use serde::Serialize;

/// Unified API error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self { status, code, message: message.into(), details: None }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_identifier", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", message)
    }

    pub fn unprocessable(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, code, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, "store_unavailable", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal", message)
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { error: self.message, code: self.code, details: self.details };
        (self.status, Json(body)).into_response()
    }
}

impl From<CourtsError> for ApiError {
    fn from(err: CourtsError) -> Self {
        match &err {
            CourtsError::InvalidCoordinate { .. }
            | CourtsError::InvalidRadius { .. }
            | CourtsError::Validation { .. } => Self::unprocessable(err.code(), err.to_string()),
            CourtsError::InvalidIdentifier { .. } => Self::bad_request(err.to_string()),
            CourtsError::NotFound { .. } => Self::not_found(err.to_string()),
            CourtsError::StoreUnavailable(_) => {
                Self::service_unavailable("Persistence store unavailable")
                    .with_details(err.to_string())
            }
            _ => Self::internal("Internal error").with_details(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), "validation_error", "Invalid request body")
            .with_details(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_unprocessable() {
        let err: ApiError = CourtsError::InvalidRadius { reason: "too big".to_string() }.into();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.code, "invalid_radius");

        let err: ApiError = CourtsError::validation("name", "name is required").into();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.code, "validation_error");
    }

    #[test]
    fn test_malformed_and_missing_ids_differ() {
        let malformed: ApiError =
            CourtsError::InvalidIdentifier { value: "invalid-id-123".to_string() }.into();
        let missing: ApiError = CourtsError::NotFound { id: "x".to_string() }.into();

        assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
        assert_eq!(malformed.code, "invalid_identifier");
        assert_eq!(missing.status, StatusCode::NOT_FOUND);
        assert_eq!(missing.code, "not_found");
    }

    #[test]
    fn test_store_failure_is_unavailable() {
        let err: ApiError = CourtsError::store_unavailable("connection refused").into();
        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.code, "store_unavailable");
        assert!(err.details.unwrap().contains("connection refused"));
    }

    #[test]
    fn test_config_errors_are_internal() {
        let err: ApiError = CourtsError::ConfigInvalid {
            key: "earth_radius_km".to_string(),
            reason: "must be positive".to_string(),
        }
        .into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code, "internal");
    }
}
