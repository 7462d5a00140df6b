//! Error types for the Court Service

use courts_geo::GeoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CourtsError {
    // Input errors
    #[error("Invalid coordinate: {reason}")]
    InvalidCoordinate { reason: String },

    #[error("Invalid radius: {reason}")]
    InvalidRadius { reason: String },

    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    // Lookup errors
    #[error("Facility not found: {id}")]
    NotFound { id: String },

    #[error("Invalid facility identifier '{value}': expected a UUID")]
    InvalidIdentifier { value: String },

    // Store errors
    #[error("Persistence store unavailable: {0}")]
    StoreUnavailable(String),

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },
}

impl CourtsError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), reason: reason.into() }
    }

    pub fn store_unavailable(context: impl std::fmt::Display) -> Self {
        Self::StoreUnavailable(context.to_string())
    }

    /// Stable machine-readable code for this error kind
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidCoordinate { .. } => "invalid_coordinate",
            Self::InvalidRadius { .. } => "invalid_radius",
            Self::Validation { .. } => "validation_error",
            Self::NotFound { .. } => "not_found",
            Self::InvalidIdentifier { .. } => "invalid_identifier",
            Self::StoreUnavailable(_) => "store_unavailable",
            Self::ConfigInvalid { .. } => "internal",
        }
    }

    /// True for errors caused by the caller's input
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidCoordinate { .. } | Self::InvalidRadius { .. } | Self::Validation { .. }
        )
    }
}

impl From<GeoError> for CourtsError {
    fn from(err: GeoError) -> Self {
        match &err {
            GeoError::InvalidCoordinate { .. } => Self::InvalidCoordinate { reason: err.to_string() },
            GeoError::InvalidEarthRadius(_) => {
                Self::ConfigInvalid { key: "earth_radius_km".to_string(), reason: err.to_string() }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CourtsError>;
