//! Error types for geo primitives

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error("Invalid coordinate ({latitude}, {longitude}): {reason}")]
    InvalidCoordinate {
        latitude: f64,
        longitude: f64,
        reason: String,
    },

    #[error("Invalid earth radius {0} km: must be finite and positive")]
    InvalidEarthRadius(f64),
}

pub type Result<T> = std::result::Result<T, GeoError>;
