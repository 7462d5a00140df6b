//! Court Service Geo - Coordinates and great-circle math
//!
//! This crate has no knowledge of facilities. It validates WGS 84 positions
//! and measures distances between them on a spherical Earth.

pub mod coordinate;
pub mod distance;
pub mod error;

pub use coordinate::Coordinate;
pub use distance::{distance_km, GreatCircle, MEAN_EARTH_RADIUS_KM};
pub use error::{GeoError, Result};
