use serde::{Deserialize, Serialize};

use crate::error::{GeoError, Result};

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// A WGS 84 position in decimal degrees.
///
/// The only way to obtain a `Coordinate` is through [`Coordinate::new`] (or
/// deserialization, which goes through the same checks), so holding one is
/// proof that both components are finite and in range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

/// Unchecked wire shape used for deserialization
#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = GeoError;

    fn try_from(raw: RawCoordinate) -> Result<Self> {
        Coordinate::new(raw.latitude, raw.longitude)
    }
}

impl Coordinate {
    /// Create a coordinate, rejecting non-finite or out-of-range values
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let invalid = |reason: &str| GeoError::InvalidCoordinate {
            latitude,
            longitude,
            reason: reason.to_string(),
        };

        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(invalid("coordinates must be finite"));
        }

        if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude) {
            return Err(invalid("latitude must be within [-90, 90]"));
        }

        if !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
            return Err(invalid("longitude must be within [-180, 180]"));
        }

        Ok(Self { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Convert to a `geo::Point` (x = longitude, y = latitude)
    pub fn to_point(&self) -> geo::Point<f64> {
        geo::Point::new(self.longitude, self.latitude)
    }
}

impl From<Coordinate> for geo::Point<f64> {
    fn from(coordinate: Coordinate) -> Self {
        coordinate.to_point()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_accepts_bounds() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(matches!(
            Coordinate::new(90.0001, 0.0),
            Err(GeoError::InvalidCoordinate { .. })
        ));
        assert!(matches!(
            Coordinate::new(0.0, -180.0001),
            Err(GeoError::InvalidCoordinate { .. })
        ));
        assert!(Coordinate::new(999.0, 999.0).is_err());
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::NAN).is_err());
        assert!(Coordinate::new(f64::INFINITY, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_to_point_axis_order() {
        let ljubljana = Coordinate::new(46.0569, 14.5058).unwrap();
        let point = ljubljana.to_point();
        assert_eq!(point.x(), 14.5058);
        assert_eq!(point.y(), 46.0569);
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Coordinate =
            serde_json::from_str(r#"{"latitude": 46.0569, "longitude": 14.5058}"#).unwrap();
        assert_eq!(ok.latitude(), 46.0569);

        let bad = serde_json::from_str::<Coordinate>(r#"{"latitude": 999, "longitude": 0}"#);
        assert!(bad.is_err());
    }

    proptest! {
        #[test]
        fn prop_valid_coordinates_round_trip(lat in -90.0f64..=90.0, lon in -180.0f64..=180.0) {
            let c = Coordinate::new(lat, lon).unwrap();
            prop_assert!((c.latitude() - lat).abs() < 1e-9);
            prop_assert!((c.longitude() - lon).abs() < 1e-9);
        }

        #[test]
        fn prop_latitude_out_of_range_rejected(
            lat in prop_oneof![-1.0e6f64..-90.000_001, 90.000_001f64..1.0e6],
            lon in -180.0f64..=180.0,
        ) {
            let is_invalid = matches!(
                Coordinate::new(lat, lon),
                Err(GeoError::InvalidCoordinate { .. })
            );
            prop_assert!(is_invalid);
        }

        #[test]
        fn prop_longitude_out_of_range_rejected(
            lat in -90.0f64..=90.0,
            lon in prop_oneof![-1.0e6f64..-180.000_001, 180.000_001f64..1.0e6],
        ) {
            prop_assert!(Coordinate::new(lat, lon).is_err());
        }
    }
}
