//! Request validation
//!
//! Turns untrusted input into domain types before anything touches a store.
//! Rules are checked in order and the first failure is reported.

use courts_geo::Coordinate;
use uuid::Uuid;

use crate::error::{CourtsError, Result};
use crate::models::{FacilityId, NearbySearchQuery, NewFacility};

/// Default ceiling for nearby-search radius in kilometers
pub const DEFAULT_MAX_RADIUS_KM: f64 = 50.0;

/// Bounds applied to nearby searches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchLimits {
    pub max_radius_km: f64,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self { max_radius_km: DEFAULT_MAX_RADIUS_KM }
    }
}

/// Raw facility fields as received from a caller
#[derive(Debug, Clone, Default)]
pub struct FacilityInput {
    pub owner_id: Option<Uuid>,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address_line: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub image: Option<String>,
}

/// Raw nearby-search fields as received from a caller
#[derive(Debug, Clone, Copy, Default)]
pub struct NearbyInput {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius_km: Option<f64>,
}

/// Validator for inbound requests
#[derive(Debug, Clone, Default)]
pub struct RequestValidator {
    limits: SearchLimits,
}

impl RequestValidator {
    pub fn new(limits: SearchLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &SearchLimits {
        &self.limits
    }

    /// Validate a nearby search: coordinates first, then radius
    pub fn validate_nearby_query(
        &self,
        latitude: Option<f64>,
        longitude: Option<f64>,
        radius_km: Option<f64>,
    ) -> Result<NearbySearchQuery> {
        let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
            return Err(CourtsError::InvalidCoordinate {
                reason: "latitude and longitude are required".to_string(),
            });
        };
        let center = Coordinate::new(latitude, longitude)?;

        let radius_km = radius_km.ok_or_else(|| CourtsError::InvalidRadius {
            reason: "radius_km is required".to_string(),
        })?;

        NearbySearchQuery::new(center, radius_km, &self.limits)
    }

    /// Convenience wrapper over [`Self::validate_nearby_query`]
    pub fn validate_nearby_input(&self, input: NearbyInput) -> Result<NearbySearchQuery> {
        self.validate_nearby_query(input.latitude, input.longitude, input.radius_km)
    }

    /// Validate a facility creation or replacement request
    pub fn validate_facility_creation(&self, input: FacilityInput) -> Result<NewFacility> {
        let name = input
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| CourtsError::validation("name", "name is required"))?;

        let location = match (input.latitude, input.longitude) {
            (Some(latitude), Some(longitude)) => Coordinate::new(latitude, longitude)?,
            (None, None) => return Err(CourtsError::validation("location", "location is required")),
            _ => {
                return Err(CourtsError::validation(
                    "location",
                    "latitude and longitude are both required",
                ))
            }
        };

        let facility = NewFacility::new(
            name,
            location,
            input.address_line,
            input.city,
            input.country,
            input.image,
        )?;

        Ok(facility.with_owner(input.owner_id))
    }

    /// Parse a facility identifier, distinguishing malformed ids from absent ones
    pub fn validate_identifier(&self, raw: &str) -> Result<FacilityId> {
        raw.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn validator() -> RequestValidator {
        RequestValidator::default()
    }

    fn court_input() -> FacilityInput {
        FacilityInput {
            name: Some("Test Basketball Court".to_string()),
            latitude: Some(46.0569),
            longitude: Some(14.5058),
            address_line: Some("Kongresni trg 12".to_string()),
            city: Some("Ljubljana".to_string()),
            country: Some("Slovenia".to_string()),
            image: Some("https://example.com/court.jpg".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_nearby_query() {
        let query = validator().validate_nearby_query(Some(46.0569), Some(14.5058), Some(10.0));
        let query = query.unwrap();
        assert_eq!(query.center().latitude(), 46.0569);
        assert_eq!(query.radius_km(), 10.0);
    }

    #[test]
    fn test_out_of_range_coordinates_rejected() {
        let err = validator().validate_nearby_query(Some(999.0), Some(999.0), Some(10.0));
        assert!(matches!(err, Err(CourtsError::InvalidCoordinate { .. })));
    }

    #[test]
    fn test_coordinate_checked_before_radius() {
        let err = validator().validate_nearby_query(Some(999.0), Some(0.0), Some(-5.0));
        assert!(matches!(err, Err(CourtsError::InvalidCoordinate { .. })));
    }

    #[test]
    fn test_missing_fields() {
        let v = validator();
        assert!(matches!(
            v.validate_nearby_query(None, Some(14.5), Some(10.0)),
            Err(CourtsError::InvalidCoordinate { .. })
        ));
        assert!(matches!(
            v.validate_nearby_query(Some(46.0), Some(14.5), None),
            Err(CourtsError::InvalidRadius { .. })
        ));
    }

    #[test]
    fn test_radius_ceiling() {
        let v = validator();
        assert!(v.validate_nearby_query(Some(46.0569), Some(14.5058), Some(50.0)).is_ok());
        assert!(matches!(
            v.validate_nearby_query(Some(46.0569), Some(14.5058), Some(51.0)),
            Err(CourtsError::InvalidRadius { .. })
        ));
    }

    #[test]
    fn test_valid_facility_creation() {
        let owner = Uuid::new_v4();
        let input = FacilityInput { owner_id: Some(owner), ..court_input() };
        let facility = validator().validate_facility_creation(input).unwrap();
        assert_eq!(facility.name(), "Test Basketball Court");
        assert_eq!(facility.owner_id(), Some(owner));
        assert_eq!(facility.location().longitude(), 14.5058);
    }

    #[test]
    fn test_facility_creation_missing_location() {
        let input = FacilityInput {
            name: Some("Invalid Court".to_string()),
            city: Some("Ljubljana".to_string()),
            ..Default::default()
        };
        match validator().validate_facility_creation(input) {
            Err(CourtsError::Validation { field, .. }) => assert_eq!(field, "location"),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_facility_creation_half_location() {
        let input = FacilityInput { longitude: None, ..court_input() };
        assert!(matches!(
            validator().validate_facility_creation(input),
            Err(CourtsError::Validation { .. })
        ));
    }

    #[test]
    fn test_facility_creation_missing_name() {
        for name in [None, Some("   ".to_string())] {
            let input = FacilityInput { name, ..court_input() };
            match validator().validate_facility_creation(input) {
                Err(CourtsError::Validation { field, .. }) => assert_eq!(field, "name"),
                other => panic!("Expected Validation error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_facility_creation_bad_coordinate() {
        let input = FacilityInput { latitude: Some(91.0), ..court_input() };
        assert!(matches!(
            validator().validate_facility_creation(input),
            Err(CourtsError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_optional_fields_pass_through() {
        let input = FacilityInput {
            name: Some("Bare Court".to_string()),
            latitude: Some(0.0),
            longitude: Some(0.0),
            ..Default::default()
        };
        let facility = validator().validate_facility_creation(input).unwrap();
        assert_eq!(facility.address_line(), None);
        assert_eq!(facility.image(), None);
    }

    #[test]
    fn test_validate_identifier() {
        let v = validator();
        assert!(matches!(
            v.validate_identifier("invalid-id-123"),
            Err(CourtsError::InvalidIdentifier { .. })
        ));
        assert!(v.validate_identifier("6f1c2a9e-3b4d-4e5f-8a7b-9c0d1e2f3a4b").is_ok());
    }

    proptest! {
        #[test]
        fn prop_radius_in_range_accepted(radius in 0.000_001f64..=50.0) {
            let query = validator().validate_nearby_query(Some(0.0), Some(0.0), Some(radius));
            prop_assert!(query.is_ok());
        }

        #[test]
        fn prop_radius_out_of_range_rejected(
            radius in prop_oneof![-1.0e6f64..=0.0, 50.000_001f64..1.0e6],
        ) {
            let query = validator().validate_nearby_query(Some(0.0), Some(0.0), Some(radius));
            let is_invalid_radius = matches!(query, Err(CourtsError::InvalidRadius { .. }));
            prop_assert!(is_invalid_radius);
        }
    }
}
