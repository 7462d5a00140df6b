use chrono::{DateTime, Utc};
use courts_geo::Coordinate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{CourtsError, Result};

/// Unique identifier for a facility, assigned by the persistence store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacilityId(pub Uuid);

impl FromStr for FacilityId {
    type Err = CourtsError;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s)
            .map(FacilityId)
            .map_err(|_| CourtsError::InvalidIdentifier { value: s.to_string() })
    }
}

impl fmt::Display for FacilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A validated facility that has not been persisted yet.
///
/// Carries no identifier and no timestamp; both are assigned by the store
/// when the record is accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFacility {
    owner_id: Option<Uuid>,
    name: String,
    location: Coordinate,
    address_line: Option<String>,
    city: Option<String>,
    country: Option<String>,
    image: Option<String>,
}

impl NewFacility {
    /// Create a facility draft. Fails when the name is empty or blank.
    pub fn new(
        name: impl Into<String>,
        location: Coordinate,
        address_line: Option<String>,
        city: Option<String>,
        country: Option<String>,
        image: Option<String>,
    ) -> Result<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(CourtsError::validation("name", "must not be empty"));
        }

        Ok(Self {
            owner_id: None,
            name,
            location,
            address_line: non_blank(address_line),
            city: non_blank(city),
            country: non_blank(country),
            image: non_blank(image),
        })
    }

    /// Attach the owner reference
    pub fn with_owner(mut self, owner_id: Option<Uuid>) -> Self {
        self.owner_id = owner_id;
        self
    }

    pub fn owner_id(&self) -> Option<Uuid> {
        self.owner_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> Coordinate {
        self.location
    }

    pub fn address_line(&self) -> Option<&str> {
        self.address_line.as_deref()
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }
}

/// A persisted sports facility
#[derive(Debug, Clone, PartialEq)]
pub struct Facility {
    id: FacilityId,
    created_at: DateTime<Utc>,
    details: NewFacility,
}

impl Facility {
    /// Combine a validated draft with the identity assigned by a store
    pub fn from_new(id: FacilityId, created_at: DateTime<Utc>, details: NewFacility) -> Self {
        Self { id, created_at, details }
    }

    /// Replacement record for an update.
    ///
    /// Identity, owner and creation time survive; everything else comes from
    /// `details`.
    pub fn replaced_with(&self, details: NewFacility) -> Self {
        Self {
            id: self.id,
            created_at: self.created_at,
            details: details.with_owner(self.details.owner_id),
        }
    }

    pub fn id(&self) -> FacilityId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn details(&self) -> &NewFacility {
        &self.details
    }

    pub fn owner_id(&self) -> Option<Uuid> {
        self.details.owner_id
    }

    pub fn name(&self) -> &str {
        &self.details.name
    }

    pub fn location(&self) -> Coordinate {
        self.details.location
    }

    pub fn address_line(&self) -> Option<&str> {
        self.details.address_line()
    }

    pub fn city(&self) -> Option<&str> {
        self.details.city()
    }

    pub fn country(&self) -> Option<&str> {
        self.details.country()
    }

    pub fn image(&self) -> Option<&str> {
        self.details.image()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ljubljana() -> Coordinate {
        Coordinate::new(46.0569, 14.5058).unwrap()
    }

    fn draft(name: &str) -> Result<NewFacility> {
        NewFacility::new(
            name,
            ljubljana(),
            Some("Kongresni trg 12".to_string()),
            Some("Ljubljana".to_string()),
            Some("Slovenia".to_string()),
            None,
        )
    }

    #[test]
    fn test_new_facility_trims_name() {
        let facility = draft("  Test Basketball Court ").unwrap();
        assert_eq!(facility.name(), "Test Basketball Court");
        assert_eq!(facility.city(), Some("Ljubljana"));
    }

    #[test]
    fn test_new_facility_rejects_blank_name() {
        for name in ["", "   ", "\t\n"] {
            match draft(name) {
                Err(CourtsError::Validation { field, .. }) => assert_eq!(field, "name"),
                other => panic!("Expected Validation error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_blank_optional_fields_become_none() {
        let facility = NewFacility::new(
            "Court",
            ljubljana(),
            Some("  ".to_string()),
            None,
            Some(String::new()),
            Some(" https://example.com/court.jpg ".to_string()),
        )
        .unwrap();
        assert_eq!(facility.address_line(), None);
        assert_eq!(facility.country(), None);
        assert_eq!(facility.image(), Some("https://example.com/court.jpg"));
    }

    #[test]
    fn test_replaced_with_keeps_identity_and_owner() {
        let owner = Uuid::new_v4();
        let id = FacilityId(Uuid::new_v4());
        let created_at = Utc::now();
        let original =
            Facility::from_new(id, created_at, draft("Old name").unwrap().with_owner(Some(owner)));

        let replacement = original.replaced_with(draft("New name").unwrap());

        assert_eq!(replacement.id(), id);
        assert_eq!(replacement.created_at(), created_at);
        assert_eq!(replacement.owner_id(), Some(owner));
        assert_eq!(replacement.name(), "New name");
    }

    #[test]
    fn test_facility_id_parse() {
        let uuid = Uuid::new_v4();
        let parsed: FacilityId = uuid.to_string().parse().unwrap();
        assert_eq!(parsed, FacilityId(uuid));
        assert_eq!(parsed.to_string(), uuid.to_string());
    }

    #[test]
    fn test_facility_id_parse_malformed() {
        let err = "invalid-id-123".parse::<FacilityId>().unwrap_err();
        match err {
            CourtsError::InvalidIdentifier { value } => assert_eq!(value, "invalid-id-123"),
            other => panic!("Expected InvalidIdentifier, got {:?}", other),
        }
    }

    #[test]
    fn test_facility_id_parse_rejects_padding() {
        let padded = format!(" {} ", Uuid::new_v4());
        let err = padded.parse::<FacilityId>().unwrap_err();
        match err {
            CourtsError::InvalidIdentifier { value } => assert_eq!(value, padded),
            other => panic!("Expected InvalidIdentifier, got {:?}", other),
        }
    }
}
