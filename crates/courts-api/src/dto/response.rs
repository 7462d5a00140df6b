use chrono::{DateTime, Utc};
use courts_core::models::{Facility, FacilityId, NearbyResult, NearbySearchQuery};
use serde::Serialize;
use uuid::Uuid;

/// Facility location details
#[derive(Debug, Serialize)]
pub struct FacilityLocation {
    pub latitude: f64,
    pub longitude: f64,
}

/// Facility as returned by the API
#[derive(Debug, Serialize)]
pub struct FacilityResponse {
    pub id: FacilityId,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub location: FacilityLocation,
    pub address_line: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl FacilityResponse {
    pub fn with_distance(mut self, distance_km: f64) -> Self {
        self.distance_km = Some(distance_km);
        self
    }
}

impl From<&Facility> for FacilityResponse {
    fn from(facility: &Facility) -> Self {
        let location = facility.location();
        Self {
            id: facility.id(),
            user_id: facility.owner_id(),
            name: facility.name().to_string(),
            location: FacilityLocation {
                latitude: location.latitude(),
                longitude: location.longitude(),
            },
            address_line: facility.address_line().map(str::to_string),
            city: facility.city().map(str::to_string),
            country: facility.country().map(str::to_string),
            image: facility.image().map(str::to_string),
            created_at: facility.created_at(),
            distance_km: None,
        }
    }
}

/// Echo of the validated search parameters
#[derive(Debug, Serialize)]
pub struct SearchLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
}

impl From<&NearbySearchQuery> for SearchLocation {
    fn from(query: &NearbySearchQuery) -> Self {
        Self {
            latitude: query.center().latitude(),
            longitude: query.center().longitude(),
            radius_km: query.radius_km(),
        }
    }
}

/// Nearby search response
#[derive(Debug, Serialize)]
pub struct NearbyCourtsResponse {
    pub courts: Vec<FacilityResponse>,
    pub total_count: usize,
    pub search_location: SearchLocation,
}

impl NearbyCourtsResponse {
    pub fn new(query: &NearbySearchQuery, result: &NearbyResult) -> Self {
        let courts: Vec<FacilityResponse> = result
            .iter()
            .map(|m| FacilityResponse::from(&m.facility).with_distance(m.distance_km))
            .collect();

        Self { total_count: courts.len(), courts, search_location: SearchLocation::from(query) }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self { status: "healthy", service: "court-service" }
    }
}

/// Root endpoint response
#[derive(Debug, Serialize)]
pub struct ServiceInfoResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub status: &'static str,
}

impl Default for ServiceInfoResponse {
    fn default() -> Self {
        Self { service: "Court Service API", version: env!("CARGO_PKG_VERSION"), status: "running" }
    }
}

/// Readiness check response
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub store: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
