use courts_core::validation::{FacilityInput, NearbyInput};
use serde::Deserialize;
use uuid::Uuid;

/// Latitude/longitude pair in a request body
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LocationBody {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Body for creating or replacing a facility
#[derive(Debug, Deserialize)]
pub struct FacilityRequest {
    pub user_id: Option<Uuid>,
    pub name: Option<String>,
    pub location: Option<LocationBody>,
    pub address_line: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub image: Option<String>,
}

impl From<FacilityRequest> for FacilityInput {
    fn from(request: FacilityRequest) -> Self {
        Self {
            owner_id: request.user_id,
            name: request.name,
            latitude: request.location.and_then(|l| l.latitude),
            longitude: request.location.and_then(|l| l.longitude),
            address_line: request.address_line,
            city: request.city,
            country: request.country,
            image: request.image,
        }
    }
}

/// Nearby search request body
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct NearbyRequest {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius_km: Option<f64>,
}

impl From<NearbyRequest> for NearbyInput {
    fn from(request: NearbyRequest) -> Self {
        Self {
            latitude: request.latitude,
            longitude: request.longitude,
            radius_km: request.radius_km,
        }
    }
}
