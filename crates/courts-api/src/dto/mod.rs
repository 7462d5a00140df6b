mod request;
mod response;

pub use request::{FacilityRequest, LocationBody, NearbyRequest};
pub use response::{
    FacilityLocation, FacilityResponse, HealthResponse, NearbyCourtsResponse, ReadinessResponse,
    SearchLocation, ServiceInfoResponse,
};
