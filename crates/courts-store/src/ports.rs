use async_trait::async_trait;
use courts_core::error::Result;
use courts_core::models::{Facility, FacilityId, NewFacility};
use courts_geo::Coordinate;

/// Port for facility persistence
///
/// Stores are the only place identifiers and creation timestamps are minted.
/// Any failure to reach the backing storage is reported as
/// `CourtsError::StoreUnavailable`.
#[async_trait]
pub trait FacilityStore: Send + Sync {
    /// Persist a new facility, assigning its identifier and creation time
    async fn insert_facility(&self, facility: &NewFacility) -> Result<Facility>;

    /// Retrieve a facility by ID
    async fn get_facility(&self, id: FacilityId) -> Result<Option<Facility>>;

    /// List all facilities, oldest first
    async fn list_facilities(&self) -> Result<Vec<Facility>>;

    /// Replace the stored fields of a facility, keeping its identity.
    /// Returns `None` when no facility has this ID.
    async fn replace_facility(
        &self,
        id: FacilityId,
        details: &NewFacility,
    ) -> Result<Option<Facility>>;

    /// Facilities that may lie within `radius_km` of `center`.
    ///
    /// Evaluated with the store's native spatial predicate. The result may
    /// include facilities slightly outside the radius but must never omit one
    /// inside it.
    async fn find_within_radius(&self, center: Coordinate, radius_km: f64)
        -> Result<Vec<Facility>>;

    /// Check that the store is reachable
    async fn health_check(&self) -> Result<()>;
}
