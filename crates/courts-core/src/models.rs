pub mod facility;
pub mod query;

pub use facility::{Facility, FacilityId, NewFacility};
pub use query::{NearbyMatch, NearbyResult, NearbySearchQuery};
