mod facility;
mod features;

pub use facility::FacilityService;
pub use features::nearby_to_geojson;
