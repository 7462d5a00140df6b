use geojson::{feature::Id, Feature, FeatureCollection, Geometry, Value};
use serde_json::{Map, Value as JsonValue};

use courts_core::models::{NearbyMatch, NearbyResult};

use crate::dto::FacilityResponse;
use crate::error::ApiError;

/// Convert nearby results to a FeatureCollection of Point features.
///
/// Feature order follows the result order; properties carry the facility
/// fields plus `distance_km`.
pub fn nearby_to_geojson(result: &NearbyResult) -> Result<FeatureCollection, ApiError> {
    let features = result.iter().map(match_to_feature).collect::<Result<Vec<_>, _>>()?;

    Ok(FeatureCollection { features, bbox: None, foreign_members: None })
}

fn match_to_feature(found: &NearbyMatch) -> Result<Feature, ApiError> {
    let location = found.facility.location();
    let geometry = Geometry::new(Value::Point(vec![location.longitude(), location.latitude()]));

    let response = FacilityResponse::from(&found.facility).with_distance(found.distance_km);
    let mut properties = match serde_json::to_value(response) {
        Ok(JsonValue::Object(map)) => map,
        Ok(_) => Map::new(),
        Err(e) => {
            return Err(ApiError::internal("Failed to encode feature").with_details(e.to_string()))
        }
    };
    properties.remove("location");

    Ok(Feature {
        geometry: Some(geometry),
        properties: Some(properties),
        id: Some(Id::String(found.facility.id().to_string())),
        bbox: None,
        foreign_members: None,
    })
}
