mod facilities;
mod health;
mod nearby;

pub use facilities::{create_facility, get_facility, list_facilities, replace_facility};
pub use health::{health_check, readiness_check, service_info};
pub use nearby::{find_nearby, find_nearby_geojson};

use courts_core::error::CourtsError;

/// Log a failed operation; caller mistakes are not server errors
fn log_failure(err: &CourtsError, action: &'static str) {
    match err {
        CourtsError::StoreUnavailable(_) | CourtsError::ConfigInvalid { .. } => {
            tracing::error!(error = %err, action, "Request failed")
        }
        _ => tracing::warn!(error = %err, code = err.code(), action, "Request rejected"),
    }
}
