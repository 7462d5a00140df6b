//! Great-circle distance on a spherical Earth
//!
//! Distances are computed with the haversine formula. The sphere radius is a
//! value rather than a global so callers can pick the model explicitly.

use std::f64::consts::{FRAC_PI_2, PI};

use geo::{coord, Rect};

use crate::coordinate::Coordinate;
use crate::error::{GeoError, Result};

/// Mean Earth radius in kilometers
pub const MEAN_EARTH_RADIUS_KM: f64 = 6371.0;

/// Slack added around search envelopes to absorb rounding at the boundary
const ENVELOPE_PADDING_DEG: f64 = 1e-7;

/// Haversine distance model on a sphere of a given radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreatCircle {
    earth_radius_km: f64,
}

impl Default for GreatCircle {
    fn default() -> Self {
        Self { earth_radius_km: MEAN_EARTH_RADIUS_KM }
    }
}

impl GreatCircle {
    pub fn new(earth_radius_km: f64) -> Result<Self> {
        if !earth_radius_km.is_finite() || earth_radius_km <= 0.0 {
            return Err(GeoError::InvalidEarthRadius(earth_radius_km));
        }
        Ok(Self { earth_radius_km })
    }

    pub fn earth_radius_km(&self) -> f64 {
        self.earth_radius_km
    }

    /// Great-circle distance between two coordinates in kilometers
    pub fn distance_km(&self, a: &Coordinate, b: &Coordinate) -> f64 {
        if a == b {
            return 0.0;
        }

        let lat_a = a.latitude().to_radians();
        let lat_b = b.latitude().to_radians();
        let d_lat = lat_b - lat_a;
        let d_lon = (b.longitude() - a.longitude()).to_radians();

        let h = (d_lat / 2.0).sin().powi(2)
            + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

        // h can drift above 1.0 for antipodal points
        2.0 * self.earth_radius_km * h.sqrt().min(1.0).asin()
    }

    /// Lat/lon rectangle containing every point within `radius_km` of `center`.
    ///
    /// The rectangle is expressed in degrees with x = longitude, y = latitude.
    /// When the circle reaches a pole or crosses the antimeridian the longitude
    /// range widens to [-180, 180] instead of wrapping.
    pub fn search_envelope(&self, center: &Coordinate, radius_km: f64) -> Rect<f64> {
        let angular = (radius_km.max(0.0) / self.earth_radius_km).min(PI);
        let lat = center.latitude().to_radians();
        let lon = center.longitude().to_radians();

        let mut min_lat = lat - angular;
        let mut max_lat = lat + angular;
        let (mut min_lon, mut max_lon) = (-PI, PI);

        if min_lat > -FRAC_PI_2 && max_lat < FRAC_PI_2 {
            let ratio = angular.sin() / lat.cos();
            if ratio < 1.0 {
                let delta_lon = ratio.asin();
                if lon - delta_lon >= -PI && lon + delta_lon <= PI {
                    min_lon = lon - delta_lon;
                    max_lon = lon + delta_lon;
                }
            }
        } else {
            min_lat = min_lat.max(-FRAC_PI_2);
            max_lat = max_lat.min(FRAC_PI_2);
        }

        Rect::new(
            coord! {
                x: (min_lon.to_degrees() - ENVELOPE_PADDING_DEG).max(-180.0),
                y: (min_lat.to_degrees() - ENVELOPE_PADDING_DEG).max(-90.0),
            },
            coord! {
                x: (max_lon.to_degrees() + ENVELOPE_PADDING_DEG).min(180.0),
                y: (max_lat.to_degrees() + ENVELOPE_PADDING_DEG).min(90.0),
            },
        )
    }
}

/// Great-circle distance in kilometers using the mean Earth radius
pub fn distance_km(a: &Coordinate, b: &Coordinate) -> f64 {
    GreatCircle::default().distance_km(a, b)
}
