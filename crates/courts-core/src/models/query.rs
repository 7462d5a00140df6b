use courts_geo::Coordinate;

use super::Facility;
use crate::error::{CourtsError, Result};
use crate::validation::SearchLimits;

/// A well-formed "facilities within radius" request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbySearchQuery {
    center: Coordinate,
    radius_km: f64,
}

impl NearbySearchQuery {
    /// Create a query, enforcing radius ∈ (0, limits.max_radius_km]
    pub fn new(center: Coordinate, radius_km: f64, limits: &SearchLimits) -> Result<Self> {
        if !radius_km.is_finite() {
            return Err(CourtsError::InvalidRadius {
                reason: format!("radius_km must be finite, got {}", radius_km),
            });
        }

        if radius_km <= 0.0 {
            return Err(CourtsError::InvalidRadius {
                reason: format!("radius_km must be greater than 0, got {}", radius_km),
            });
        }

        if radius_km > limits.max_radius_km {
            return Err(CourtsError::InvalidRadius {
                reason: format!(
                    "radius_km must be at most {}, got {}",
                    limits.max_radius_km, radius_km
                ),
            });
        }

        Ok(Self { center, radius_km })
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }
}

/// A facility paired with its distance from the search center
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyMatch {
    pub facility: Facility,
    pub distance_km: f64,
}

/// Facilities within the search radius, nearest first.
///
/// Ties on distance are ordered by facility identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NearbyResult {
    matches: Vec<NearbyMatch>,
}

impl NearbyResult {
    /// Wrap matches that are already in (distance, id) order
    pub fn from_ordered(matches: Vec<NearbyMatch>) -> Self {
        debug_assert!(matches.windows(2).all(|w| {
            w[0].distance_km < w[1].distance_km
                || (w[0].distance_km == w[1].distance_km
                    && w[0].facility.id() <= w[1].facility.id())
        }));
        Self { matches }
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn matches(&self) -> &[NearbyMatch] {
        &self.matches
    }

    pub fn iter(&self) -> impl Iterator<Item = &NearbyMatch> {
        self.matches.iter()
    }

    pub fn into_matches(self) -> Vec<NearbyMatch> {
        self.matches
    }
}

impl IntoIterator for NearbyResult {
    type Item = NearbyMatch;
    type IntoIter = std::vec::IntoIter<NearbyMatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.into_iter()
    }
}
