use courts_core::error::Result;
use courts_core::models::{NearbyMatch, NearbyResult, NearbySearchQuery};
use courts_geo::GreatCircle;
use std::sync::Arc;

use crate::source::SpatialCandidateSource;

/// Answers "facilities within radius R of point P", nearest first
pub struct SpatialQueryEngine {
    source: Arc<dyn SpatialCandidateSource>,
    model: GreatCircle,
}

impl SpatialQueryEngine {
    /// Create an engine measuring distance with `model`
    pub fn new(source: Arc<dyn SpatialCandidateSource>, model: GreatCircle) -> Self {
        Self { source, model }
    }

    pub fn model(&self) -> &GreatCircle {
        &self.model
    }

    /// Run a nearby search.
    ///
    /// Keeps candidates whose distance is at most the query radius, ordered by
    /// distance and then facility identifier. A store failure aborts the whole
    /// search; no partial result is returned.
    pub async fn find_nearby(&self, query: &NearbySearchQuery) -> Result<NearbyResult> {
        let center = query.center();
        let radius_km = query.radius_km();

        let candidates = self.source.candidates_within(center, radius_km).await.map_err(|e| {
            tracing::error!(
                error = %e,
                source = self.source.name(),
                "Failed to fetch nearby candidates"
            );
            e
        })?;
        let candidate_count = candidates.len();

        let mut matches: Vec<NearbyMatch> = candidates
            .into_iter()
            .filter_map(|facility| {
                let distance_km = self.model.distance_km(&center, &facility.location());
                (distance_km <= radius_km).then_some(NearbyMatch { facility, distance_km })
            })
            .collect();

        matches.sort_by(|a, b| {
            a.distance_km
                .total_cmp(&b.distance_km)
                .then_with(|| a.facility.id().cmp(&b.facility.id()))
        });

        tracing::info!(
            latitude = center.latitude(),
            longitude = center.longitude(),
            radius_km,
            source = self.source.name(),
            candidates = candidate_count,
            matches = matches.len(),
            "Nearby search completed"
        );

        Ok(NearbyResult::from_ordered(matches))
    }
}
