use async_trait::async_trait;
use courts_core::config::CandidateStrategy;
use courts_core::error::Result;
use courts_core::models::Facility;
use courts_geo::Coordinate;
use courts_store::FacilityStore;
use std::sync::Arc;

/// Supplies the facilities a nearby search has to consider.
///
/// A source may return facilities outside the radius; the engine filters
/// them. It must never leave out one that lies inside.
#[async_trait]
pub trait SpatialCandidateSource: Send + Sync {
    async fn candidates_within(&self, center: Coordinate, radius_km: f64)
        -> Result<Vec<Facility>>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// Candidates from the store's own spatial predicate
pub struct StorePredicateSource {
    store: Arc<dyn FacilityStore>,
}

impl StorePredicateSource {
    pub fn new(store: Arc<dyn FacilityStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SpatialCandidateSource for StorePredicateSource {
    async fn candidates_within(
        &self,
        center: Coordinate,
        radius_km: f64,
    ) -> Result<Vec<Facility>> {
        self.store.find_within_radius(center, radius_km).await
    }

    fn name(&self) -> &'static str {
        "store_predicate"
    }
}

/// Every stored facility is a candidate
pub struct FullScanSource {
    store: Arc<dyn FacilityStore>,
}

impl FullScanSource {
    pub fn new(store: Arc<dyn FacilityStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SpatialCandidateSource for FullScanSource {
    async fn candidates_within(
        &self,
        _center: Coordinate,
        _radius_km: f64,
    ) -> Result<Vec<Facility>> {
        self.store.list_facilities().await
    }

    fn name(&self) -> &'static str {
        "full_scan"
    }
}

/// Build the candidate source selected by configuration
pub fn candidate_source(
    strategy: CandidateStrategy,
    store: Arc<dyn FacilityStore>,
) -> Arc<dyn SpatialCandidateSource> {
    match strategy {
        CandidateStrategy::StorePredicate => Arc::new(StorePredicateSource::new(store)),
        CandidateStrategy::FullScan => Arc::new(FullScanSource::new(store)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courts_core::models::NewFacility;
    use courts_store::MemoryFacilityStore;

    async fn seeded_store() -> Arc<dyn FacilityStore> {
        let store = MemoryFacilityStore::new();
        for (name, lat, lon) in
            [("Tivoli", 46.0569, 14.5058), ("Kranj", 46.2389, 14.3556), ("Koper", 45.5481, 13.7302)]
        {
            let facility =
                NewFacility::new(name, Coordinate::new(lat, lon).unwrap(), None, None, None, None)
                    .unwrap();
            store.insert_facility(&facility).await.unwrap();
        }
        Arc::new(store)
    }

    #[tokio::test]
    async fn test_candidate_source_follows_strategy() {
        let store = seeded_store().await;

        let predicate = candidate_source(CandidateStrategy::StorePredicate, store.clone());
        let scan = candidate_source(CandidateStrategy::FullScan, store);

        assert_eq!(predicate.name(), "store_predicate");
        assert_eq!(scan.name(), "full_scan");
    }

    #[tokio::test]
    async fn test_full_scan_returns_everything() {
        let store = seeded_store().await;
        let source = FullScanSource::new(store);

        let center = Coordinate::new(46.0569, 14.5058).unwrap();
        let candidates = source.candidates_within(center, 1.0).await.unwrap();

        assert_eq!(candidates.len(), 3);
    }

    #[tokio::test]
    async fn test_store_predicate_narrows_candidates() {
        let store = seeded_store().await;
        let source = StorePredicateSource::new(store);

        let center = Coordinate::new(46.0569, 14.5058).unwrap();
        let candidates = source.candidates_within(center, 1.0).await.unwrap();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name(), "Tivoli");
    }
}
