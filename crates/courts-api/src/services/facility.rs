use std::sync::Arc;

use courts_core::config::SearchConfig;
use courts_core::error::{CourtsError, Result};
use courts_core::models::{Facility, NearbyResult, NearbySearchQuery};
use courts_core::validation::{FacilityInput, NearbyInput, RequestValidator};
use courts_search::{candidate_source, SpatialQueryEngine};
use courts_store::FacilityStore;

/// Facade over validation, persistence and nearby search
pub struct FacilityService {
    store: Arc<dyn FacilityStore>,
    validator: RequestValidator,
    engine: SpatialQueryEngine,
}

impl FacilityService {
    pub fn new(store: Arc<dyn FacilityStore>, config: &SearchConfig) -> Result<Self> {
        let source = candidate_source(config.strategy(), store.clone());
        let engine = SpatialQueryEngine::new(source, config.great_circle()?);

        Ok(Self { store, validator: RequestValidator::new(config.limits()), engine })
    }

    pub fn validator(&self) -> &RequestValidator {
        &self.validator
    }

    /// Validate and persist a new facility
    pub async fn create_facility(&self, input: FacilityInput) -> Result<Facility> {
        let draft = self.validator.validate_facility_creation(input)?;
        let facility = self.store.insert_facility(&draft).await?;

        tracing::info!(facility_id = %facility.id(), name = %facility.name(), "Created facility");
        Ok(facility)
    }

    /// Look up a facility by its raw identifier
    pub async fn get_facility(&self, raw_id: &str) -> Result<Facility> {
        let id = self.validator.validate_identifier(raw_id)?;

        self.store
            .get_facility(id)
            .await?
            .ok_or_else(|| CourtsError::NotFound { id: id.to_string() })
    }

    /// All facilities, oldest first
    pub async fn list_facilities(&self) -> Result<Vec<Facility>> {
        self.store.list_facilities().await
    }

    /// Replace a facility's fields, keeping its identity, owner and creation time
    pub async fn replace_facility(&self, raw_id: &str, input: FacilityInput) -> Result<Facility> {
        let id = self.validator.validate_identifier(raw_id)?;
        let draft = self.validator.validate_facility_creation(input)?;

        let facility = self
            .store
            .replace_facility(id, &draft)
            .await?
            .ok_or_else(|| CourtsError::NotFound { id: id.to_string() })?;

        tracing::info!(facility_id = %id, "Replaced facility");
        Ok(facility)
    }

    /// Facilities within the requested radius, nearest first
    pub async fn find_nearby(&self, input: NearbyInput) -> Result<NearbyResult> {
        self.search_nearby(input).await.map(|(_, result)| result)
    }

    /// Like [`Self::find_nearby`], also returning the validated query
    pub async fn search_nearby(
        &self,
        input: NearbyInput,
    ) -> Result<(NearbySearchQuery, NearbyResult)> {
        let query = self.validator.validate_nearby_input(input)?;
        let result = self.engine.find_nearby(&query).await?;
        Ok((query, result))
    }

    /// Check that the persistence store answers
    pub async fn check_store(&self) -> Result<()> {
        self.store.health_check().await
    }
}
