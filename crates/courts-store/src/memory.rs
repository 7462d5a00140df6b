//! In-memory storage implementation for development and testing.
//!
//! Facilities live in a `HashMap`; an R-tree over their positions serves
//! radius lookups. Locks are always taken in the order facilities -> index.

use async_trait::async_trait;
use chrono::Utc;
use courts_core::error::{CourtsError, Result};
use courts_core::models::{Facility, FacilityId, NewFacility};
use courts_geo::{Coordinate, GreatCircle};
use rstar::{RTree, RTreeObject, AABB};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::ports::FacilityStore;

/// Facility position indexed in the R-tree (x = longitude, y = latitude)
#[derive(Debug, Clone, PartialEq)]
struct IndexedFacility {
    id: FacilityId,
    position: [f64; 2],
}

impl IndexedFacility {
    fn new(id: FacilityId, location: Coordinate) -> Self {
        Self { id, position: [location.longitude(), location.latitude()] }
    }
}

impl RTreeObject for IndexedFacility {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

/// In-memory implementation of FacilityStore
#[derive(Debug, Clone, Default)]
pub struct MemoryFacilityStore {
    facilities: Arc<RwLock<HashMap<FacilityId, Facility>>>,
    index: Arc<RwLock<RTree<IndexedFacility>>>,
    model: GreatCircle,
}

impl MemoryFacilityStore {
    /// Create a new in-memory store using the mean Earth radius
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose radius lookups use the given distance model
    pub fn with_model(model: GreatCircle) -> Self {
        Self { model, ..Self::default() }
    }

    /// Number of stored facilities. Fails like every other operation once a
    /// writer has panicked while holding the lock.
    pub fn len(&self) -> Result<usize> {
        Ok(read(&self.facilities)?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>> {
    lock.read().map_err(|_| CourtsError::store_unavailable("in-memory store lock poisoned"))
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>> {
    lock.write().map_err(|_| CourtsError::store_unavailable("in-memory store lock poisoned"))
}

#[async_trait]
impl FacilityStore for MemoryFacilityStore {
    async fn insert_facility(&self, facility: &NewFacility) -> Result<Facility> {
        let mut facilities = write(&self.facilities)?;
        let mut index = write(&self.index)?;

        let id = FacilityId(Uuid::new_v4());
        let stored = Facility::from_new(id, Utc::now(), facility.clone());

        index.insert(IndexedFacility::new(id, stored.location()));
        facilities.insert(id, stored.clone());

        Ok(stored)
    }

    async fn get_facility(&self, id: FacilityId) -> Result<Option<Facility>> {
        let facilities = read(&self.facilities)?;
        Ok(facilities.get(&id).cloned())
    }

    async fn list_facilities(&self) -> Result<Vec<Facility>> {
        let facilities = read(&self.facilities)?;
        let mut all: Vec<Facility> = facilities.values().cloned().collect();
        all.sort_by(|a, b| a.created_at().cmp(&b.created_at()).then(a.id().cmp(&b.id())));
        Ok(all)
    }

    async fn replace_facility(
        &self,
        id: FacilityId,
        details: &NewFacility,
    ) -> Result<Option<Facility>> {
        let mut facilities = write(&self.facilities)?;
        let mut index = write(&self.index)?;

        let Some(existing) = facilities.get(&id) else {
            return Ok(None);
        };

        let replacement = existing.replaced_with(details.clone());
        index.remove(&IndexedFacility::new(id, existing.location()));
        index.insert(IndexedFacility::new(id, replacement.location()));
        facilities.insert(id, replacement.clone());

        Ok(Some(replacement))
    }

    async fn find_within_radius(
        &self,
        center: Coordinate,
        radius_km: f64,
    ) -> Result<Vec<Facility>> {
        let facilities = read(&self.facilities)?;
        let index = read(&self.index)?;

        let rect = self.model.search_envelope(&center, radius_km);
        let envelope =
            AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]);

        Ok(index
            .locate_in_envelope_intersecting(&envelope)
            .filter_map(|entry| facilities.get(&entry.id).cloned())
            .collect())
    }

    async fn health_check(&self) -> Result<()> {
        read(&self.facilities)?;
        read(&self.index)?;
        Ok(())
    }
}
