use std::sync::Arc;

use courts_core::config::SearchConfig;
use courts_core::error::Result;
use courts_store::FacilityStore;

use crate::services::FacilityService;

pub struct AppState {
    pub facilities: FacilityService,
}

impl AppState {
    pub fn new(store: Arc<dyn FacilityStore>, search: &SearchConfig) -> Result<Self> {
        Ok(Self { facilities: FacilityService::new(store, search)? })
    }
}
