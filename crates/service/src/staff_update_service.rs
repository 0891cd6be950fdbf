use std::sync::Arc;

use coachdb_core::{StaffUpdate, StaffUpdateRecord, StaffUpdateResponse};
use coachdb_storage::{StaffUpdateStore, StorageError};

use crate::ServiceError;

/// Applies staff change events pushed to the webhook.
pub struct StaffUpdateService {
    store: Arc<dyn StaffUpdateStore>,
}

impl StaffUpdateService {
    #[must_use]
    pub fn new(store: Arc<dyn StaffUpdateStore>) -> Self {
        Self { store }
    }

    /// Validate and upsert one event.
    ///
    /// Blank school or name and malformed dates are `InvalidInput`; a school
    /// that resolves neither by name nor by slug is `UnknownSchool`.
    pub async fn apply(&self, update: &StaffUpdate) -> Result<StaffUpdateResponse, ServiceError> {
        let validated = update.validate()?;
        match self.store.apply_staff_update(&validated).await {
            Ok(response) => Ok(response),
            Err(StorageError::NotFound { entity: "school", id }) => {
                tracing::info!(school = %id, "Staff update for unknown school rejected");
                Err(ServiceError::UnknownSchool(id))
            },
            Err(e) => Err(e.into()),
        }
    }

    pub async fn recent(&self, limit: usize) -> Result<Vec<StaffUpdateRecord>, ServiceError> {
        Ok(self.store.recent_staff_updates(limit).await?)
    }
}
