use async_trait::async_trait;
use coachdb_core::{StaffUpdateRecord, StaffUpdateResponse, ValidatedStaffUpdate};

use crate::error::StorageError;

/// Webhook writes and their audit trail.
#[async_trait]
pub trait StaffUpdateStore: Send + Sync {
    /// Upsert the coach row an event names and append it to the audit log.
    ///
    /// Fails with `StorageError::NotFound` when the school is unknown.
    async fn apply_staff_update(
        &self,
        update: &ValidatedStaffUpdate,
    ) -> Result<StaffUpdateResponse, StorageError>;

    async fn recent_staff_updates(&self, limit: usize) -> Result<Vec<StaffUpdateRecord>, StorageError>;
}
