use async_trait::async_trait;
use coachdb_core::{DedupReport, NewSalarySource, SalarySourceEntry, SchoolMerge};

use crate::error::StorageError;

/// Data repair passes.
#[async_trait]
pub trait MaintenanceStore: Send + Sync {
    /// Merge schools, repair names and drop duplicate coach rows.
    /// Nothing is written unless `apply` is set.
    async fn dedup(&self, merges: &[SchoolMerge], apply: bool) -> Result<DedupReport, StorageError>;
}

/// Payroll portal registry.
#[async_trait]
pub trait SalarySourceStore: Send + Sync {
    async fn list_salary_sources(&self, active_only: bool) -> Result<Vec<SalarySourceEntry>, StorageError>;

    async fn register_salary_source(&self, source: &NewSalarySource) -> Result<i64, StorageError>;
}
