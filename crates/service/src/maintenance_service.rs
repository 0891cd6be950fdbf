use std::sync::Arc;

use coachdb_core::{DedupReport, NewSalarySource, SalarySourceEntry, SchoolMerge};
use coachdb_storage::{MaintenanceStore, SalarySourceStore};

use crate::ServiceError;

/// Data repair passes and the payroll portal registry.
pub struct MaintenanceService {
    store: Arc<dyn MaintenanceStore>,
    sources: Arc<dyn SalarySourceStore>,
}

impl MaintenanceService {
    #[must_use]
    pub fn new(store: Arc<dyn MaintenanceStore>, sources: Arc<dyn SalarySourceStore>) -> Self {
        Self { store, sources }
    }

    /// Run the dedup passes. With `apply` unset nothing is written.
    pub async fn dedup(&self, merges: &[SchoolMerge], apply: bool) -> Result<DedupReport, ServiceError> {
        if let Some(bad) = merges.iter().find(|m| m.keep_slug == m.drop_slug) {
            return Err(ServiceError::InvalidInput(format!(
                "cannot merge school '{}' into itself",
                bad.keep_slug
            )));
        }
        Ok(self.store.dedup(merges, apply).await?)
    }

    pub async fn salary_sources(&self, active_only: bool) -> Result<Vec<SalarySourceEntry>, ServiceError> {
        Ok(self.sources.list_salary_sources(active_only).await?)
    }

    /// Register a payroll portal. The URL must be http(s) and the names non-blank.
    pub async fn register_salary_source(&self, source: &NewSalarySource) -> Result<i64, ServiceError> {
        for (field, value) in [
            ("school_slug", &source.school_slug),
            ("source_type", &source.source_type),
            ("parser_name", &source.parser_name),
        ] {
            if value.trim().is_empty() {
                return Err(ServiceError::InvalidInput(format!("{field} is required")));
            }
        }
        let url = source.base_url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ServiceError::InvalidInput(format!(
                "base_url must be an http(s) URL, got '{url}'"
            )));
        }
        let id = self.sources.register_salary_source(source).await?;
        tracing::info!(id, school = %source.school_slug, source_type = %source.source_type, "Registered salary source");
        Ok(id)
    }
}
