use async_trait::async_trait;
use coachdb_core::{EnrichedSalary, IngestCounts, TeamStaff, UsaTodayFeed};

use crate::error::StorageError;

/// Bulk imports of scraper output. Each call is one transaction.
#[async_trait]
pub trait IngestStore: Send + Sync {
    async fn import_usa_today(&self, feed: &UsaTodayFeed, year: i32) -> Result<IngestCounts, StorageError>;

    async fn import_staff_roster(
        &self,
        roster: &[(String, TeamStaff)],
        year: i32,
    ) -> Result<IngestCounts, StorageError>;

    async fn import_enriched_salaries(
        &self,
        salaries: &[EnrichedSalary],
    ) -> Result<IngestCounts, StorageError>;
}
