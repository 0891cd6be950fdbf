use async_trait::async_trait;
use coachdb_core::{
    CareerRow, Coach, CoachQuery, Conference, DbStats, HeadCoachPay, SalaryQuery, SalaryRow,
    SchoolDetail, SchoolQuery, SchoolSummary, SearchHit, SearchQuery, SnapshotRecord,
};

use crate::error::StorageError;

/// Read-only queries behind the REST API.
///
/// Every `year: Option<i32>` falls back to the latest season on record.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// `year`, or the latest season when `None`.
    async fn resolve_year(&self, year: Option<i32>) -> Result<i32, StorageError>;

    /// Seasons on record, newest first.
    async fn season_years(&self) -> Result<Vec<i32>, StorageError>;

    async fn stats(&self, year: Option<i32>) -> Result<DbStats, StorageError>;

    async fn list_coaches(&self, query: &CoachQuery) -> Result<Vec<Coach>, StorageError>;

    async fn get_coach(&self, id: i64) -> Result<Option<Coach>, StorageError>;

    /// All season rows sharing the coach's name. `None` for an unknown id.
    async fn coach_history(&self, id: i64) -> Result<Option<Vec<Coach>>, StorageError>;

    /// Season rows for career grouping. `None` for an unknown id.
    async fn career_rows(&self, id: i64) -> Result<Option<Vec<CareerRow>>, StorageError>;

    async fn search_coaches(&self, query: &SearchQuery) -> Result<Vec<SearchHit>, StorageError>;

    async fn list_schools(&self, query: &SchoolQuery) -> Result<Vec<SchoolSummary>, StorageError>;

    async fn get_school(
        &self,
        slug: &str,
        year: Option<i32>,
    ) -> Result<Option<SchoolDetail>, StorageError>;

    /// Staff rows for one school. `None` for an unknown slug.
    async fn school_staff(
        &self,
        slug: &str,
        year: Option<i32>,
    ) -> Result<Option<Vec<Coach>>, StorageError>;

    /// `(name, position)` pairs for one school, head coach first.
    async fn staff_positions(
        &self,
        slug: &str,
        year: Option<i32>,
    ) -> Result<Vec<(String, Option<String>)>, StorageError>;

    async fn list_salaries(&self, query: &SalaryQuery) -> Result<Vec<SalaryRow>, StorageError>;

    /// Head coaches of one season with their newest salary, unpaid included.
    async fn head_coach_pay(&self, year: Option<i32>) -> Result<Vec<HeadCoachPay>, StorageError>;

    async fn list_conferences(&self) -> Result<Vec<Conference>, StorageError>;
}

/// Season snapshots for the change detector.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// All coach rows for `year`. Empty when the season has no rows.
    async fn load_snapshot(&self, year: i32) -> Result<Vec<SnapshotRecord>, StorageError>;
}
