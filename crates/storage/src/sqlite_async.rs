//! Async trait implementations for `Storage` via `spawn_blocking`.

use async_trait::async_trait;
use coachdb_core::{
    CareerRow, Coach, CoachQuery, Conference, DbStats, DedupReport, EnrichedSalary, HeadCoachPay,
    IngestCounts, NewSalarySource, SalaryQuery, SalaryRow, SalarySourceEntry, SchoolDetail, SchoolMerge,
    SchoolQuery, SchoolSummary, SearchHit, SearchQuery, SnapshotRecord, StaffUpdateRecord,
    StaffUpdateResponse, TeamStaff, UsaTodayFeed, ValidatedStaffUpdate,
};

use crate::Storage;
use crate::error::StorageError;
use crate::traits::{
    CatalogStore, IngestStore, MaintenanceStore, SalarySourceStore, SnapshotStore,
    StaffUpdateStore,
};

/// Helper: run a blocking closure on the tokio blocking pool.
async fn blocking<F, T>(f: F) -> Result<T, StorageError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StorageError::Join(e.to_string()))?
}

/// Body-generating macro for async-to-blocking delegation.
///
/// Each argument is annotated with a capture kind:
/// - `@ref arg`   : `.clone()` a `&T`, pass as `&arg`
/// - `@str arg`   : `.to_owned()` a `&str`, pass as `&arg`
/// - `@slice arg` : `.to_vec()` a `&[T]`, pass as `&arg`
/// - `@val arg`   : move directly (Copy/owned types)
macro_rules! delegate {
    ($self:ident, $method:ident $(, @$kind:ident $arg:ident)*) => {{
        let s = $self.clone();
        $(delegate!(@capture $kind $arg);)*
        blocking(move || s.$method($(delegate!(@pass $kind $arg)),*)).await
    }};
    (@capture ref $arg:ident) => { let $arg = $arg.clone(); };
    (@capture str $arg:ident) => { let $arg = $arg.to_owned(); };
    (@capture slice $arg:ident) => { let $arg = $arg.to_vec(); };
    (@capture val $arg:ident) => { };
    (@pass ref $arg:ident) => { &$arg };
    (@pass str $arg:ident) => { &$arg };
    (@pass slice $arg:ident) => { &$arg };
    (@pass val $arg:ident) => { $arg };
}

// ── CatalogStore ─────────────────────────────────────────────────

#[async_trait]
impl CatalogStore for Storage {
    async fn resolve_year(&self, year: Option<i32>) -> Result<i32, StorageError> {
        delegate!(self, resolve_year, @val year)
    }
    async fn season_years(&self) -> Result<Vec<i32>, StorageError> {
        delegate!(self, season_years)
    }
    async fn stats(&self, year: Option<i32>) -> Result<DbStats, StorageError> {
        delegate!(self, stats, @val year)
    }
    async fn list_coaches(&self, query: &CoachQuery) -> Result<Vec<Coach>, StorageError> {
        delegate!(self, list_coaches, @ref query)
    }
    async fn get_coach(&self, id: i64) -> Result<Option<Coach>, StorageError> {
        delegate!(self, get_coach, @val id)
    }
    async fn coach_history(&self, id: i64) -> Result<Option<Vec<Coach>>, StorageError> {
        delegate!(self, coach_history, @val id)
    }
    async fn career_rows(&self, id: i64) -> Result<Option<Vec<CareerRow>>, StorageError> {
        delegate!(self, career_rows, @val id)
    }
    async fn search_coaches(&self, query: &SearchQuery) -> Result<Vec<SearchHit>, StorageError> {
        delegate!(self, search_coaches, @ref query)
    }
    async fn list_schools(&self, query: &SchoolQuery) -> Result<Vec<SchoolSummary>, StorageError> {
        delegate!(self, list_schools, @ref query)
    }
    async fn get_school(
        &self,
        slug: &str,
        year: Option<i32>,
    ) -> Result<Option<SchoolDetail>, StorageError> {
        delegate!(self, get_school, @str slug, @val year)
    }
    async fn school_staff(
        &self,
        slug: &str,
        year: Option<i32>,
    ) -> Result<Option<Vec<Coach>>, StorageError> {
        delegate!(self, school_staff, @str slug, @val year)
    }
    async fn staff_positions(
        &self,
        slug: &str,
        year: Option<i32>,
    ) -> Result<Vec<(String, Option<String>)>, StorageError> {
        delegate!(self, staff_positions, @str slug, @val year)
    }
    async fn list_salaries(&self, query: &SalaryQuery) -> Result<Vec<SalaryRow>, StorageError> {
        delegate!(self, list_salaries, @ref query)
    }
    async fn head_coach_pay(&self, year: Option<i32>) -> Result<Vec<HeadCoachPay>, StorageError> {
        delegate!(self, head_coach_pay, @val year)
    }
    async fn list_conferences(&self) -> Result<Vec<Conference>, StorageError> {
        delegate!(self, list_conferences)
    }
}

// ── SnapshotStore ────────────────────────────────────────────────

#[async_trait]
impl SnapshotStore for Storage {
    async fn load_snapshot(&self, year: i32) -> Result<Vec<SnapshotRecord>, StorageError> {
        delegate!(self, load_snapshot, @val year)
    }
}

// ── StaffUpdateStore ─────────────────────────────────────────────

#[async_trait]
impl StaffUpdateStore for Storage {
    async fn apply_staff_update(
        &self,
        update: &ValidatedStaffUpdate,
    ) -> Result<StaffUpdateResponse, StorageError> {
        delegate!(self, apply_staff_update, @ref update)
    }
    async fn recent_staff_updates(&self, limit: usize) -> Result<Vec<StaffUpdateRecord>, StorageError> {
        delegate!(self, recent_staff_updates, @val limit)
    }
}

// ── IngestStore ──────────────────────────────────────────────────

#[async_trait]
impl IngestStore for Storage {
    async fn import_usa_today(&self, feed: &UsaTodayFeed, year: i32) -> Result<IngestCounts, StorageError> {
        delegate!(self, import_usa_today, @ref feed, @val year)
    }
    async fn import_staff_roster(
        &self,
        roster: &[(String, TeamStaff)],
        year: i32,
    ) -> Result<IngestCounts, StorageError> {
        delegate!(self, import_staff_roster, @slice roster, @val year)
    }
    async fn import_enriched_salaries(
        &self,
        salaries: &[EnrichedSalary],
    ) -> Result<IngestCounts, StorageError> {
        delegate!(self, import_enriched_salaries, @slice salaries)
    }
}

// ── MaintenanceStore / SalarySourceStore ─────────────────────────

#[async_trait]
impl MaintenanceStore for Storage {
    async fn dedup(&self, merges: &[SchoolMerge], apply: bool) -> Result<DedupReport, StorageError> {
        delegate!(self, dedup, @slice merges, @val apply)
    }
}

#[async_trait]
impl SalarySourceStore for Storage {
    async fn list_salary_sources(&self, active_only: bool) -> Result<Vec<SalarySourceEntry>, StorageError> {
        delegate!(self, list_salary_sources, @val active_only)
    }
    async fn register_salary_source(&self, source: &NewSalarySource) -> Result<i64, StorageError> {
        delegate!(self, register_salary_source, @ref source)
    }
}
