use std::sync::Arc;

use coachdb_core::normalize::{StaffSlot, assign_staff_slots};
use coachdb_core::{
    CareerStint, Coach, CoachQuery, Conference, ConferenceSalaryQuery, ConferenceSalaryStats,
    DbStats, MIN_SEARCH_LEN, SalaryQuery, SalaryRow, SchoolDetail, SchoolQuery, SchoolSummary,
    SearchHit, SearchQuery, SeasonYears, build_career, conference_salary_breakdown,
};
use coachdb_storage::CatalogStore;

use crate::ServiceError;

/// Read side of the API. Limits are capped here before reaching storage.
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
}

impl CatalogService {
    #[must_use]
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn stats(&self, year: Option<i32>) -> Result<DbStats, ServiceError> {
        Ok(self.store.stats(year).await?)
    }

    pub async fn years(&self) -> Result<SeasonYears, ServiceError> {
        Ok(SeasonYears::new(self.store.season_years().await?))
    }

    pub async fn resolve_year(&self, year: Option<i32>) -> Result<i32, ServiceError> {
        Ok(self.store.resolve_year(year).await?)
    }

    pub async fn coaches(&self, query: CoachQuery) -> Result<Vec<Coach>, ServiceError> {
        Ok(self.store.list_coaches(&query.capped()).await?)
    }

    pub async fn coach(&self, id: i64) -> Result<Option<Coach>, ServiceError> {
        Ok(self.store.get_coach(id).await?)
    }

    pub async fn coach_history(&self, id: i64) -> Result<Option<Vec<Coach>>, ServiceError> {
        Ok(self.store.coach_history(id).await?)
    }

    /// Grouped stints, newest first. `None` for an unknown coach id.
    pub async fn coach_career(&self, id: i64) -> Result<Option<Vec<CareerStint>>, ServiceError> {
        let rows = self.store.career_rows(id).await?;
        Ok(rows.map(|rows| build_career(&rows)))
    }

    pub async fn schools(&self, query: SchoolQuery) -> Result<Vec<SchoolSummary>, ServiceError> {
        Ok(self.store.list_schools(&query.capped()).await?)
    }

    pub async fn school(&self, slug: &str, year: Option<i32>) -> Result<Option<SchoolDetail>, ServiceError> {
        Ok(self.store.get_school(slug, year).await?)
    }

    pub async fn school_staff(
        &self,
        slug: &str,
        year: Option<i32>,
    ) -> Result<Option<Vec<Coach>>, ServiceError> {
        Ok(self.store.school_staff(slug, year).await?)
    }

    pub async fn salaries(&self, query: SalaryQuery) -> Result<Vec<SalaryRow>, ServiceError> {
        Ok(self.store.list_salaries(&query.capped()).await?)
    }

    /// Head coach pay summarized per conference, highest average first.
    pub async fn conference_salaries(
        &self,
        query: ConferenceSalaryQuery,
    ) -> Result<Vec<ConferenceSalaryStats>, ServiceError> {
        let rows = self.store.head_coach_pay(query.year).await?;
        Ok(conference_salary_breakdown(&rows, query.power_four))
    }

    /// Name search. The trimmed query must be at least [`MIN_SEARCH_LEN`] characters.
    pub async fn search(&self, query: SearchQuery) -> Result<Vec<SearchHit>, ServiceError> {
        let q = query.q.trim();
        if q.chars().count() < MIN_SEARCH_LEN {
            return Err(ServiceError::InvalidInput(format!(
                "search query must be at least {MIN_SEARCH_LEN} characters"
            )));
        }
        let query = SearchQuery { q: q.to_owned(), ..query }.capped();
        Ok(self.store.search_coaches(&query).await?)
    }

    /// Offensive staff slots for one school, optionally narrowed to one slot.
    ///
    /// An unknown school yields no slots.
    pub async fn staff_lookup(
        &self,
        slug: &str,
        year: Option<i32>,
        slot: Option<StaffSlot>,
    ) -> Result<Vec<(StaffSlot, String)>, ServiceError> {
        let staff = self.store.staff_positions(slug, year).await?;
        let mut slots = assign_staff_slots(&staff);
        if let Some(wanted) = slot {
            slots.retain(|(s, _)| *s == wanted);
        }
        Ok(slots)
    }

    pub async fn conferences(&self) -> Result<Vec<Conference>, ServiceError> {
        Ok(self.store.list_conferences().await?)
    }
}
