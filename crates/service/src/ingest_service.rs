use std::path::Path;
use std::sync::Arc;

use chrono::Datelike as _;
use coachdb_core::{
    EnrichedImportOptions, IngestCounts, MediaSalaryReports, StaffRoster, StateSalaryMatches,
    TeamStaff, UsaTodayFeed, plan_enriched_salaries,
};
use coachdb_storage::IngestStore;
use serde::de::DeserializeOwned;

use crate::ServiceError;

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ServiceError> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&raw)?)
}

fn current_season() -> i32 {
    chrono::Local::now().year()
}

/// Split a roster export into per-school entries.
///
/// Metadata keys (leading `_`) are dropped. Entries that do not parse are
/// logged and counted in the returned skip count.
fn roster_entries(roster: StaffRoster) -> (Vec<(String, TeamStaff)>, u64) {
    let mut entries = Vec::with_capacity(roster.len());
    let mut unreadable = 0;
    for (slug, value) in roster {
        if slug.starts_with('_') {
            continue;
        }
        match serde_json::from_value::<TeamStaff>(value) {
            Ok(team) => entries.push((slug, team)),
            Err(e) => {
                tracing::warn!(school = %slug, error = %e, "Skipping unreadable roster entry");
                unreadable += 1;
            },
        }
    }
    (entries, unreadable)
}

/// Imports of scraper output files.
pub struct IngestService {
    store: Arc<dyn IngestStore>,
}

impl IngestService {
    #[must_use]
    pub fn new(store: Arc<dyn IngestStore>) -> Self {
        Self { store }
    }

    /// Import a parsed USA Today feed. `year` defaults to the current season.
    pub async fn import_usa_today(
        &self,
        feed: &UsaTodayFeed,
        year: Option<i32>,
    ) -> Result<IngestCounts, ServiceError> {
        let year = year.unwrap_or_else(current_season);
        let counts = self.store.import_usa_today(feed, year).await?;
        tracing::info!(
            year,
            rows = feed.coaches.len(),
            schools_created = counts.schools_created,
            coaches_inserted = counts.coaches_inserted,
            salaries_inserted = counts.salaries_inserted,
            salaries_updated = counts.salaries_updated,
            skipped = counts.skipped,
            "Imported USA Today salaries"
        );
        Ok(counts)
    }

    pub async fn import_usa_today_file(
        &self,
        path: &Path,
        year: Option<i32>,
    ) -> Result<IngestCounts, ServiceError> {
        let feed: UsaTodayFeed = read_json(path).await?;
        self.import_usa_today(&feed, year).await
    }

    /// Import a staff roster export. `year` defaults to the current season.
    pub async fn import_staff_roster(
        &self,
        roster: StaffRoster,
        year: Option<i32>,
    ) -> Result<IngestCounts, ServiceError> {
        let year = year.unwrap_or_else(current_season);
        let (entries, unreadable) = roster_entries(roster);
        let mut counts = self.store.import_staff_roster(&entries, year).await?;
        counts.skipped += unreadable;
        tracing::info!(
            year,
            schools = entries.len(),
            schools_created = counts.schools_created,
            coaches_inserted = counts.coaches_inserted,
            skipped = counts.skipped,
            "Imported staff roster"
        );
        Ok(counts)
    }

    pub async fn import_staff_file(
        &self,
        path: &Path,
        year: Option<i32>,
    ) -> Result<IngestCounts, ServiceError> {
        let roster: StaffRoster = read_json(path).await?;
        self.import_staff_roster(roster, year).await
    }

    /// Merge payroll matches and media reports, then attach them to coach rows.
    pub async fn import_enriched(
        &self,
        state: &StateSalaryMatches,
        media: &MediaSalaryReports,
        options: EnrichedImportOptions,
    ) -> Result<IngestCounts, ServiceError> {
        let today = chrono::Local::now().date_naive().to_string();
        let planned = plan_enriched_salaries(state, media, options, &today);
        let counts = self.store.import_enriched_salaries(&planned).await?;
        tracing::info!(
            planned = planned.len(),
            salaries_inserted = counts.salaries_inserted,
            skipped = counts.skipped,
            unresolved = counts.unresolved,
            "Imported enriched salaries"
        );
        Ok(counts)
    }

    /// File variant of [`Self::import_enriched`]. A missing path is an empty input.
    pub async fn import_enriched_files(
        &self,
        state_path: Option<&Path>,
        media_path: Option<&Path>,
        options: EnrichedImportOptions,
    ) -> Result<IngestCounts, ServiceError> {
        if state_path.is_none() && media_path.is_none() {
            return Err(ServiceError::InvalidInput(
                "at least one of the state or media files is required".to_owned(),
            ));
        }
        let state = match state_path {
            Some(p) => read_json(p).await?,
            None => StateSalaryMatches::default(),
        };
        let media = match media_path {
            Some(p) => read_json(p).await?,
            None => MediaSalaryReports::default(),
        };
        self.import_enriched(&state, &media, options).await
    }
}
