use anyhow::Result;
use coachdb_core::{ConferenceSalaryQuery, SalaryQuery, SearchQuery};

use crate::{open_services, print_json};

pub(crate) async fn run_changes(from: i32, to: i32) -> Result<()> {
    let services = open_services()?;
    let report = services.changes.diff(from, to).await?;
    tracing::info!(alerts = report.alert_count(), "Power Four changes flagged");
    print_json(&report)
}

pub(crate) async fn run_salaries(query: SalaryQuery) -> Result<()> {
    let services = open_services()?;
    print_json(&services.catalog.salaries(query).await?)
}

pub(crate) async fn run_conference_salaries(year: Option<i32>, power_four: bool) -> Result<()> {
    let services = open_services()?;
    let query = ConferenceSalaryQuery { year, power_four };
    print_json(&services.catalog.conference_salaries(query).await?)
}

pub(crate) async fn run_stats(year: Option<i32>) -> Result<()> {
    let services = open_services()?;
    print_json(&services.catalog.stats(year).await?)
}

pub(crate) async fn run_years() -> Result<()> {
    let services = open_services()?;
    print_json(&services.catalog.years().await?)
}

pub(crate) async fn run_search(query: String, year: Option<i32>, limit: usize) -> Result<()> {
    let services = open_services()?;
    let hits = services.catalog.search(SearchQuery { q: query, year, limit }).await?;
    print_json(&hits)
}

pub(crate) async fn run_staff_updates(limit: usize) -> Result<()> {
    let services = open_services()?;
    print_json(&services.staff_updates.recent(limit).await?)
}
