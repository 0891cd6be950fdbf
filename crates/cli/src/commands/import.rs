use anyhow::Result;
use coachdb_core::EnrichedImportOptions;
use std::path::Path;

use crate::{open_services, print_json};

pub(crate) async fn run_import_salaries(file: &Path, year: Option<i32>) -> Result<()> {
    let services = open_services()?;
    let counts = services.ingest.import_usa_today_file(file, year).await?;
    print_json(&counts)
}

pub(crate) async fn run_import_staff(file: &Path, year: Option<i32>) -> Result<()> {
    let services = open_services()?;
    let counts = services.ingest.import_staff_file(file, year).await?;
    print_json(&counts)
}

pub(crate) async fn run_import_enriched(
    state: Option<&Path>,
    media: Option<&Path>,
    media_year: Option<i32>,
    include_non_coordinators: bool,
    keep_media_when_state: bool,
) -> Result<()> {
    let defaults = EnrichedImportOptions::default();
    let options = EnrichedImportOptions {
        media_year: media_year.unwrap_or(defaults.media_year),
        include_non_coordinators,
        keep_media_when_state,
    };
    let services = open_services()?;
    let counts = services.ingest.import_enriched_files(state, media, options).await?;
    print_json(&counts)
}
