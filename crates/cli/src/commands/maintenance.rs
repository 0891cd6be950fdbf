use anyhow::Result;
use coachdb_core::{NewSalarySource, SchoolMerge};

use crate::{open_services, print_json};

pub(crate) async fn run_dedup(merges: &[SchoolMerge], apply: bool) -> Result<()> {
    let services = open_services()?;
    let report = services.maintenance.dedup(merges, apply).await?;
    if !apply {
        tracing::info!("Dry run; re-run with --apply to write these changes");
    }
    print_json(&report)
}

pub(crate) async fn run_sources_list(all: bool) -> Result<()> {
    let services = open_services()?;
    print_json(&services.maintenance.salary_sources(!all).await?)
}

pub(crate) async fn run_sources_add(
    school_slug: String,
    source_type: String,
    base_url: String,
    query_params: Option<String>,
    parser_name: String,
) -> Result<()> {
    let services = open_services()?;
    let source = NewSalarySource { school_slug, source_type, base_url, query_params, parser_name };
    let id = services.maintenance.register_salary_source(&source).await?;
    print_json(&serde_json::json!({"id": id}))
}
