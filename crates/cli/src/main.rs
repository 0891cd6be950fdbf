use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use coachdb_core::{
    DEFAULT_HTTP_PORT, DEFAULT_SALARY_LIMIT, DEFAULT_SEARCH_LIMIT, SalaryQuery, SalarySort,
    SchoolMerge, env_first_of,
};
use coachdb_service::Services;
use coachdb_storage::Storage;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "coachdb")]
#[command(about = "College football coaching staff and salary database", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the REST API.
    Serve {
        #[arg(short, long, default_value_t = DEFAULT_HTTP_PORT)]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Staff changes between two seasons.
    Changes {
        #[arg(long)]
        from: i32,
        #[arg(long)]
        to: i32,
    },
    Stats {
        #[arg(short, long)]
        year: Option<i32>,
    },
    Years,
    /// Find coaches by coach or school name.
    Search {
        query: String,
        #[arg(short, long)]
        year: Option<i32>,
        #[arg(short, long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: usize,
    },
    /// Head coach salaries, or a per-conference summary with --by-conference.
    Salaries {
        #[arg(short, long)]
        year: Option<i32>,
        #[arg(short, long)]
        conference: Option<String>,
        #[arg(long, value_enum, default_value_t = SortBy::Pay)]
        sort: SortBy,
        #[arg(short, long, default_value_t = DEFAULT_SALARY_LIMIT)]
        limit: usize,
        #[arg(long)]
        by_conference: bool,
        /// Only SEC, Big 10, Big 12 and ACC. Implies --by-conference.
        #[arg(long)]
        power_four: bool,
    },
    /// Import a USA Today head coach salary export.
    ImportSalaries {
        file: PathBuf,
        #[arg(short, long)]
        year: Option<i32>,
    },
    /// Import a staff roster export keyed by school slug.
    ImportStaff {
        file: PathBuf,
        #[arg(short, long)]
        year: Option<i32>,
    },
    /// Attach state payroll and media-reported salaries to existing coaches.
    ImportEnriched {
        #[arg(long)]
        state: Option<PathBuf>,
        #[arg(long)]
        media: Option<PathBuf>,
        #[arg(long)]
        media_year: Option<i32>,
        #[arg(long)]
        include_non_coordinators: bool,
        #[arg(long)]
        keep_media_when_state: bool,
    },
    /// Merge duplicate schools, repair names and drop duplicate rows.
    ///
    /// Reports what would change unless --apply is given.
    Dedup {
        /// `keep:drop` school slugs; repeatable.
        #[arg(long = "merge", value_name = "KEEP:DROP")]
        merges: Vec<SchoolMerge>,
        #[arg(long)]
        apply: bool,
    },
    /// Per-school payroll portals.
    Sources {
        #[command(subcommand)]
        action: SourcesAction,
    },
    /// Recently accepted webhook events.
    StaffUpdates {
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SortBy {
    Pay,
    Buyout,
}

impl From<SortBy> for SalarySort {
    fn from(sort: SortBy) -> Self {
        match sort {
            SortBy::Pay => Self::TotalPay,
            SortBy::Buyout => Self::Buyout,
        }
    }
}

#[derive(Subcommand)]
enum SourcesAction {
    List {
        /// Include inactive sources.
        #[arg(long)]
        all: bool,
    },
    Add {
        #[arg(long)]
        school: String,
        #[arg(long = "type")]
        source_type: String,
        #[arg(long)]
        url: String,
        #[arg(long)]
        query_params: Option<String>,
        #[arg(long)]
        parser: String,
    },
}

pub(crate) fn get_db_path() -> PathBuf {
    env_first_of(&["COACHDB_DB_PATH", "DATABASE_PATH"]).map_or_else(
        || {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("coachdb")
                .join("coaches.db")
        },
        PathBuf::from,
    )
}

pub(crate) fn get_webhook_key() -> Option<String> {
    env_first_of(&["COACHDB_WEBHOOK_KEY", "WEBHOOK_API_KEY"])
}

pub(crate) fn ensure_db_dir(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

pub(crate) fn open_services() -> Result<Services> {
    let db_path = get_db_path();
    ensure_db_dir(&db_path)?;
    let storage = Storage::new(&db_path)?;
    Ok(Services::new(storage))
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(port, host).await,
        Commands::Changes { from, to } => commands::query::run_changes(from, to).await,
        Commands::Stats { year } => commands::query::run_stats(year).await,
        Commands::Years => commands::query::run_years().await,
        Commands::Search { query, year, limit } => {
            commands::query::run_search(query, year, limit).await
        },
        Commands::Salaries { year, conference, sort, limit, by_conference, power_four } => {
            if by_conference || power_four {
                commands::query::run_conference_salaries(year, power_four).await
            } else {
                let query = SalaryQuery { min_pay: None, conference, year, sort: sort.into(), limit };
                commands::query::run_salaries(query).await
            }
        },
        Commands::ImportSalaries { file, year } => {
            commands::import::run_import_salaries(&file, year).await
        },
        Commands::ImportStaff { file, year } => commands::import::run_import_staff(&file, year).await,
        Commands::ImportEnriched {
            state,
            media,
            media_year,
            include_non_coordinators,
            keep_media_when_state,
        } => {
            commands::import::run_import_enriched(
                state.as_deref(),
                media.as_deref(),
                media_year,
                include_non_coordinators,
                keep_media_when_state,
            )
            .await
        },
        Commands::Dedup { merges, apply } => commands::maintenance::run_dedup(&merges, apply).await,
        Commands::Sources { action } => match action {
            SourcesAction::List { all } => commands::maintenance::run_sources_list(all).await,
            SourcesAction::Add { school, source_type, url, query_params, parser } => {
                commands::maintenance::run_sources_add(school, source_type, url, query_params, parser)
                    .await
            },
        },
        Commands::StaffUpdates { limit } => commands::query::run_staff_updates(limit).await,
    }
}
