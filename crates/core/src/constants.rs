//! Shared constants for coachdb.
//!
//! Query defaults and caps mirror what the public API has always served.

/// Default number of coach rows returned by the coach listing.
pub const DEFAULT_COACH_LIMIT: usize = 2500;

/// Hard cap for the coach listing.
pub const MAX_COACH_LIMIT: usize = 3000;

/// Default number of schools returned by the school listing.
pub const DEFAULT_SCHOOL_LIMIT: usize = 100;

/// Hard cap for the school listing.
pub const MAX_SCHOOL_LIMIT: usize = 500;

/// Default number of salary rows.
pub const DEFAULT_SALARY_LIMIT: usize = 50;

/// Hard cap for salary rows.
pub const MAX_SALARY_LIMIT: usize = 200;

/// Default number of search hits.
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

/// Hard cap for search hits.
pub const MAX_SEARCH_LIMIT: usize = 100;

/// Shortest accepted search string.
pub const MIN_SEARCH_LEN: usize = 2;

/// Minimum name similarity for fuzzy coach matching during salary enrichment.
pub const NAME_MATCH_THRESHOLD: f64 = 0.9;

/// Canonical abbreviations of the Power Four conferences. Staff changes at
/// their schools are flagged as alerts.
pub const POWER_FOUR_CONFERENCES: [&str; 4] = ["SEC", "Big 10", "Big 12", "ACC"];

/// Default SQLite connection pool size.
pub const DEFAULT_DB_POOL_SIZE: u32 = 8;

/// Default HTTP port for `coachdb serve`.
pub const DEFAULT_HTTP_PORT: u16 = 8100;

/// Header carrying the webhook shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Service name reported by the root endpoint.
pub const SERVICE_NAME: &str = "Coach Database API";
