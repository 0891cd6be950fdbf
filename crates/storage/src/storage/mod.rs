//! `SQLite` storage implementation.
//!
//! All methods are synchronous; `sqlite_async` wraps them in the async
//! store traits via `spawn_blocking`.

// SQLite uses i64 for counts/limits, Rust uses usize - safe conversions within DB context
#![allow(
    clippy::as_conversions,
    clippy::cast_possible_wrap,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "SQLite i64 <-> Rust usize conversions are safe within DB row counts"
)]

mod coaches;
mod ingest;
mod maintenance;
mod salaries;
mod salary_sources;
mod schools;
mod snapshots;
mod staff_updates;
mod stats;

use std::path::Path;

use chrono::Datelike as _;
use coachdb_core::normalize::position_category;
use coachdb_core::{Coach, DEFAULT_DB_POOL_SIZE, env_parse_with_default};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, OptionalExtension as _};

use crate::error::StorageError;
use crate::migrations;

/// Type alias for pooled connection
pub(crate) type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Main storage struct wrapping `SQLite` connection pool
#[derive(Clone, Debug)]
pub struct Storage {
    pub(crate) pool: Pool<SqliteConnectionManager>,
}

/// Get a connection from the pool
pub(crate) fn get_conn(pool: &Pool<SqliteConnectionManager>) -> Result<PooledConn, StorageError> {
    Ok(pool.get()?)
}

/// Log row read errors and filter them out
pub(crate) fn log_row_error<T>(result: rusqlite::Result<T>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!("Row read error: {}", e);
            None
        },
    }
}

/// Escape special characters for LIKE pattern matching
pub(crate) fn escape_like_pattern(s: &str) -> String {
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

/// Coerce a reference to `ToSql` trait object (avoids trivial cast lint)
pub(crate) fn coerce_to_sql<T: rusqlite::ToSql>(val: &T) -> &dyn rusqlite::ToSql {
    val
}

/// Latest season in the coaches table, or the current calendar year when empty.
pub(crate) fn latest_year(conn: &Connection) -> Result<i32, StorageError> {
    let max: Option<i32> = conn.query_row(
        "SELECT MAX(year) FROM coaches WHERE year IS NOT NULL",
        [],
        |row| row.get(0),
    )?;
    Ok(max.unwrap_or_else(|| chrono::Local::now().year()))
}

pub(crate) fn effective_year(conn: &Connection, year: Option<i32>) -> Result<i32, StorageError> {
    match year {
        Some(y) => Ok(y),
        None => latest_year(conn),
    }
}

/// Coach columns joined with school, conference and the newest salary
/// recorded for the row's own season. Append `WHERE ...` to use.
pub(crate) const COACH_SELECT: &str = "
    SELECT c.id, c.name, s.name, s.slug, c.position, c.is_head_coach, c.year, conf.abbrev,
           sal.total_pay, sal.year, sal.school_pay, sal.source, sal.source_date
    FROM coaches c
    LEFT JOIN schools s ON c.school_id = s.id
    LEFT JOIN conferences conf ON s.conference_id = conf.id
    LEFT JOIN salaries sal ON sal.id = (
        SELECT s2.id
        FROM salaries s2
        WHERE s2.coach_id = c.id
          AND s2.year = c.year
        ORDER BY s2.year DESC, COALESCE(s2.source_date, '') DESC, s2.id DESC
        LIMIT 1
    )";

/// Map a row selected with [`COACH_SELECT`].
pub(crate) fn map_coach(row: &rusqlite::Row<'_>) -> rusqlite::Result<Coach> {
    let position: Option<String> = row.get(4)?;
    let is_head_coach = row.get::<_, Option<bool>>(5)?.unwrap_or(false);
    Ok(Coach {
        id: row.get(0)?,
        name: row.get(1)?,
        school: row.get(2)?,
        school_slug: row.get(3)?,
        category: position_category(position.as_deref(), is_head_coach),
        position,
        is_head_coach,
        year: row.get(6)?,
        conference: row.get(7)?,
        total_pay: row.get(8)?,
        salary_year: row.get(9)?,
        salary_school_pay: row.get(10)?,
        salary_source: row.get(11)?,
        salary_source_date: row.get(12)?,
    })
}

/// School id for a slug.
pub(crate) fn school_id_by_slug(conn: &Connection, slug: &str) -> Result<Option<i64>, StorageError> {
    Ok(conn
        .query_row("SELECT id FROM schools WHERE slug = ?1", [slug], |row| row.get(0))
        .optional()?)
}

/// Custom connection initializer for concurrency settings
fn init_connection(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "PRAGMA busy_timeout = 30000;
         PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;",
    )?;
    Ok(())
}

fn db_pool_size() -> u32 {
    env_parse_with_default("COACHDB_DB_POOL_SIZE", DEFAULT_DB_POOL_SIZE).max(1)
}

impl Storage {
    /// Open (or create) the database at `db_path` and run migrations.
    ///
    /// # Errors
    /// Returns error if the pool cannot be built or a migration fails.
    pub fn new(db_path: &Path) -> Result<Self, StorageError> {
        let manager = SqliteConnectionManager::file(db_path).with_init(init_connection);

        let pool_size = db_pool_size();
        let pool = Pool::builder().max_size(pool_size).build(manager)?;

        let conn = pool.get()?;
        migrations::run_migrations(&conn).map_err(|e| StorageError::Migration(e.to_string()))?;
        drop(conn);

        tracing::info!(pool_size = pool_size, path = %db_path.display(), "Storage initialized with connection pool");

        Ok(Self { pool })
    }
}
