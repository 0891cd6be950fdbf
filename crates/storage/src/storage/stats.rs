use coachdb_core::DbStats;
use rusqlite::params;

use super::{Storage, effective_year, get_conn, log_row_error};
use crate::error::StorageError;

impl Storage {
    /// Seasons present in the coaches table, newest first.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn season_years(&self) -> Result<Vec<i32>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let mut stmt = conn.prepare(
            "SELECT DISTINCT year FROM coaches WHERE year IS NOT NULL ORDER BY year DESC",
        )?;
        let years = stmt.query_map([], |row| row.get(0))?.filter_map(log_row_error).collect();
        Ok(years)
    }

    /// `year`, or the latest season when `None`.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn resolve_year(&self, year: Option<i32>) -> Result<i32, StorageError> {
        let conn = get_conn(&self.pool)?;
        effective_year(&conn, year)
    }

    /// Row counts for one season. The school count is not per season.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn stats(&self, year: Option<i32>) -> Result<DbStats, StorageError> {
        let conn = get_conn(&self.pool)?;
        let year = effective_year(&conn, year)?;
        let schools: i64 = conn.query_row("SELECT COUNT(*) FROM schools", [], |row| row.get(0))?;
        let head_coaches: i64 = conn.query_row(
            "SELECT COUNT(*) FROM coaches WHERE is_head_coach = 1 AND year = ?1",
            params![year],
            |row| row.get(0),
        )?;
        let assistants: i64 = conn.query_row(
            "SELECT COUNT(*) FROM coaches WHERE is_head_coach = 0 AND year = ?1",
            params![year],
            |row| row.get(0),
        )?;
        let salaries: i64 = conn.query_row(
            "SELECT COUNT(*) FROM salaries WHERE year = ?1",
            params![year],
            |row| row.get(0),
        )?;
        Ok(DbStats {
            year,
            schools: schools as u64,
            head_coaches: head_coaches as u64,
            assistants: assistants as u64,
            salaries: salaries as u64,
        })
    }
}
