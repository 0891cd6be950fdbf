use coachdb_core::{NewSalarySource, SalarySourceEntry};
use rusqlite::params;

use super::{Storage, get_conn, log_row_error, school_id_by_slug};
use crate::error::StorageError;

impl Storage {
    /// Registered payroll portals, optionally only active ones.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn list_salary_sources(&self, active_only: bool) -> Result<Vec<SalarySourceEntry>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let mut stmt = conn.prepare(
            "SELECT id, school_id, source_type, base_url, query_params, parser_name, last_scraped, active
             FROM salary_sources
             WHERE (?1 = 0 OR active = 1)
             ORDER BY school_id, id",
        )?;
        let sources = stmt
            .query_map(params![active_only], |row| {
                Ok(SalarySourceEntry {
                    id: row.get(0)?,
                    school_id: row.get(1)?,
                    source_type: row.get(2)?,
                    base_url: row.get(3)?,
                    query_params: row.get(4)?,
                    parser_name: row.get(5)?,
                    last_scraped: row.get(6)?,
                    active: row.get::<_, Option<bool>>(7)?.unwrap_or(true),
                })
            })?
            .filter_map(log_row_error)
            .collect();
        Ok(sources)
    }

    /// # Errors
    /// Returns `StorageError::NotFound` if the school slug is unknown.
    pub fn register_salary_source(&self, source: &NewSalarySource) -> Result<i64, StorageError> {
        let conn = get_conn(&self.pool)?;
        let school_id = school_id_by_slug(&conn, &source.school_slug)?.ok_or_else(|| {
            StorageError::NotFound { entity: "school", id: source.school_slug.clone() }
        })?;
        conn.execute(
            "INSERT INTO salary_sources (school_id, source_type, base_url, query_params, parser_name)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                school_id,
                source.source_type,
                source.base_url,
                source.query_params,
                source.parser_name,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }
}
