use coachdb_core::SnapshotRecord;
use rusqlite::params;

use super::{Storage, get_conn, log_row_error};
use crate::error::StorageError;

impl Storage {
    /// Every coach row of one season, in detector input form.
    ///
    /// A season with no rows yields an empty snapshot. Rows without a school
    /// come back with blank school fields so the detector can count them.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn load_snapshot(&self, year: i32) -> Result<Vec<SnapshotRecord>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let mut stmt = conn.prepare(
            "SELECT c.name, COALESCE(s.name, ''), COALESCE(s.slug, ''), c.position, c.is_head_coach,
                    conf.abbrev
             FROM coaches c
             LEFT JOIN schools s ON c.school_id = s.id
             LEFT JOIN conferences conf ON s.conference_id = conf.id
             WHERE c.year = ?1
             ORDER BY c.id",
        )?;
        let records = stmt
            .query_map(params![year], |row| {
                Ok(SnapshotRecord {
                    name: row.get(0)?,
                    school: row.get(1)?,
                    school_slug: row.get(2)?,
                    position: row.get(3)?,
                    is_head_coach: row.get::<_, Option<bool>>(4)?.unwrap_or(false),
                    conference: row.get(5)?,
                })
            })?
            .filter_map(log_row_error)
            .collect::<Vec<_>>();
        tracing::debug!(year, rows = records.len(), "Loaded season snapshot");
        Ok(records)
    }
}
