use coachdb_core::{
    NewCoach, StaffUpdateRecord, StaffUpdateResponse, UpsertOutcome, ValidatedStaffUpdate,
};
use rusqlite::{Connection, params};

use super::coaches::{find_coach_row, insert_coach_row};
use super::schools::resolve_school;
use super::{Storage, get_conn, latest_year, log_row_error};
use crate::error::StorageError;

fn record_event(
    conn: &Connection,
    update: &ValidatedStaffUpdate,
    year: i32,
    coach_id: i64,
    outcome: UpsertOutcome,
) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO staff_updates
             (school, name, role, conference, source_url, effective_date, year, coach_id, outcome, received_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            update.school,
            update.name,
            update.position,
            update.conference,
            update.source_url,
            update.effective_date.map(|d| d.to_string()),
            year,
            coach_id,
            outcome.as_str(),
            chrono::Utc::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

impl Storage {
    /// Upsert the coach row named by a webhook event and audit it.
    ///
    /// Keyed by `(school, name, position, year)`; the season defaults to the
    /// latest one. An existing row is updated only when its head-coach flag or
    /// effective date differ. Runs in one transaction.
    ///
    /// # Errors
    /// Returns `StorageError::NotFound` if the school cannot be resolved by
    /// name or slug, or a database error.
    pub fn apply_staff_update(
        &self,
        update: &ValidatedStaffUpdate,
    ) -> Result<StaffUpdateResponse, StorageError> {
        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction()?;

        let year = match update.year {
            Some(y) => y,
            None => latest_year(&tx)?,
        };
        let (school_id, school_slug) = resolve_school(&tx, &update.school)?
            .ok_or_else(|| StorageError::NotFound { entity: "school", id: update.school.clone() })?;
        let effective_date = update.effective_date.map(|d| d.to_string());

        let existing =
            find_coach_row(&tx, school_id, &update.name, update.position.as_deref(), year)?;
        let (coach_id, outcome) = match existing {
            None => {
                let id = insert_coach_row(
                    &tx,
                    &NewCoach {
                        name: update.name.clone(),
                        school_id,
                        position: update.position.clone(),
                        is_head_coach: update.is_head_coach,
                        year,
                        scraped_at: effective_date.clone(),
                    },
                )?;
                (id, UpsertOutcome::Inserted)
            },
            Some((id, is_head_coach)) => {
                let stored_date: Option<String> = tx.query_row(
                    "SELECT source_scraped_at FROM coaches WHERE id = ?1",
                    params![id],
                    |row| row.get(0),
                )?;
                let date_changed = effective_date.is_some() && effective_date != stored_date;
                if is_head_coach == update.is_head_coach && !date_changed {
                    (id, UpsertOutcome::Unchanged)
                } else {
                    tx.execute(
                        "UPDATE coaches
                         SET is_head_coach = ?1, source_scraped_at = COALESCE(?2, source_scraped_at)
                         WHERE id = ?3",
                        params![update.is_head_coach, effective_date, id],
                    )?;
                    (id, UpsertOutcome::Updated)
                }
            },
        };

        record_event(&tx, update, year, coach_id, outcome)?;
        tx.commit()?;

        tracing::info!(
            school = %school_slug,
            name = %update.name,
            year,
            outcome = outcome.as_str(),
            "Applied staff update"
        );
        Ok(StaffUpdateResponse { outcome, coach_id, school_slug, year })
    }

    /// Most recent audited webhook events, newest first.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn recent_staff_updates(&self, limit: usize) -> Result<Vec<StaffUpdateRecord>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let mut stmt = conn.prepare(
            "SELECT id, school, name, role, conference, source_url, effective_date, year,
                    coach_id, outcome, received_at
             FROM staff_updates
             ORDER BY id DESC
             LIMIT ?1",
        )?;
        let records = stmt
            .query_map(params![limit as i64], |row| {
                let outcome: String = row.get(9)?;
                Ok(StaffUpdateRecord {
                    id: row.get(0)?,
                    school: row.get(1)?,
                    name: row.get(2)?,
                    role: row.get(3)?,
                    conference: row.get(4)?,
                    source_url: row.get(5)?,
                    effective_date: row.get(6)?,
                    year: row.get(7)?,
                    coach_id: row.get(8)?,
                    outcome: outcome.parse().map_err(|e: coachdb_core::CoreError| {
                        rusqlite::Error::FromSqlConversionFailure(
                            9,
                            rusqlite::types::Type::Text,
                            Box::new(e),
                        )
                    })?,
                    received_at: row.get(10)?,
                })
            })?
            .filter_map(log_row_error)
            .collect();
        Ok(records)
    }
}
