use coachdb_core::normalize::position_category;
use coachdb_core::{CareerRow, Coach, CoachQuery, NewCoach, SearchHit, SearchQuery};
use rusqlite::{Connection, OptionalExtension as _, ToSql, params};

use super::{
    COACH_SELECT, Storage, coerce_to_sql, effective_year, escape_like_pattern, get_conn,
    log_row_error, map_coach,
};
use crate::error::StorageError;

/// Id and head-coach flag of the row matching `(school, name, position, year)`.
///
/// A missing position only matches rows whose position is NULL or empty.
pub(crate) fn find_coach_row(
    conn: &Connection,
    school_id: i64,
    name: &str,
    position: Option<&str>,
    year: i32,
) -> Result<Option<(i64, bool)>, StorageError> {
    Ok(conn
        .query_row(
            "SELECT id, is_head_coach FROM coaches
             WHERE school_id = ?1 AND name = ?2 AND COALESCE(position, '') = COALESCE(?3, '')
               AND year = ?4
             ORDER BY id
             LIMIT 1",
            params![school_id, name, position, year],
            |row| Ok((row.get(0)?, row.get::<_, Option<bool>>(1)?.unwrap_or(false))),
        )
        .optional()?)
}

/// Insert a coach row, refusing an exact `(school, name, position, year)` repeat.
pub(crate) fn insert_coach_row(conn: &Connection, coach: &NewCoach) -> Result<i64, StorageError> {
    if let Some((existing, _)) = find_coach_row(
        conn,
        coach.school_id,
        &coach.name,
        coach.position.as_deref(),
        coach.year,
    )? {
        return Err(StorageError::Duplicate(format!(
            "coach '{}' already recorded for school {} in {} (id {existing})",
            coach.name, coach.school_id, coach.year
        )));
    }
    conn.execute(
        "INSERT INTO coaches (name, school_id, position, is_head_coach, year, source_scraped_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            coach.name,
            coach.school_id,
            coach.position,
            coach.is_head_coach,
            coach.year,
            coach.scraped_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn coach_name(conn: &Connection, id: i64) -> Result<Option<String>, StorageError> {
    Ok(conn
        .query_row("SELECT name FROM coaches WHERE id = ?1", params![id], |row| row.get(0))
        .optional()?)
}

impl Storage {
    /// List coach rows for one season.
    ///
    /// Head coaches first, then by pay (unpaid last), school and name.
    /// `category` matches the derived [`coachdb_core::normalize::PositionCategory`].
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn list_coaches(&self, query: &CoachQuery) -> Result<Vec<Coach>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let year = effective_year(&conn, query.year)?;
        let limit = query.limit as i64;
        let position_pattern =
            query.position.as_deref().map(|p| format!("%{}%", escape_like_pattern(p)));

        let mut sql = format!("{COACH_SELECT} WHERE c.year = ?");
        let mut values: Vec<&dyn ToSql> = vec![coerce_to_sql(&year)];
        if let Some(school) = &query.school {
            sql.push_str(" AND s.slug = ?");
            values.push(coerce_to_sql(school));
        }
        if let Some(pattern) = &position_pattern {
            sql.push_str(" AND c.position LIKE ? ESCAPE '\\'");
            values.push(coerce_to_sql(pattern));
        }
        if query.head_only {
            sql.push_str(" AND c.is_head_coach = 1");
        }
        sql.push_str(
            " ORDER BY c.is_head_coach DESC, COALESCE(sal.total_pay, 0) DESC, s.name ASC, c.name ASC",
        );
        // The category is derived in Rust, so the limit applies after filtering.
        if query.category.is_none() {
            sql.push_str(" LIMIT ?");
            values.push(coerce_to_sql(&limit));
        }

        let mut stmt = conn.prepare(&sql)?;
        let coaches = stmt
            .query_map(values.as_slice(), map_coach)?
            .filter_map(log_row_error)
            .filter(|coach: &Coach| query.category.is_none_or(|category| coach.category == category))
            .take(query.limit)
            .collect();
        Ok(coaches)
    }

    /// One coach row by id.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn get_coach(&self, id: i64) -> Result<Option<Coach>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let sql = format!("{COACH_SELECT} WHERE c.id = ?1");
        Ok(conn.query_row(&sql, params![id], map_coach).optional()?)
    }

    /// Every season row carrying the same name as coach `id`, newest first.
    ///
    /// Returns `None` when `id` does not exist.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn coach_history(&self, id: i64) -> Result<Option<Vec<Coach>>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let Some(name) = coach_name(&conn, id)? else {
            return Ok(None);
        };
        let sql = format!(
            "{COACH_SELECT} WHERE c.name = ?1
             ORDER BY c.year DESC, c.is_head_coach DESC, COALESCE(s.name, '') ASC, c.name ASC"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![name], map_coach)?.filter_map(log_row_error).collect();
        Ok(Some(rows))
    }

    /// Season rows for career grouping, oldest first.
    ///
    /// Returns `None` when `id` does not exist.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn career_rows(&self, id: i64) -> Result<Option<Vec<CareerRow>>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let Some(name) = coach_name(&conn, id)? else {
            return Ok(None);
        };
        let mut stmt = conn.prepare(
            "SELECT c.year, s.name, s.slug, c.position, c.is_head_coach
             FROM coaches c
             LEFT JOIN schools s ON c.school_id = s.id
             WHERE c.name = ?1
             ORDER BY c.year ASC, COALESCE(s.name, '') ASC, COALESCE(c.position, '') ASC",
        )?;
        let rows = stmt
            .query_map(params![name], |row| {
                Ok(CareerRow {
                    year: row.get(0)?,
                    school: row.get(1)?,
                    school_slug: row.get(2)?,
                    position: row.get(3)?,
                    is_head_coach: row.get::<_, Option<bool>>(4)?.unwrap_or(false),
                })
            })?
            .filter_map(log_row_error)
            .collect();
        Ok(Some(rows))
    }

    /// Substring search over coach and school names within one season.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn search_coaches(&self, query: &SearchQuery) -> Result<Vec<SearchHit>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let year = effective_year(&conn, query.year)?;
        let pattern = format!("%{}%", escape_like_pattern(query.q.trim()));
        let mut stmt = conn.prepare(
            "SELECT c.id, c.name, s.name, c.position, c.is_head_coach
             FROM coaches c
             LEFT JOIN schools s ON c.school_id = s.id
             WHERE (c.name LIKE ?1 ESCAPE '\\' OR s.name LIKE ?1 ESCAPE '\\') AND c.year = ?2
             ORDER BY c.is_head_coach DESC, c.name
             LIMIT ?3",
        )?;
        let hits = stmt
            .query_map(params![pattern, year, query.limit as i64], |row| {
                let position: Option<String> = row.get(3)?;
                let is_head_coach = row.get::<_, Option<bool>>(4)?.unwrap_or(false);
                Ok(SearchHit {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    school: row.get(2)?,
                    category: position_category(position.as_deref(), is_head_coach),
                    position,
                    is_head_coach,
                })
            })?
            .filter_map(log_row_error)
            .collect();
        Ok(hits)
    }

    /// Insert one coach row.
    ///
    /// # Errors
    /// Returns `StorageError::Duplicate` if the same `(school, name, position, year)`
    /// row exists, or a database error.
    pub fn insert_coach(&self, coach: &NewCoach) -> Result<i64, StorageError> {
        let conn = get_conn(&self.pool)?;
        insert_coach_row(&conn, coach)
    }

    /// `(name, position)` for a school's staff in one season, head coach first.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn staff_positions(
        &self,
        slug: &str,
        year: Option<i32>,
    ) -> Result<Vec<(String, Option<String>)>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let year = effective_year(&conn, year)?;
        let mut stmt = conn.prepare(
            "SELECT c.name, c.position
             FROM coaches c
             JOIN schools s ON c.school_id = s.id
             WHERE s.slug = ?1 AND c.year = ?2
             ORDER BY c.is_head_coach DESC, c.id ASC",
        )?;
        let staff = stmt
            .query_map(params![slug, year], |row| Ok((row.get(0)?, row.get(1)?)))?
            .filter_map(log_row_error)
            .collect();
        Ok(staff)
    }
}
