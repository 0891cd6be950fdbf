use coachdb_core::normalize::{ConferenceInfo, conference_info, school_slug};
use coachdb_core::{Coach, Conference, School, SchoolDetail, SchoolQuery, SchoolSummary};
use rusqlite::{Connection, OptionalExtension as _, ToSql, params};

use super::{
    COACH_SELECT, Storage, coerce_to_sql, effective_year, get_conn, log_row_error, map_coach,
    school_id_by_slug,
};
use crate::error::StorageError;

/// Staff order shared by the school detail and staff endpoints.
const STAFF_ORDER: &str =
    " ORDER BY c.is_head_coach DESC, COALESCE(c.position, '') ASC, c.name ASC";

/// Conference id for `info`, inserting the row on first sight.
pub(crate) fn upsert_conference(conn: &Connection, info: &ConferenceInfo) -> Result<i64, StorageError> {
    if let Some(id) = conn
        .query_row("SELECT id FROM conferences WHERE abbrev = ?1", params![info.abbrev], |row| {
            row.get(0)
        })
        .optional()?
    {
        return Ok(id);
    }
    conn.execute(
        "INSERT INTO conferences (abbrev, name, division) VALUES (?1, ?2, ?3)",
        params![info.abbrev, info.name, info.division],
    )?;
    Ok(conn.last_insert_rowid())
}

/// School id and slug by exact name (case-insensitive), then by slug.
pub(crate) fn resolve_school(
    conn: &Connection,
    name_or_slug: &str,
) -> Result<Option<(i64, String)>, StorageError> {
    let by_name = conn
        .query_row(
            "SELECT id, slug FROM schools WHERE lower(name) = lower(?1) ORDER BY id LIMIT 1",
            params![name_or_slug.trim()],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;
    if by_name.is_some() {
        return Ok(by_name);
    }
    let slug = school_slug(name_or_slug);
    Ok(school_id_by_slug(conn, &slug)?.map(|id| (id, slug)))
}

/// School id for `slug`, creating the school when absent.
///
/// Returns the id and whether the row was created.
pub(crate) fn ensure_school(
    conn: &Connection,
    slug: &str,
    name: &str,
    conference: Option<&str>,
) -> Result<(i64, bool), StorageError> {
    if let Some(id) = school_id_by_slug(conn, slug)? {
        return Ok((id, false));
    }
    let conference_id =
        conference.map(|raw| upsert_conference(conn, &conference_info(raw))).transpose()?;
    conn.execute(
        "INSERT INTO schools (name, slug, conference_id) VALUES (?1, ?2, ?3)",
        params![name, slug, conference_id],
    )?;
    tracing::debug!(slug, name, "Created school");
    Ok((conn.last_insert_rowid(), true))
}

fn school_by_slug(conn: &Connection, slug: &str) -> Result<Option<School>, StorageError> {
    Ok(conn
        .query_row(
            "SELECT s.id, s.name, s.slug, conf.abbrev
             FROM schools s
             LEFT JOIN conferences conf ON s.conference_id = conf.id
             WHERE s.slug = ?1",
            params![slug],
            |row| {
                Ok(School {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    slug: row.get(2)?,
                    conference: row.get(3)?,
                })
            },
        )
        .optional()?)
}

fn staff_for(conn: &Connection, school_id: i64, year: i32) -> Result<Vec<Coach>, StorageError> {
    let sql = format!("{COACH_SELECT} WHERE c.school_id = ?1 AND c.year = ?2{STAFF_ORDER}");
    let mut stmt = conn.prepare(&sql)?;
    let staff = stmt.query_map(params![school_id, year], map_coach)?.filter_map(log_row_error).collect();
    Ok(staff)
}

impl Storage {
    /// Schools with their head coach and staff size for one season, by name.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn list_schools(&self, query: &SchoolQuery) -> Result<Vec<SchoolSummary>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let year = effective_year(&conn, query.year)?;
        let limit = query.limit as i64;

        let mut sql = String::from(
            "SELECT s.id, s.name, s.slug, conf.abbrev,
                    (SELECT name FROM coaches
                     WHERE school_id = s.id AND is_head_coach = 1 AND year = ?
                     ORDER BY id LIMIT 1),
                    (SELECT COUNT(*) FROM coaches WHERE school_id = s.id AND year = ?)
             FROM schools s
             LEFT JOIN conferences conf ON s.conference_id = conf.id
             WHERE 1=1",
        );
        let mut values: Vec<&dyn ToSql> = vec![coerce_to_sql(&year), coerce_to_sql(&year)];
        if let Some(conference) = &query.conference {
            sql.push_str(" AND conf.abbrev = ?");
            values.push(coerce_to_sql(conference));
        }
        sql.push_str(" ORDER BY s.name LIMIT ?");
        values.push(coerce_to_sql(&limit));

        let mut stmt = conn.prepare(&sql)?;
        let schools = stmt
            .query_map(values.as_slice(), |row| {
                Ok(SchoolSummary {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    slug: row.get(2)?,
                    conference: row.get(3)?,
                    head_coach: row.get(4)?,
                    staff_count: row.get::<_, i64>(5)? as u32,
                })
            })?
            .filter_map(log_row_error)
            .collect();
        Ok(schools)
    }

    /// A school and its staff for one season.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn get_school(&self, slug: &str, year: Option<i32>) -> Result<Option<SchoolDetail>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let year = effective_year(&conn, year)?;
        let Some(school) = school_by_slug(&conn, slug)? else {
            return Ok(None);
        };
        let staff = staff_for(&conn, school.id, year)?;
        Ok(Some(SchoolDetail {
            id: school.id,
            name: school.name,
            slug: school.slug,
            conference: school.conference,
            year,
            staff,
        }))
    }

    /// Staff rows for one school and season. `None` when the slug is unknown.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn school_staff(&self, slug: &str, year: Option<i32>) -> Result<Option<Vec<Coach>>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let year = effective_year(&conn, year)?;
        let Some(school_id) = school_id_by_slug(&conn, slug)? else {
            return Ok(None);
        };
        staff_for(&conn, school_id, year).map(Some)
    }

    /// # Errors
    /// Returns error if database query fails.
    pub fn list_conferences(&self) -> Result<Vec<Conference>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let mut stmt =
            conn.prepare("SELECT id, abbrev, name, division FROM conferences ORDER BY abbrev")?;
        let conferences = stmt
            .query_map([], |row| {
                Ok(Conference {
                    id: row.get(0)?,
                    abbrev: row.get(1)?,
                    name: row.get(2)?,
                    division: row.get(3)?,
                })
            })?
            .filter_map(log_row_error)
            .collect();
        Ok(conferences)
    }

    /// Create a school, or return the existing id for its slug.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn ensure_school(
        &self,
        name: &str,
        conference: Option<&str>,
    ) -> Result<(i64, bool), StorageError> {
        let conn = get_conn(&self.pool)?;
        ensure_school(&conn, &school_slug(name), name, conference)
    }
}
