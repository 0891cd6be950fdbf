use coachdb_core::{HeadCoachPay, NewSalary, SalaryQuery, SalaryRow, SalarySort, SalarySource};
use rusqlite::{Connection, OptionalExtension as _, ToSql, params};

use super::{Storage, coerce_to_sql, effective_year, get_conn, log_row_error};
use crate::error::StorageError;

pub(crate) fn salary_exists(
    conn: &Connection,
    coach_id: i64,
    year: i32,
    source: &SalarySource,
) -> Result<bool, StorageError> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT id FROM salaries WHERE coach_id = ?1 AND year = ?2 AND source = ?3 LIMIT 1",
            params![coach_id, year, source.as_str()],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

pub(crate) fn insert_salary(conn: &Connection, salary: &NewSalary) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO salaries
             (coach_id, year, total_pay, school_pay, max_bonus, bonuses_paid, buyout, source, source_date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            salary.coach_id,
            salary.year,
            salary.total_pay,
            salary.school_pay,
            salary.max_bonus,
            salary.bonuses_paid,
            salary.buyout,
            salary.source.as_str(),
            salary.source_date,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Overwrite the `(coach, year, source)` salary row, or insert it.
///
/// Returns `true` when a new row was inserted.
pub(crate) fn upsert_salary(conn: &Connection, salary: &NewSalary) -> Result<bool, StorageError> {
    let updated = conn.execute(
        "UPDATE salaries
         SET total_pay = ?1, school_pay = ?2, max_bonus = ?3, bonuses_paid = ?4, buyout = ?5,
             source_date = ?6
         WHERE id = (SELECT id FROM salaries
                     WHERE coach_id = ?7 AND year = ?8 AND source = ?9
                     ORDER BY id DESC LIMIT 1)",
        params![
            salary.total_pay,
            salary.school_pay,
            salary.max_bonus,
            salary.bonuses_paid,
            salary.buyout,
            salary.source_date,
            salary.coach_id,
            salary.year,
            salary.source.as_str(),
        ],
    )?;
    if updated > 0 {
        return Ok(false);
    }
    insert_salary(conn, salary)?;
    Ok(true)
}

impl Storage {
    /// Head coach salaries for one season, highest paid first, or biggest
    /// buyout first with [`SalarySort::Buyout`].
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn list_salaries(&self, query: &SalaryQuery) -> Result<Vec<SalaryRow>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let year = effective_year(&conn, query.year)?;
        let limit = query.limit as i64;

        let mut sql = String::from(
            "SELECT c.name, s.name, sal.total_pay, sal.school_pay, sal.max_bonus, sal.buyout
             FROM salaries sal
             JOIN coaches c ON sal.coach_id = c.id
             JOIN schools s ON c.school_id = s.id
             LEFT JOIN conferences conf ON s.conference_id = conf.id
             WHERE sal.year = ? AND c.year = ? AND c.is_head_coach = 1",
        );
        let mut values: Vec<&dyn ToSql> = vec![coerce_to_sql(&year), coerce_to_sql(&year)];
        if let Some(min_pay) = &query.min_pay {
            sql.push_str(" AND sal.total_pay >= ?");
            values.push(coerce_to_sql(min_pay));
        }
        if let Some(conference) = &query.conference {
            sql.push_str(" AND conf.abbrev = ?");
            values.push(coerce_to_sql(conference));
        }
        match query.sort {
            SalarySort::TotalPay => sql.push_str(" ORDER BY sal.total_pay DESC LIMIT ?"),
            SalarySort::Buyout => {
                sql.push_str(" AND sal.buyout IS NOT NULL ORDER BY sal.buyout DESC LIMIT ?");
            },
        }
        values.push(coerce_to_sql(&limit));

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(values.as_slice(), |row| {
                Ok(SalaryRow {
                    coach_name: row.get(0)?,
                    school: row.get(1)?,
                    total_pay: row.get(2)?,
                    school_pay: row.get(3)?,
                    max_bonus: row.get(4)?,
                    buyout: row.get(5)?,
                })
            })?
            .filter_map(log_row_error)
            .collect();
        Ok(rows)
    }

    /// Every head coach of one season with the newest salary recorded for it.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn head_coach_pay(&self, year: Option<i32>) -> Result<Vec<HeadCoachPay>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let year = effective_year(&conn, year)?;
        let mut stmt = conn.prepare(
            "SELECT c.name, s.name, conf.abbrev, sal.total_pay, sal.buyout
             FROM coaches c
             JOIN schools s ON c.school_id = s.id
             LEFT JOIN conferences conf ON s.conference_id = conf.id
             LEFT JOIN salaries sal ON sal.id = (
                 SELECT s2.id FROM salaries s2
                 WHERE s2.coach_id = c.id AND s2.year = c.year
                 ORDER BY COALESCE(s2.source_date, '') DESC, s2.id DESC
                 LIMIT 1
             )
             WHERE c.year = ?1 AND c.is_head_coach = 1
             ORDER BY s.name",
        )?;
        let rows = stmt
            .query_map(params![year], |row| {
                Ok(HeadCoachPay {
                    coach_name: row.get(0)?,
                    school: row.get(1)?,
                    conference: row.get(2)?,
                    total_pay: row.get(3)?,
                    buyout: row.get(4)?,
                })
            })?
            .filter_map(log_row_error)
            .collect();
        Ok(rows)
    }

    /// Record a salary figure for an existing coach row.
    ///
    /// # Errors
    /// Returns `StorageError::NotFound` if the coach does not exist.
    pub fn insert_salary(&self, salary: &NewSalary) -> Result<i64, StorageError> {
        let conn = get_conn(&self.pool)?;
        let exists: Option<i64> = conn
            .query_row("SELECT id FROM coaches WHERE id = ?1", params![salary.coach_id], |row| {
                row.get(0)
            })
            .optional()?;
        if exists.is_none() {
            return Err(StorageError::NotFound { entity: "coach", id: salary.coach_id.to_string() });
        }
        insert_salary(&conn, salary)
    }
}
