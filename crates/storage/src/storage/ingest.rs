//! Bulk imports. Each import runs in a single transaction.

use coachdb_core::normalize::{
    is_head_coach_title, last_first_to_first_last, name_similarity, school_slug, title_case_slug,
};
use coachdb_core::{
    EnrichedSalary, IngestCounts, NAME_MATCH_THRESHOLD, NewCoach, NewSalary, SalarySource,
    TeamStaff, UsaTodayFeed,
};
use rusqlite::{Connection, OptionalExtension as _, params};

use super::coaches::{find_coach_row, insert_coach_row};
use super::salaries::{insert_salary, salary_exists, upsert_salary};
use super::schools::{ensure_school, resolve_school};
use super::{Storage, get_conn, log_row_error};
use crate::error::StorageError;

const HEAD_COACH_POSITION: &str = "Head Coach";

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Coach row at a school for a season, head coach rows and newer rows first.
fn coach_at_school(
    conn: &Connection,
    school_id: i64,
    name: &str,
    year: i32,
) -> Result<Option<i64>, StorageError> {
    Ok(conn
        .query_row(
            "SELECT id FROM coaches
             WHERE school_id = ?1 AND name = ?2 AND year = ?3
             ORDER BY is_head_coach DESC, id DESC
             LIMIT 1",
            params![school_id, name, year],
            |row| row.get(0),
        )
        .optional()?)
}

fn has_head_coach(conn: &Connection, school_id: i64, year: i32) -> Result<bool, StorageError> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT id FROM coaches WHERE school_id = ?1 AND year = ?2 AND is_head_coach = 1 LIMIT 1",
            params![school_id, year],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Best fuzzy match among every coach ever recorded at the school.
fn fuzzy_coach(conn: &Connection, school_id: i64, name: &str) -> Result<Option<i64>, StorageError> {
    let mut stmt = conn.prepare("SELECT id, name FROM coaches WHERE school_id = ?1 ORDER BY id")?;
    let candidates: Vec<(i64, String)> = stmt
        .query_map(params![school_id], |row| Ok((row.get(0)?, row.get(1)?)))?
        .filter_map(log_row_error)
        .collect();

    let mut best: Option<(i64, f64)> = None;
    for (id, candidate) in candidates {
        let score = name_similarity(name, &candidate);
        if score >= NAME_MATCH_THRESHOLD && best.is_none_or(|(_, s)| score > s) {
            best = Some((id, score));
        }
    }
    Ok(best.map(|(id, _)| id))
}

fn import_feed(conn: &Connection, feed: &UsaTodayFeed, year: i32) -> Result<IngestCounts, StorageError> {
    let mut counts = IngestCounts::default();
    let today = chrono::Local::now().date_naive().to_string();

    for entry in &feed.coaches {
        let (Some(school), Some(raw_name)) =
            (trimmed(Some(&entry.school)), trimmed(Some(&entry.coach)))
        else {
            counts.skipped += 1;
            continue;
        };
        let name = last_first_to_first_last(raw_name);
        let slug = school_slug(school);
        let (school_id, created) = ensure_school(conn, &slug, school, entry.conference.as_deref())?;
        if created {
            counts.schools_created += 1;
        }

        let coach_id = match coach_at_school(conn, school_id, &name, year)? {
            Some(id) => id,
            None => {
                counts.coaches_inserted += 1;
                insert_coach_row(
                    conn,
                    &NewCoach {
                        name: name.clone(),
                        school_id,
                        position: Some(HEAD_COACH_POSITION.to_owned()),
                        is_head_coach: true,
                        year,
                        scraped_at: None,
                    },
                )?
            },
        };

        let inserted = upsert_salary(
            conn,
            &NewSalary {
                coach_id,
                year,
                total_pay: entry.total_pay,
                school_pay: entry.school_pay,
                max_bonus: entry.max_bonus,
                bonuses_paid: entry.bonuses_paid,
                buyout: entry.buyout,
                source: SalarySource::UsaToday,
                source_date: Some(today.clone()),
            },
        )?;
        if inserted {
            counts.salaries_inserted += 1;
        } else {
            counts.salaries_updated += 1;
        }
    }
    Ok(counts)
}

fn import_roster(
    conn: &Connection,
    roster: &[(String, TeamStaff)],
    year: i32,
) -> Result<IngestCounts, StorageError> {
    let mut counts = IngestCounts::default();

    for (key, team) in roster {
        if key.starts_with('_') {
            continue;
        }
        // Scraper keys use short forms ("ole-miss"); store under the canonical slug.
        let slug = school_slug(key);
        let (school_id, created) = ensure_school(conn, &slug, &title_case_slug(&slug), None)?;
        if created {
            counts.schools_created += 1;
        }
        let scraped_at = trimmed(team.scraped_at.as_deref()).map(str::to_owned);

        if let Some(head) = trimmed(team.head_coach.as_deref()) {
            if has_head_coach(conn, school_id, year)? {
                counts.skipped += 1;
            } else {
                insert_coach_row(
                    conn,
                    &NewCoach {
                        name: head.to_owned(),
                        school_id,
                        position: Some(HEAD_COACH_POSITION.to_owned()),
                        is_head_coach: true,
                        year,
                        scraped_at: scraped_at.clone(),
                    },
                )?;
                counts.coaches_inserted += 1;
            }
        }

        for member in &team.coaches {
            let (Some(name), Some(position)) =
                (trimmed(member.name.as_deref()), trimmed(member.position.as_deref()))
            else {
                counts.skipped += 1;
                continue;
            };
            // Head coach comes from `head_coach`; skip the repeat in the list.
            if is_head_coach_title(position) || position.eq_ignore_ascii_case(HEAD_COACH_POSITION) {
                counts.skipped += 1;
                continue;
            }
            if find_coach_row(conn, school_id, name, Some(position), year)?.is_some() {
                counts.skipped += 1;
                continue;
            }
            insert_coach_row(
                conn,
                &NewCoach {
                    name: name.to_owned(),
                    school_id,
                    position: Some(position.to_owned()),
                    is_head_coach: false,
                    year,
                    scraped_at: scraped_at.clone(),
                },
            )?;
            counts.coaches_inserted += 1;
        }
    }
    Ok(counts)
}

fn import_enriched(conn: &Connection, salaries: &[EnrichedSalary]) -> Result<IngestCounts, StorageError> {
    let mut counts = IngestCounts::default();

    for planned in salaries {
        let Some((school_id, _)) = resolve_school(conn, &planned.school)? else {
            tracing::debug!(school = %planned.school, "Enriched salary: school not found");
            counts.unresolved += 1;
            continue;
        };
        let Some(coach_id) = fuzzy_coach(conn, school_id, &planned.coach)? else {
            tracing::debug!(coach = %planned.coach, school = %planned.school, "Enriched salary: coach not found");
            counts.unresolved += 1;
            continue;
        };
        if salary_exists(conn, coach_id, planned.year, &planned.source)? {
            counts.skipped += 1;
            continue;
        }
        insert_salary(
            conn,
            &NewSalary {
                coach_id,
                year: planned.year,
                total_pay: planned.total_pay,
                school_pay: planned.school_pay,
                max_bonus: None,
                bonuses_paid: None,
                buyout: None,
                source: planned.source.clone(),
                source_date: planned.source_date.clone(),
            },
        )?;
        counts.salaries_inserted += 1;
    }
    Ok(counts)
}

impl Storage {
    /// Import the USA Today head coach salary feed for `year`.
    ///
    /// Creates missing schools and head coach rows, then overwrites or inserts
    /// the `usa_today` salary for each coach.
    ///
    /// # Errors
    /// Returns error if any write fails; nothing is committed in that case.
    pub fn import_usa_today(&self, feed: &UsaTodayFeed, year: i32) -> Result<IngestCounts, StorageError> {
        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction()?;
        let counts = import_feed(&tx, feed, year)?;
        tx.commit()?;
        Ok(counts)
    }

    /// Import scraped staff rosters keyed by school slug.
    ///
    /// # Errors
    /// Returns error if any write fails; nothing is committed in that case.
    pub fn import_staff_roster(
        &self,
        roster: &[(String, TeamStaff)],
        year: i32,
    ) -> Result<IngestCounts, StorageError> {
        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction()?;
        let counts = import_roster(&tx, roster, year)?;
        tx.commit()?;
        Ok(counts)
    }

    /// Attach planned salary figures to existing coach rows.
    ///
    /// Schools resolve by name or slug and coaches by fuzzy name among every
    /// row at the school. Unresolved rows are counted, not errors.
    ///
    /// # Errors
    /// Returns error if any write fails; nothing is committed in that case.
    pub fn import_enriched_salaries(
        &self,
        salaries: &[EnrichedSalary],
    ) -> Result<IngestCounts, StorageError> {
        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction()?;
        let counts = import_enriched(&tx, salaries)?;
        tx.commit()?;
        Ok(counts)
    }
}
