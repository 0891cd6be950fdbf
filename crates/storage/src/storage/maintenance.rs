//! Data repair passes. Dry runs execute the same statements and roll back.

use coachdb_core::normalize::repair_concatenated_name;
use coachdb_core::{DedupReport, DuplicateGroup, NameRepair, SchoolMerge, SchoolMergeReport};
use rusqlite::{Connection, params};

use super::{Storage, get_conn, log_row_error, school_id_by_slug};
use crate::error::StorageError;

fn merge_school(conn: &Connection, merge: &SchoolMerge) -> Result<SchoolMergeReport, StorageError> {
    let keep_id = school_id_by_slug(conn, &merge.keep_slug)?
        .ok_or_else(|| StorageError::NotFound { entity: "school", id: merge.keep_slug.clone() })?;
    let drop_id = school_id_by_slug(conn, &merge.drop_slug)?
        .ok_or_else(|| StorageError::NotFound { entity: "school", id: merge.drop_slug.clone() })?;

    let coaches_moved = conn.execute(
        "UPDATE coaches SET school_id = ?1 WHERE school_id = ?2",
        params![keep_id, drop_id],
    )?;
    let salary_sources_moved = conn.execute(
        "UPDATE salary_sources SET school_id = ?1 WHERE school_id = ?2",
        params![keep_id, drop_id],
    )?;
    conn.execute(
        "UPDATE coaching_trees SET school_id = ?1 WHERE school_id = ?2",
        params![keep_id, drop_id],
    )?;
    conn.execute("DELETE FROM schools WHERE id = ?1", params![drop_id])?;

    Ok(SchoolMergeReport {
        keep_slug: merge.keep_slug.clone(),
        drop_slug: merge.drop_slug.clone(),
        coaches_moved: coaches_moved as u64,
        salary_sources_moved: salary_sources_moved as u64,
    })
}

fn repair_names(conn: &Connection) -> Result<Vec<NameRepair>, StorageError> {
    let mut stmt = conn.prepare("SELECT id, name FROM coaches ORDER BY id")?;
    let repairs: Vec<NameRepair> = stmt
        .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?
        .filter_map(log_row_error)
        .filter_map(|(coach_id, from)| {
            let to = repair_concatenated_name(&from);
            (to != from).then_some(NameRepair { coach_id, from, to })
        })
        .collect();

    for repair in &repairs {
        conn.execute("UPDATE coaches SET name = ?1 WHERE id = ?2", params![repair.to, repair.coach_id])?;
    }
    Ok(repairs)
}

fn remove_duplicates(conn: &Connection) -> Result<Vec<DuplicateGroup>, StorageError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, school_id, position, year
         FROM coaches
         WHERE school_id IS NOT NULL AND year IS NOT NULL
         ORDER BY name, school_id, COALESCE(position, ''), year, id",
    )?;
    let rows: Vec<(i64, String, i64, Option<String>, i32)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?)))?
        .filter_map(log_row_error)
        .collect();

    let mut groups: Vec<DuplicateGroup> = Vec::new();
    let mut current: Option<DuplicateGroup> = None;
    for (id, name, school_id, position, year) in rows {
        let same_key = current.as_ref().is_some_and(|g| {
            g.name == name
                && g.school_id == school_id
                && g.year == year
                && g.position.as_deref().unwrap_or("") == position.as_deref().unwrap_or("")
        });
        if same_key {
            if let Some(group) = current.as_mut() {
                group.removed_ids.push(id);
            }
            continue;
        }
        if let Some(done) = current.take().filter(|g| !g.removed_ids.is_empty()) {
            groups.push(done);
        }
        current = Some(DuplicateGroup { name, school_id, position, year, kept_id: id, removed_ids: Vec::new() });
    }
    if let Some(done) = current.filter(|g| !g.removed_ids.is_empty()) {
        groups.push(done);
    }

    for group in &groups {
        for removed in &group.removed_ids {
            conn.execute(
                "UPDATE salaries SET coach_id = ?1 WHERE coach_id = ?2",
                params![group.kept_id, removed],
            )?;
            conn.execute(
                "UPDATE staff_updates SET coach_id = ?1 WHERE coach_id = ?2",
                params![group.kept_id, removed],
            )?;
            conn.execute("DELETE FROM coaches WHERE id = ?1", params![removed])?;
        }
    }
    Ok(groups)
}

impl Storage {
    /// Merge duplicate schools, repair glued names, then drop duplicate coach rows.
    ///
    /// With `apply` unset the passes run inside a transaction that is rolled
    /// back, so the report shows exactly what an applied run would change.
    ///
    /// # Errors
    /// Returns `StorageError::NotFound` if a merge names an unknown slug, or a
    /// database error.
    pub fn dedup(&self, merges: &[SchoolMerge], apply: bool) -> Result<DedupReport, StorageError> {
        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction()?;

        let merges = merges.iter().map(|m| merge_school(&tx, m)).collect::<Result<Vec<_>, _>>()?;
        let name_repairs = repair_names(&tx)?;
        let duplicates = remove_duplicates(&tx)?;

        if apply {
            tx.commit()?;
        } else {
            tx.rollback()?;
        }

        let report = DedupReport { applied: apply, merges, name_repairs, duplicates };
        tracing::info!(
            applied = apply,
            merges = report.merges.len(),
            name_repairs = report.name_repairs.len(),
            duplicate_rows = report.removed_rows(),
            "Dedup finished"
        );
        Ok(report)
    }
}
