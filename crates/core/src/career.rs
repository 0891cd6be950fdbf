//! Groups a coach's per-season rows into career stints.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// One season row of a coach, as read for career grouping.
///
/// Rows are expected in `(year, school, position)` ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CareerRow {
    pub year: Option<i32>,
    pub school: Option<String>,
    pub school_slug: Option<String>,
    pub position: Option<String>,
    pub is_head_coach: bool,
}

/// A run of consecutive seasons at one school in one position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerStint {
    pub school: String,
    pub school_slug: Option<String>,
    pub position: Option<String>,
    pub start_year: i32,
    pub end_year: i32,
}

const UNKNOWN_SCHOOL: &str = "Unknown";

/// Collapse season rows into stints, newest first.
///
/// Identical rows are dropped, rows without a year are skipped, and a row
/// extends the open stint only when it is the next season at the same school
/// and position.
#[must_use]
pub fn build_career(rows: &[CareerRow]) -> Vec<CareerStint> {
    let mut seen = HashSet::new();
    let mut stints: Vec<CareerStint> = Vec::new();
    let mut current: Option<CareerStint> = None;

    for row in rows {
        let key = (
            row.year,
            row.school_slug.as_deref(),
            row.school.as_deref(),
            row.position.as_deref(),
            row.is_head_coach,
        );
        if !seen.insert(key) {
            continue;
        }
        let Some(year) = row.year else {
            continue;
        };
        let school = row.school.as_deref().unwrap_or(UNKNOWN_SCHOOL);

        if let Some(open) = current.as_mut() {
            let same_place = open.school_slug == row.school_slug
                && open.school == school
                && open.position == row.position;
            if same_place && year == open.end_year + 1 {
                open.end_year = year;
                continue;
            }
        }
        if let Some(done) = current.take() {
            stints.push(done);
        }
        current = Some(CareerStint {
            school: school.to_owned(),
            school_slug: row.school_slug.clone(),
            position: row.position.clone(),
            start_year: year,
            end_year: year,
        });
    }
    stints.extend(current);

    stints.sort_by(|a, b| (b.end_year, b.start_year).cmp(&(a.end_year, a.start_year)));
    stints
}
