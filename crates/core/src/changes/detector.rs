//! Classifies two season snapshots into hires, departures and role changes.

use std::collections::{BTreeSet, HashMap};

use super::{ChangeSet, CoachKey, DataQuality, RoleChange, SchoolMove, SnapshotRecord};

/// Diff the `prev` season against `cur`.
///
/// Pure and total: empty inputs produce empty lists, malformed rows are
/// counted in `data_quality` and skipped. Output lists are sorted by
/// `(school, name)` so repeated runs compare cleanly.
#[must_use]
pub fn detect_changes(prev: &[SnapshotRecord], cur: &[SnapshotRecord]) -> ChangeSet {
    let mut quality = DataQuality::default();
    let prev_map = index_snapshot(prev, &mut quality);
    let cur_map = index_snapshot(cur, &mut quality);

    let mut new_hires = Vec::new();
    let mut promotions = Vec::new();
    for (key, to_rec) in &cur_map {
        match prev_map.get(key) {
            None => new_hires.push(to_rec.clone()),
            Some(from_rec) if role_differs(from_rec, to_rec) => promotions.push(RoleChange {
                school: to_rec.school.clone(),
                school_slug: to_rec.school_slug.clone(),
                name: to_rec.name.clone(),
                from_position: from_rec.position.clone(),
                to_position: to_rec.position.clone(),
                from_is_head_coach: from_rec.is_head_coach,
                to_is_head_coach: to_rec.is_head_coach,
            }),
            Some(_) => {},
        }
    }

    let mut departures: Vec<SnapshotRecord> = prev_map
        .iter()
        .filter(|(key, _)| !cur_map.contains_key(*key))
        .map(|(_, rec)| rec.clone())
        .collect();

    new_hires.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
    departures.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
    promotions.sort_by(|a, b| {
        (&a.school, &a.name, &a.school_slug).cmp(&(&b.school, &b.name, &b.school_slug))
    });

    ChangeSet {
        new_hires,
        departures,
        promotions,
        moves: detect_moves(&prev_map, &cur_map),
        data_quality: quality,
    }
}

fn index_snapshot(
    records: &[SnapshotRecord],
    quality: &mut DataQuality,
) -> HashMap<CoachKey, SnapshotRecord> {
    let mut map: HashMap<CoachKey, SnapshotRecord> = HashMap::with_capacity(records.len());
    for rec in records {
        if rec.is_malformed() {
            quality.malformed += 1;
            continue;
        }
        let key = rec.key();
        match map.get_mut(&key) {
            None => {
                map.insert(key, rec.clone());
            },
            Some(current) => {
                quality.duplicates += 1;
                if candidate_score(rec) > candidate_score(current) {
                    *current = rec.clone();
                }
            },
        }
    }
    map
}

fn sort_key(rec: &SnapshotRecord) -> (&str, &str, &str) {
    (&rec.school, &rec.name, &rec.school_slug)
}

/// Head-coach rows win, then the more specific (longer) title.
fn candidate_score(rec: &SnapshotRecord) -> (bool, usize) {
    (rec.is_head_coach, rec.position.as_deref().map_or(0, str::len))
}

fn role_differs(from: &SnapshotRecord, to: &SnapshotRecord) -> bool {
    from.position.as_deref().unwrap_or("") != to.position.as_deref().unwrap_or("")
        || from.is_head_coach != to.is_head_coach
}

fn detect_moves(
    prev: &HashMap<CoachKey, SnapshotRecord>,
    cur: &HashMap<CoachKey, SnapshotRecord>,
) -> Vec<SchoolMove> {
    let from_by_name = schools_by_name(prev);
    let to_by_name = schools_by_name(cur);

    let mut moves: Vec<SchoolMove> = from_by_name
        .iter()
        .filter_map(|(name, from_schools)| {
            let to_schools = to_by_name.get(name)?;
            if from_schools == to_schools || from_schools.len() != 1 || to_schools.len() != 1 {
                return None;
            }
            let from_slug = *from_schools.first()?;
            let to_slug = *to_schools.first()?;
            let conference = |map: &HashMap<CoachKey, SnapshotRecord>, slug: &str| {
                let key = CoachKey { school_slug: slug.to_owned(), name: (*name).to_owned() };
                map.get(&key).and_then(|rec| rec.conference.clone())
            };
            Some(SchoolMove {
                name: (*name).to_owned(),
                from_school_slug: from_slug.to_owned(),
                to_school_slug: to_slug.to_owned(),
                from_conference: conference(prev, from_slug),
                to_conference: conference(cur, to_slug),
            })
        })
        .collect();
    moves.sort_by(|a, b| {
        (&a.name, &a.from_school_slug, &a.to_school_slug).cmp(&(
            &b.name,
            &b.from_school_slug,
            &b.to_school_slug,
        ))
    });
    moves
}

fn schools_by_name(map: &HashMap<CoachKey, SnapshotRecord>) -> HashMap<&str, BTreeSet<&str>> {
    let mut out: HashMap<&str, BTreeSet<&str>> = HashMap::new();
    for key in map.keys() {
        out.entry(key.name.as_str()).or_default().insert(key.school_slug.as_str());
    }
    out
}
