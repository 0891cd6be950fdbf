//! Season-over-season staff change detection.

mod detector;
#[cfg(test)]
mod detector_tests;

pub use detector::detect_changes;

use serde::{Deserialize, Serialize};

use crate::normalize::is_power_four;

/// One coach row of a season snapshot, as fed to the detector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub name: String,
    pub school: String,
    pub school_slug: String,
    pub position: Option<String>,
    pub is_head_coach: bool,
    /// Conference abbreviation of the school, when known. Not part of the key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conference: Option<String>,
}

impl SnapshotRecord {
    pub fn new(
        name: impl Into<String>,
        school: impl Into<String>,
        school_slug: impl Into<String>,
        position: Option<&str>,
        is_head_coach: bool,
    ) -> Self {
        Self {
            name: name.into(),
            school: school.into(),
            school_slug: school_slug.into(),
            position: position.map(str::to_owned),
            is_head_coach,
            conference: None,
        }
    }

    #[must_use]
    pub fn with_conference(mut self, conference: Option<&str>) -> Self {
        self.conference = conference.map(str::to_owned);
        self
    }

    /// Identity key within a snapshot.
    #[must_use]
    pub fn key(&self) -> CoachKey {
        CoachKey { school_slug: self.school_slug.clone(), name: self.name.clone() }
    }

    pub(crate) fn is_malformed(&self) -> bool {
        self.name.trim().is_empty() || self.school_slug.trim().is_empty()
    }
}

/// `(school_slug, name)` identity used for diffing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CoachKey {
    pub school_slug: String,
    pub name: String,
}

/// A position change for a coach who stayed at the same school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleChange {
    pub school: String,
    pub school_slug: String,
    pub name: String,
    pub from_position: Option<String>,
    pub to_position: Option<String>,
    pub from_is_head_coach: bool,
    pub to_is_head_coach: bool,
}

impl RoleChange {
    #[must_use]
    pub fn key(&self) -> CoachKey {
        CoachKey { school_slug: self.school_slug.clone(), name: self.name.clone() }
    }
}

/// Advisory cross-school move, matched by exact name only.
///
/// Reported only when the name sits at exactly one school in each snapshot.
/// The same coach still appears as a departure and a new hire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolMove {
    pub name: String,
    pub from_school_slug: String,
    pub to_school_slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_conference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_conference: Option<String>,
}

/// Rows the detector dropped or collapsed instead of failing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataQuality {
    /// Records with a blank name or school.
    pub malformed: usize,
    /// Records collapsed because their `(school, name)` key repeated.
    pub duplicates: usize,
}

impl DataQuality {
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.malformed == 0 && self.duplicates == 0
    }
}

/// Output of [`detect_changes`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    pub new_hires: Vec<SnapshotRecord>,
    pub departures: Vec<SnapshotRecord>,
    pub promotions: Vec<RoleChange>,
    pub moves: Vec<SchoolMove>,
    pub data_quality: DataQuality,
}

impl ChangeSet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.new_hires.is_empty() && self.departures.is_empty() && self.promotions.is_empty()
    }
}

/// A reported change with its alert flag, serialized inline: the change's
/// own fields plus `"alert"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flagged<T> {
    #[serde(flatten)]
    pub change: T,
    /// Set when a Power Four school is involved.
    pub alert: bool,
}

/// Year-labelled change set, the wire shape of the changes endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeReport {
    pub from: i32,
    pub to: i32,
    pub new_hires: Vec<Flagged<SnapshotRecord>>,
    pub departures: Vec<Flagged<SnapshotRecord>>,
    pub promotions: Vec<RoleChange>,
    pub moves: Vec<Flagged<SchoolMove>>,
    pub data_quality: DataQuality,
}

fn flag_record(record: SnapshotRecord) -> Flagged<SnapshotRecord> {
    let alert = is_power_four(record.conference.as_deref());
    Flagged { change: record, alert }
}

impl ChangeReport {
    /// Label a change set with its seasons and flag Power Four entries.
    ///
    /// A move alerts when either school is Power Four.
    #[must_use]
    pub fn new(from: i32, to: i32, changes: ChangeSet) -> Self {
        let ChangeSet { new_hires, departures, promotions, moves, data_quality } = changes;
        Self {
            from,
            to,
            new_hires: new_hires.into_iter().map(flag_record).collect(),
            departures: departures.into_iter().map(flag_record).collect(),
            promotions,
            moves: moves
                .into_iter()
                .map(|m| {
                    let alert = is_power_four(m.from_conference.as_deref())
                        || is_power_four(m.to_conference.as_deref());
                    Flagged { change: m, alert }
                })
                .collect(),
            data_quality,
        }
    }

    /// Number of flagged hires, departures and moves.
    #[must_use]
    pub fn alert_count(&self) -> usize {
        self.new_hires.iter().filter(|h| h.alert).count()
            + self.departures.iter().filter(|d| d.alert).count()
            + self.moves.iter().filter(|m| m.alert).count()
    }
}
