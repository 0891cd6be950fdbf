//! Input shapes produced by the scrapers, and ingest counters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::coach::SalarySource;
use crate::normalize::{is_coordinator, names_match};

/// USA Today head coach salary feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UsaTodayFeed {
    #[serde(default)]
    pub coaches: Vec<UsaTodayCoach>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsaTodayCoach {
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub conference: Option<String>,
    #[serde(default)]
    pub coach: String,
    #[serde(default)]
    pub total_pay: Option<i64>,
    #[serde(default)]
    pub school_pay: Option<i64>,
    #[serde(default)]
    pub max_bonus: Option<i64>,
    #[serde(default)]
    pub bonuses_paid: Option<i64>,
    #[serde(default)]
    pub buyout: Option<i64>,
}

/// Staff roster export keyed by school slug.
///
/// Keys starting with `_` carry metadata and are skipped on import.
pub type StaffRoster = BTreeMap<String, serde_json::Value>;

/// One school's entry in a [`StaffRoster`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TeamStaff {
    #[serde(default)]
    pub head_coach: Option<String>,
    #[serde(default)]
    pub scraped_at: Option<String>,
    #[serde(default)]
    pub coaches: Vec<StaffMember>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StaffMember {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}

/// State payroll matches file: `{"matches": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StateSalaryMatches {
    #[serde(default)]
    pub matches: Vec<StateSalaryMatch>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSalaryMatch {
    #[serde(default)]
    pub coach: Option<String>,
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub base_salary: Option<i64>,
    #[serde(default)]
    pub total_comp: Option<i64>,
    #[serde(default)]
    pub salary_year: Option<i32>,
}

impl StateSalaryMatch {
    /// Total compensation, falling back to base salary.
    #[must_use]
    pub fn total_pay(&self) -> Option<i64> {
        self.total_comp.filter(|v| *v != 0).or(self.base_salary)
    }
}

/// Media salary reports file: `{"reports": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MediaSalaryReports {
    #[serde(default)]
    pub reports: Vec<MediaSalaryReport>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaSalaryReport {
    #[serde(default)]
    pub coach: Option<String>,
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub salary: Option<i64>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

/// Options for the enriched salary import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrichedImportOptions {
    pub media_year: i32,
    pub include_non_coordinators: bool,
    pub keep_media_when_state: bool,
}

/// Salary year used when a payroll match does not carry one.
pub const DEFAULT_ENRICHED_YEAR: i32 = 2025;

impl Default for EnrichedImportOptions {
    fn default() -> Self {
        Self {
            media_year: DEFAULT_ENRICHED_YEAR,
            include_non_coordinators: false,
            keep_media_when_state: false,
        }
    }
}

/// One salary figure to attach to an existing coach row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedSalary {
    pub coach: String,
    pub school: String,
    pub year: i32,
    pub total_pay: Option<i64>,
    pub school_pay: Option<i64>,
    pub source: SalarySource,
    pub source_date: Option<String>,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Merge state payroll matches and media reports into one write list.
///
/// Only coordinator titles are kept unless `include_non_coordinators` is set.
/// Payroll rows are authoritative: a media report for a coach already matched
/// in payroll at the same school is dropped unless `keep_media_when_state` is
/// set. Names are compared fuzzily, so "Bobby Petrino Jr." covers "Bobby Petrino".
/// A later payroll row for the same pair replaces an earlier one.
#[must_use]
pub fn plan_enriched_salaries(
    state: &StateSalaryMatches,
    media: &MediaSalaryReports,
    options: EnrichedImportOptions,
    today: &str,
) -> Vec<EnrichedSalary> {
    let wanted = |position: Option<&str>| {
        options.include_non_coordinators || position.is_some_and(is_coordinator)
    };

    let mut by_key: BTreeMap<(&str, &str), &StateSalaryMatch> = BTreeMap::new();
    for m in &state.matches {
        if let (Some(coach), Some(school)) = (present(m.coach.as_deref()), present(m.school.as_deref())) {
            by_key.insert((coach, school), m);
        }
    }

    let mut planned: Vec<EnrichedSalary> = by_key
        .iter()
        .filter(|(_, m)| wanted(m.position.as_deref()))
        .map(|((coach, school), m)| EnrichedSalary {
            coach: (*coach).to_owned(),
            school: (*school).to_owned(),
            year: m.salary_year.filter(|y| *y != 0).unwrap_or(DEFAULT_ENRICHED_YEAR),
            total_pay: m.total_pay(),
            school_pay: m.base_salary,
            source: SalarySource::StatePayroll,
            source_date: Some(today.to_owned()),
        })
        .collect();

    for r in &media.reports {
        let (Some(coach), Some(school)) = (present(r.coach.as_deref()), present(r.school.as_deref()))
        else {
            continue;
        };
        if !wanted(r.position.as_deref()) {
            continue;
        }
        let in_payroll = || {
            by_key.keys().any(|(paid, paid_school)| *paid_school == school && names_match(paid, coach))
        };
        if !options.keep_media_when_state && in_payroll() {
            continue;
        }
        planned.push(EnrichedSalary {
            coach: coach.to_owned(),
            school: school.to_owned(),
            year: options.media_year,
            total_pay: r.salary,
            school_pay: None,
            source: SalarySource::MediaReport,
            source_date: r.last_updated.clone(),
        });
    }
    planned
}

/// Counters reported by every import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestCounts {
    pub schools_created: u64,
    pub coaches_inserted: u64,
    pub salaries_inserted: u64,
    pub salaries_updated: u64,
    pub skipped: u64,
    pub unresolved: u64,
}

impl IngestCounts {
    pub fn merge(&mut self, other: Self) {
        self.schools_created += other.schools_created;
        self.coaches_inserted += other.coaches_inserted;
        self.salaries_inserted += other.salaries_inserted;
        self.salaries_updated += other.salaries_updated;
        self.skipped += other.skipped;
        self.unresolved += other.unresolved;
    }
}
