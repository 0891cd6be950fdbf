use serde::{Deserialize, Serialize};

use crate::normalize::PositionCategory;

/// A conference row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conference {
    pub id: i64,
    pub abbrev: String,
    pub name: String,
    pub division: String,
}

/// A school with its conference abbreviation resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct School {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub conference: Option<String>,
}

/// School listing row: the school plus its head coach and staff size for one season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolSummary {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub conference: Option<String>,
    pub head_coach: Option<String>,
    pub staff_count: u32,
}

/// One coach row as served by the API, joined with school, conference and
/// the most recent salary recorded for the same season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coach {
    pub id: i64,
    pub name: String,
    pub school: Option<String>,
    pub school_slug: Option<String>,
    pub position: Option<String>,
    /// Controlled-vocabulary form of `position`, derived when the row is read.
    #[serde(default)]
    pub category: PositionCategory,
    pub is_head_coach: bool,
    pub year: Option<i32>,
    pub conference: Option<String>,
    pub total_pay: Option<i64>,
    pub salary_year: Option<i32>,
    pub salary_school_pay: Option<i64>,
    pub salary_source: Option<String>,
    pub salary_source_date: Option<String>,
}

/// School detail: the school and its staff for one season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolDetail {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub conference: Option<String>,
    pub year: i32,
    pub staff: Vec<Coach>,
}

/// Head coach salary listing row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRow {
    pub coach_name: String,
    pub school: String,
    pub total_pay: Option<i64>,
    pub school_pay: Option<i64>,
    pub max_bonus: Option<i64>,
    pub buyout: Option<i64>,
}

/// Where a salary figure came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalarySource {
    UsaToday,
    StatePayroll,
    MediaReport,
    Webhook,
    #[serde(untagged)]
    Other(String),
}

impl SalarySource {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::UsaToday => "usa_today",
            Self::StatePayroll => "state_payroll",
            Self::MediaReport => "media_report",
            Self::Webhook => "webhook",
            Self::Other(s) => s.as_str(),
        }
    }
}

impl std::str::FromStr for SalarySource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "usa_today" => Self::UsaToday,
            "state_payroll" => Self::StatePayroll,
            "media_report" => Self::MediaReport,
            "webhook" => Self::Webhook,
            other => Self::Other(other.to_owned()),
        })
    }
}

impl std::fmt::Display for SalarySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Salary figures to record against a coach row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSalary {
    pub coach_id: i64,
    pub year: i32,
    pub total_pay: Option<i64>,
    pub school_pay: Option<i64>,
    pub max_bonus: Option<i64>,
    pub bonuses_paid: Option<i64>,
    pub buyout: Option<i64>,
    pub source: SalarySource,
    pub source_date: Option<String>,
}

/// A coach row to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCoach {
    pub name: String,
    pub school_id: i64,
    pub position: Option<String>,
    pub is_head_coach: bool,
    pub year: i32,
    pub scraped_at: Option<String>,
}

/// Search hit for the name search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: i64,
    pub name: String,
    pub school: Option<String>,
    pub position: Option<String>,
    #[serde(default)]
    pub category: PositionCategory,
    pub is_head_coach: bool,
}

/// Row counts for one season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbStats {
    pub year: i32,
    pub schools: u64,
    pub head_coaches: u64,
    pub assistants: u64,
    pub salaries: u64,
}

/// Seasons present in the coaches table, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonYears {
    pub years: Vec<i32>,
    pub latest: Option<i32>,
}

impl SeasonYears {
    #[must_use]
    pub fn new(years: Vec<i32>) -> Self {
        let latest = years.first().copied();
        Self { years, latest }
    }
}

/// Registered payroll portal for a school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalarySourceEntry {
    pub id: i64,
    pub school_id: i64,
    pub source_type: String,
    pub base_url: String,
    pub query_params: Option<String>,
    pub parser_name: String,
    pub last_scraped: Option<String>,
    pub active: bool,
}

/// A payroll portal to register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSalarySource {
    pub school_slug: String,
    pub source_type: String,
    pub base_url: String,
    #[serde(default)]
    pub query_params: Option<String>,
    pub parser_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salary_source_round_trips_known_and_free_text() {
        for raw in ["usa_today", "state_payroll", "media_report", "webhook", "foia_request"] {
            let parsed: SalarySource = raw.parse().unwrap();
            assert_eq!(parsed.as_str(), raw);
        }
        assert_eq!("state_payroll".parse::<SalarySource>().unwrap(), SalarySource::StatePayroll);
    }

    #[test]
    fn season_years_latest_is_first() {
        let years = SeasonYears::new(vec![2025, 2024, 2023]);
        assert_eq!(years.latest, Some(2025));
        assert_eq!(SeasonYears::new(Vec::new()).latest, None);
    }
}
