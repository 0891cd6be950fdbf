//! Listing queries shared by the HTTP layer, the service layer and the client.
//!
//! `year: None` means "latest season on record". Limits are capped with
//! [`CoachQuery::capped`] and friends before reaching storage.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_COACH_LIMIT, DEFAULT_SALARY_LIMIT, DEFAULT_SCHOOL_LIMIT, DEFAULT_SEARCH_LIMIT,
    MAX_COACH_LIMIT, MAX_SALARY_LIMIT, MAX_SCHOOL_LIMIT, MAX_SEARCH_LIMIT,
};
use crate::normalize::PositionCategory;

const fn default_coach_limit() -> usize {
    DEFAULT_COACH_LIMIT
}

const fn default_school_limit() -> usize {
    DEFAULT_SCHOOL_LIMIT
}

const fn default_salary_limit() -> usize {
    DEFAULT_SALARY_LIMIT
}

const fn default_search_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachQuery {
    /// School slug.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    /// Substring of the position title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<PositionCategory>,
    #[serde(default)]
    pub head_only: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default = "default_coach_limit")]
    pub limit: usize,
}

impl Default for CoachQuery {
    fn default() -> Self {
        Self {
            school: None,
            position: None,
            category: None,
            head_only: false,
            year: None,
            limit: DEFAULT_COACH_LIMIT,
        }
    }
}

impl CoachQuery {
    #[must_use]
    pub fn capped(mut self) -> Self {
        self.limit = self.limit.min(MAX_COACH_LIMIT);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolQuery {
    /// Conference abbreviation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default = "default_school_limit")]
    pub limit: usize,
}

impl Default for SchoolQuery {
    fn default() -> Self {
        Self { conference: None, year: None, limit: DEFAULT_SCHOOL_LIMIT }
    }
}

impl SchoolQuery {
    #[must_use]
    pub fn capped(mut self) -> Self {
        self.limit = self.limit.min(MAX_SCHOOL_LIMIT);
        self
    }
}

/// Ordering of the salary listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalarySort {
    #[default]
    TotalPay,
    /// Biggest buyouts first; rows without a buyout are left out.
    Buyout,
}

impl SalarySort {
    fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_pay: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "SalarySort::is_default")]
    pub sort: SalarySort,
    #[serde(default = "default_salary_limit")]
    pub limit: usize,
}

impl Default for SalaryQuery {
    fn default() -> Self {
        Self {
            min_pay: None,
            conference: None,
            year: None,
            sort: SalarySort::TotalPay,
            limit: DEFAULT_SALARY_LIMIT,
        }
    }
}

impl SalaryQuery {
    #[must_use]
    pub fn capped(mut self) -> Self {
        self.limit = self.limit.min(MAX_SALARY_LIMIT);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default = "default_search_limit")]
    pub limit: usize,
}

impl SearchQuery {
    #[must_use]
    pub fn new(q: impl Into<String>) -> Self {
        Self { q: q.into(), year: None, limit: DEFAULT_SEARCH_LIMIT }
    }

    #[must_use]
    pub fn capped(mut self) -> Self {
        self.limit = self.limit.min(MAX_SEARCH_LIMIT);
        self
    }
}
