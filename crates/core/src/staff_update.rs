//! Staff change events pushed by the update monitor.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::normalize::is_head_coach_title;

/// Webhook body. Unknown fields are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaffUpdate {
    pub school: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

/// A [`StaffUpdate`] with trimmed fields and a parsed date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedStaffUpdate {
    pub school: String,
    pub name: String,
    pub position: Option<String>,
    pub is_head_coach: bool,
    pub conference: Option<String>,
    pub source_url: Option<String>,
    pub effective_date: Option<NaiveDate>,
    pub year: Option<i32>,
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned)
}

impl StaffUpdate {
    /// Check required fields and normalize the optional ones.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::MissingField` for a blank `school` or `name`, and
    /// `CoreError::InvalidInput` for an `effective_date` that is not `YYYY-MM-DD`.
    pub fn validate(&self) -> Result<ValidatedStaffUpdate, CoreError> {
        let school = self.school.trim();
        if school.is_empty() {
            return Err(CoreError::MissingField("school"));
        }
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CoreError::MissingField("name"));
        }
        let effective_date = trimmed(self.effective_date.as_deref())
            .map(|raw| {
                NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| {
                    CoreError::InvalidInput(format!(
                        "effective_date must be YYYY-MM-DD, got '{raw}'"
                    ))
                })
            })
            .transpose()?;
        let position = trimmed(self.role.as_deref());
        let is_head_coach = position.as_deref().is_some_and(is_head_coach_title);

        Ok(ValidatedStaffUpdate {
            school: school.to_owned(),
            name: name.to_owned(),
            position,
            is_head_coach,
            conference: trimmed(self.conference.as_deref()),
            source_url: trimmed(self.source_url.as_deref()),
            effective_date,
            year: self.year,
        })
    }
}

/// What the upsert did with an accepted event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertOutcome {
    Inserted,
    Updated,
    Unchanged,
}

impl UpsertOutcome {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inserted => "inserted",
            Self::Updated => "updated",
            Self::Unchanged => "unchanged",
        }
    }
}

impl std::str::FromStr for UpsertOutcome {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inserted" => Ok(Self::Inserted),
            "updated" => Ok(Self::Updated),
            "unchanged" => Ok(Self::Unchanged),
            other => Err(CoreError::InvalidInput(format!("unknown upsert outcome: {other}"))),
        }
    }
}

/// Webhook response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffUpdateResponse {
    pub outcome: UpsertOutcome,
    pub coach_id: i64,
    pub school_slug: String,
    pub year: i32,
}

/// An audited webhook event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffUpdateRecord {
    pub id: i64,
    pub school: String,
    pub name: String,
    pub role: Option<String>,
    pub conference: Option<String>,
    pub source_url: Option<String>,
    pub effective_date: Option<String>,
    pub year: i32,
    pub coach_id: Option<i64>,
    pub outcome: UpsertOutcome,
    pub received_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(school: &str, name: &str) -> StaffUpdate {
        StaffUpdate { school: school.to_owned(), name: name.to_owned(), ..Default::default() }
    }

    #[test]
    fn validate_trims_and_derives_head_coach() {
        let mut raw = update("  Georgia ", " Kirby Smart ");
        raw.role = Some(" Head Coach ".to_owned());
        raw.effective_date = Some("2025-01-15".to_owned());

        let v = raw.validate().unwrap();

        assert_eq!(v.school, "Georgia");
        assert_eq!(v.name, "Kirby Smart");
        assert_eq!(v.position.as_deref(), Some("Head Coach"));
        assert!(v.is_head_coach);
        assert_eq!(v.effective_date, NaiveDate::from_ymd_opt(2025, 1, 15));
    }

    #[test]
    fn assistant_head_coach_is_not_head_coach() {
        let mut raw = update("Georgia", "Someone");
        raw.role = Some("Assistant Head Coach/DBs".to_owned());
        assert!(!raw.validate().unwrap().is_head_coach);
    }

    #[test]
    fn blank_required_fields_are_rejected() {
        assert!(matches!(update(" ", "A B").validate(), Err(CoreError::MissingField("school"))));
        assert!(matches!(update("Iowa", "").validate(), Err(CoreError::MissingField("name"))));
    }

    #[test]
    fn bad_date_is_rejected() {
        let mut raw = update("Iowa", "A B");
        raw.effective_date = Some("01/15/2025".to_owned());
        assert!(matches!(raw.validate(), Err(CoreError::InvalidInput(_))));
    }

    #[test]
    fn blank_optional_fields_become_none() {
        let mut raw = update("Iowa", "A B");
        raw.role = Some("   ".to_owned());
        raw.effective_date = Some(String::new());
        let v = raw.validate().unwrap();
        assert_eq!(v.position, None);
        assert_eq!(v.effective_date, None);
    }

    #[test]
    fn unknown_fields_fail_to_deserialize() {
        let err = serde_json::from_str::<StaffUpdate>(
            r#"{"school": "Iowa", "name": "A B", "salary": 5}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn outcome_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&UpsertOutcome::Unchanged).unwrap(), "\"unchanged\"");
        assert_eq!("updated".parse::<UpsertOutcome>().unwrap(), UpsertOutcome::Updated);
    }
}
