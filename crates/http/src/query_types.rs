//! Request/query types (Deserialize)
//!
//! Listing routes deserialize the shared `coachdb_core` query structs
//! directly; the types here cover the remaining routes.

use coachdb_core::normalize::StaffSlot;
use serde::Deserialize;

const fn default_staff_update_limit() -> usize {
    50
}

const MAX_STAFF_UPDATE_LIMIT: usize = 500;

#[derive(Debug, Default, Deserialize)]
pub struct YearQuery {
    pub year: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct ChangesQuery {
    pub from: i32,
    pub to: i32,
}

#[derive(Debug, Default, Deserialize)]
pub struct YrQuery {
    pub position: Option<String>,
    pub format: Option<String>,
    pub year: Option<i32>,
}

/// One requested slot, or every slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotFilter {
    All,
    One { label: String, slot: Option<StaffSlot> },
}

impl YrQuery {
    pub fn wants_text(&self) -> bool {
        self.format.as_deref().is_some_and(|f| f.eq_ignore_ascii_case("text"))
    }

    /// Unknown labels are kept so the response can echo them with no match.
    pub fn slot_filter(&self) -> SlotFilter {
        match self.position.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            None => SlotFilter::All,
            Some(p) => SlotFilter::One { label: p.to_uppercase(), slot: StaffSlot::from_label(p) },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StaffUpdatesQuery {
    #[serde(default = "default_staff_update_limit")]
    pub limit: usize,
}

impl StaffUpdatesQuery {
    pub fn capped_limit(&self) -> usize {
        self.limit.min(MAX_STAFF_UPDATE_LIMIT)
    }
}
