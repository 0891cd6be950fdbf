//! Normalization of scraped names, titles and school labels.
//!
//! All functions here are pure. Storage and ingest call them before
//! comparing or writing records so that the same coach, school or role
//! spelled two ways lands on one canonical value.

mod name;
mod position;
mod school;

pub use name::{
    last_first_to_first_last, name_similarity, names_match, normalize_name,
    repair_concatenated_name,
};
pub use position::{
    PositionCategory, StaffSlot, assign_staff_slots, canonical_position, is_coordinator,
    is_head_coach_title, position_category,
};
pub use school::{ConferenceInfo, conference_info, is_power_four, school_slug, title_case_slug};
