use std::fmt;

use serde::{Deserialize, Serialize};

/// Controlled vocabulary for free-text coaching titles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionCategory {
    HeadCoach,
    OffensiveCoordinator,
    DefensiveCoordinator,
    SpecialTeamsCoordinator,
    Quarterbacks,
    RunningBacks,
    WideReceivers,
    TightEnds,
    OffensiveLine,
    DefensiveLine,
    Linebackers,
    DefensiveBacks,
    StrengthConditioning,
    Analyst,
    #[default]
    Other,
}

impl PositionCategory {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::HeadCoach => "head_coach",
            Self::OffensiveCoordinator => "offensive_coordinator",
            Self::DefensiveCoordinator => "defensive_coordinator",
            Self::SpecialTeamsCoordinator => "special_teams_coordinator",
            Self::Quarterbacks => "quarterbacks",
            Self::RunningBacks => "running_backs",
            Self::WideReceivers => "wide_receivers",
            Self::TightEnds => "tight_ends",
            Self::OffensiveLine => "offensive_line",
            Self::DefensiveLine => "defensive_line",
            Self::Linebackers => "linebackers",
            Self::DefensiveBacks => "defensive_backs",
            Self::StrengthConditioning => "strength_conditioning",
            Self::Analyst => "analyst",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for PositionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `true` for a title naming the head coach itself.
///
/// "Assistant Head Coach" and "Associate Head Coach" are not head coach titles.
#[must_use]
pub fn is_head_coach_title(title: &str) -> bool {
    let lower = title.to_lowercase();
    lower.contains("head coach") && !lower.contains("assistant") && !lower.contains("associate")
}

#[must_use]
pub fn is_coordinator(title: &str) -> bool {
    title.to_lowercase().contains("coordinator")
}

fn tokens(lower: &str) -> Vec<&str> {
    lower.split(|c: char| !c.is_ascii_alphanumeric()).filter(|t| !t.is_empty()).collect()
}

fn has_abbrev(tokens: &[&str], abbrev: &str) -> bool {
    tokens.iter().any(|t| *t == abbrev || t.strip_suffix('s') == Some(abbrev))
}

/// Map a free-text title to a [`PositionCategory`].
///
/// Coordinator roles win over the position group they also coach, so
/// "Co-Offensive Coordinator/QBs" is an offensive coordinator.
#[must_use]
pub fn canonical_position(title: &str) -> PositionCategory {
    let lower = title.to_lowercase();
    let toks = tokens(&lower);
    let any = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));

    if is_head_coach_title(&lower) {
        return PositionCategory::HeadCoach;
    }
    if any(&["offensive coord", "play caller", "play-caller"]) || has_abbrev(&toks, "oc") {
        return PositionCategory::OffensiveCoordinator;
    }
    if any(&["defensive coord"]) || has_abbrev(&toks, "dc") {
        return PositionCategory::DefensiveCoordinator;
    }
    if any(&["special teams"]) || has_abbrev(&toks, "stc") {
        return PositionCategory::SpecialTeamsCoordinator;
    }
    if any(&["strength", "conditioning", "performance"]) {
        return PositionCategory::StrengthConditioning;
    }
    if any(&["analyst", "quality control"]) {
        return PositionCategory::Analyst;
    }
    if any(&["quarterback"]) || has_abbrev(&toks, "qb") {
        return PositionCategory::Quarterbacks;
    }
    if any(&["running back"]) || has_abbrev(&toks, "rb") {
        return PositionCategory::RunningBacks;
    }
    if any(&["wide receiver", "receivers"]) || has_abbrev(&toks, "wr") {
        return PositionCategory::WideReceivers;
    }
    if any(&["tight end"]) || has_abbrev(&toks, "te") {
        return PositionCategory::TightEnds;
    }
    if any(&["offensive line", "offensive tackle", "centers"]) || has_abbrev(&toks, "ol") {
        return PositionCategory::OffensiveLine;
    }
    if any(&["defensive line", "defensive tackle", "defensive end", "edge", "pass rush"])
        || has_abbrev(&toks, "dl")
    {
        return PositionCategory::DefensiveLine;
    }
    if any(&["linebacker"]) || has_abbrev(&toks, "lb") {
        return PositionCategory::Linebackers;
    }
    if any(&["defensive back", "secondary", "cornerback", "safeties", "safety"])
        || has_abbrev(&toks, "db")
        || has_abbrev(&toks, "cb")
    {
        return PositionCategory::DefensiveBacks;
    }
    PositionCategory::Other
}

/// Category of a stored coach row. The head-coach flag wins over the title,
/// and a row without a title is [`PositionCategory::Other`].
#[must_use]
pub fn position_category(position: Option<&str>, is_head_coach: bool) -> PositionCategory {
    if is_head_coach {
        return PositionCategory::HeadCoach;
    }
    position.map_or(PositionCategory::Other, canonical_position)
}

/// Offensive staff slots served to the call-sheet integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StaffSlot {
    #[serde(rename = "OC")]
    Oc,
    #[serde(rename = "OL")]
    Ol,
    #[serde(rename = "TE")]
    Te,
    #[serde(rename = "WR")]
    Wr,
    #[serde(rename = "RB")]
    Rb,
    #[serde(rename = "SC")]
    Sc,
}

impl StaffSlot {
    pub const ALL: [Self; 6] = [Self::Oc, Self::Ol, Self::Te, Self::Wr, Self::Rb, Self::Sc];

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Oc => "OC",
            Self::Ol => "OL",
            Self::Te => "TE",
            Self::Wr => "WR",
            Self::Rb => "RB",
            Self::Sc => "SC",
        }
    }

    const fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Oc => &["offensive coord", "offensive coordinator", "play caller"],
            Self::Ol => &["offensive line"],
            Self::Te => &["tight end"],
            Self::Wr => &["wide receiver", "passing coord"],
            Self::Rb => &["running back"],
            Self::Sc => &["strength", "conditioning"],
        }
    }

    /// Case-insensitive label lookup.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.label().eq_ignore_ascii_case(label.trim()))
    }

    fn matches(&self, position: &str) -> bool {
        let lower = position.to_lowercase();
        self.keywords().iter().any(|k| lower.contains(k))
    }
}

/// Fill each slot with the first staff member whose title matches it.
///
/// `staff` is `(name, position)` in the order the caller wants ties broken.
/// Slots with no match are omitted; the result follows [`StaffSlot::ALL`] order.
#[must_use]
pub fn assign_staff_slots(staff: &[(String, Option<String>)]) -> Vec<(StaffSlot, String)> {
    StaffSlot::ALL
        .into_iter()
        .filter_map(|slot| {
            staff
                .iter()
                .find(|(_, position)| position.as_deref().is_some_and(|p| slot.matches(p)))
                .map(|(name, _)| (slot, name.clone()))
        })
        .collect()
}
