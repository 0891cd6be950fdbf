use serde::Serialize;

use crate::constants::POWER_FOUR_CONFERENCES;

/// Short forms used by scrapers mapped to the canonical slug.
const SLUG_ALIASES: &[(&str, &str)] = &[
    ("app-state", "appalachian-state"),
    ("army-west-point", "army"),
    ("jax-state", "jacksonville-state"),
    ("miami-ohio", "miami-oh"),
    ("nc-state", "north-carolina-state"),
    ("niu", "northern-illinois"),
    ("ole-miss", "mississippi"),
    ("pitt", "pittsburgh"),
    ("texas-a-m", "texas-am"),
    ("uconn", "connecticut"),
    ("umass", "massachusetts"),
    ("unlv", "nevada-las-vegas"),
    ("usc", "southern-california"),
    ("wku", "western-kentucky"),
];

/// Slug for a school display name or an already-slugged label.
///
/// Lowercases, drops apostrophes, collapses every other run of
/// non-alphanumerics into `-` and applies the alias table, so
/// "Ole Miss", "ole-miss" and "Mississippi" agree.
#[must_use]
pub fn school_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.trim().chars().filter(|c| !matches!(c, '\'' | '\u{2019}')) {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    match SLUG_ALIASES.iter().find(|(alias, _)| *alias == slug) {
        Some((_, canonical)) => (*canonical).to_owned(),
        None => slug,
    }
}

/// Display name for a school known only by slug: "kent-state" -> "Kent State".
#[must_use]
pub fn title_case_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Canonical conference row for a feed label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConferenceInfo {
    pub abbrev: &'static str,
    pub name: &'static str,
    pub division: &'static str,
}

const fn conf(abbrev: &'static str, name: &'static str) -> ConferenceInfo {
    ConferenceInfo { abbrev, name, division: "FBS" }
}

const INDEPENDENTS: ConferenceInfo = conf("IND", "FBS Independents");

/// Feed label -> canonical conference. Canonical abbrevs map to themselves.
const CONFERENCES: &[(&str, ConferenceInfo)] = &[
    ("SEC", conf("SEC", "Southeastern Conference")),
    ("Big 10", conf("Big 10", "Big Ten Conference")),
    ("Big Ten", conf("Big 10", "Big Ten Conference")),
    ("Big 12", conf("Big 12", "Big 12 Conference")),
    ("ACC", conf("ACC", "Atlantic Coast Conference")),
    ("Pac-12", conf("Pac-12", "Pac-12 Conference")),
    ("AMER", conf("AAC", "American Athletic Conference")),
    ("AAC", conf("AAC", "American Athletic Conference")),
    ("American", conf("AAC", "American Athletic Conference")),
    ("MWC", conf("MWC", "Mountain West Conference")),
    ("Mountain West", conf("MWC", "Mountain West Conference")),
    ("SBC", conf("SBC", "Sun Belt Conference")),
    ("Sun Belt", conf("SBC", "Sun Belt Conference")),
    ("MAC", conf("MAC", "Mid-American Conference")),
    ("CUSA", conf("CUSA", "Conference USA")),
    ("C-USA", conf("CUSA", "Conference USA")),
    ("IndFBS", INDEPENDENTS),
    ("IND", INDEPENDENTS),
    ("Independent", INDEPENDENTS),
];

/// Resolve a conference label, case-insensitively. Unknown labels are
/// filed under the FBS independents.
#[must_use]
pub fn conference_info(raw: &str) -> ConferenceInfo {
    let raw = raw.trim();
    CONFERENCES
        .iter()
        .find(|(label, _)| label.eq_ignore_ascii_case(raw))
        .map_or(INDEPENDENTS, |(_, info)| *info)
}

/// `true` when the label resolves to a Power Four conference.
#[must_use]
pub fn is_power_four(conference: Option<&str>) -> bool {
    conference.is_some_and(|raw| POWER_FOUR_CONFERENCES.contains(&conference_info(raw).abbrev))
}
