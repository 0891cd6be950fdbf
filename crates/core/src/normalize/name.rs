use std::sync::LazyLock;

use regex::Regex;

use crate::constants::NAME_MATCH_THRESHOLD;

const NAME_SUFFIXES: &[&str] = &["jr", "sr", "ii", "iii", "iv"];

static INITIAL_THEN_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]\.\s").unwrap());

/// Lowercase letters-only form used for fuzzy matching.
///
/// Punctuation becomes a word break and generational suffixes are dropped:
/// "Bobby Petrino Jr." -> "bobby petrino".
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.split(|c: char| !c.is_alphabetic())
        .map(str::to_lowercase)
        .filter(|t| !t.is_empty() && !NAME_SUFFIXES.contains(&t.as_str()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Similarity of two names in `0.0..=1.0`, compared in normalized form.
#[must_use]
pub fn name_similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(&normalize_name(a), &normalize_name(b))
}

/// `true` when two spellings are close enough to be the same person.
#[must_use]
pub fn names_match(a: &str, b: &str) -> bool {
    name_similarity(a, b) >= NAME_MATCH_THRESHOLD
}

/// "Smart, Kirby" -> "Kirby Smart". Anything without a comma is returned as is.
#[must_use]
pub fn last_first_to_first_last(name: &str) -> String {
    match name.split_once(',') {
        Some((last, first)) if !first.trim().is_empty() => {
            format!("{} {}", first.trim(), last.trim()).trim().to_owned()
        },
        _ => name.to_owned(),
    }
}

fn squash(s: &str) -> String {
    s.to_lowercase().replace(['-', '\''], "")
}

/// Undo a sort key glued onto the first name by the roster scraper.
///
/// "Dottin-CarterDennis Dottin-Carter" -> "Dennis Dottin-Carter". The first
/// word must be long enough to be suspicious, start with a fragment of the
/// last name and continue with a capitalized first name. Ambiguous cases,
/// such as a bare initial left over, are returned unchanged.
#[must_use]
pub fn repair_concatenated_name(name: &str) -> String {
    let mut parts = name.split_whitespace();
    let (Some(first_part), rest) = (parts.next(), parts.collect::<Vec<_>>()) else {
        return name.to_owned();
    };
    let Some(last_name) = rest.last() else {
        return name.to_owned();
    };
    let chars: Vec<(usize, char)> = first_part.char_indices().collect();
    if chars.len() < 8 {
        return name.to_owned();
    }
    let last_norm = squash(last_name);

    let mut best: Option<(usize, &str)> = None;
    for i in 3..chars.len() - 1 {
        let (byte_idx, ch) = chars[i];
        if !ch.is_uppercase() {
            continue;
        }
        let prefix = squash(&first_part[..byte_idx]);
        let related = last_norm.contains(&prefix)
            || prefix.contains(&last_norm)
            || last_norm.ends_with(&prefix)
            || prefix.ends_with(&last_norm);
        if related && best.is_none_or(|(len, _)| prefix.len() > len) {
            best = Some((prefix.len(), &first_part[byte_idx..]));
        }
    }

    match best {
        Some((_, suffix)) if !INITIAL_THEN_SPACE.is_match(suffix) && suffix.chars().count() > 2 => {
            format!("{suffix} {}", rest.join(" "))
        },
        _ => name.to_owned(),
    }
}
