//! Reports produced by the data repair passes.

use serde::{Deserialize, Serialize};

/// Result of folding one school into another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolMergeReport {
    pub keep_slug: String,
    pub drop_slug: String,
    pub coaches_moved: u64,
    pub salary_sources_moved: u64,
}

/// A coach name rewritten by the name repair pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRepair {
    pub coach_id: i64,
    pub from: String,
    pub to: String,
}

/// Rows sharing `(name, school, position, year)`. The lowest id is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    pub name: String,
    pub school_id: i64,
    pub position: Option<String>,
    pub year: i32,
    pub kept_id: i64,
    pub removed_ids: Vec<i64>,
}

/// Everything one `dedup` run found, and whether it was written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DedupReport {
    pub applied: bool,
    pub merges: Vec<SchoolMergeReport>,
    pub name_repairs: Vec<NameRepair>,
    pub duplicates: Vec<DuplicateGroup>,
}

impl DedupReport {
    /// Number of coach rows the duplicate pass removes.
    #[must_use]
    pub fn removed_rows(&self) -> usize {
        self.duplicates.iter().map(|g| g.removed_ids.len()).sum()
    }
}

/// `keep:drop` pair of school slugs as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolMerge {
    pub keep_slug: String,
    pub drop_slug: String,
}

impl std::str::FromStr for SchoolMerge {
    type Err = crate::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (keep, drop) = s.split_once(':').ok_or_else(|| {
            crate::CoreError::InvalidInput(format!("expected keep:drop slugs, got '{s}'"))
        })?;
        let (keep, drop) = (keep.trim(), drop.trim());
        if keep.is_empty() || drop.is_empty() || keep == drop {
            return Err(crate::CoreError::InvalidInput(format!(
                "keep and drop slugs must be distinct and non-empty, got '{s}'"
            )));
        }
        Ok(Self { keep_slug: keep.to_owned(), drop_slug: drop.to_owned() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_pair_parses() {
        let m: SchoolMerge = "mississippi:ole-miss".parse().unwrap();
        assert_eq!(m.keep_slug, "mississippi");
        assert_eq!(m.drop_slug, "ole-miss");
        assert!("mississippi".parse::<SchoolMerge>().is_err());
        assert!("pitt:pitt".parse::<SchoolMerge>().is_err());
        assert!(":pitt".parse::<SchoolMerge>().is_err());
    }

    #[test]
    fn removed_rows_sums_groups() {
        let report = DedupReport {
            duplicates: vec![
                DuplicateGroup {
                    name: "A".to_owned(),
                    school_id: 1,
                    position: None,
                    year: 2025,
                    kept_id: 1,
                    removed_ids: vec![2, 3],
                },
                DuplicateGroup {
                    name: "B".to_owned(),
                    school_id: 1,
                    position: Some("OC".to_owned()),
                    year: 2025,
                    kept_id: 4,
                    removed_ids: vec![5],
                },
            ],
            ..Default::default()
        };
        assert_eq!(report.removed_rows(), 3);
    }
}
