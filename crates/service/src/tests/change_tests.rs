#![expect(clippy::unwrap_used, reason = "test code")]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use coachdb_core::SnapshotRecord;
use coachdb_storage::{SnapshotStore, StorageError};

use super::{create_test_services, seed_staff};
use crate::{ChangeService, ServiceError};

/// In-memory snapshots keyed by season.
struct FixedSnapshots(HashMap<i32, Vec<SnapshotRecord>>);

#[async_trait]
impl SnapshotStore for FixedSnapshots {
    async fn load_snapshot(&self, year: i32) -> Result<Vec<SnapshotRecord>, StorageError> {
        if year < 0 {
            return Err(StorageError::Migration("no such season".to_owned()));
        }
        Ok(self.0.get(&year).cloned().unwrap_or_default())
    }
}

fn rec(school_slug: &str, name: &str, position: &str) -> SnapshotRecord {
    SnapshotRecord::new(name, school_slug.to_uppercase(), school_slug, Some(position), false)
}

#[tokio::test]
async fn diff_labels_years_and_detects_moves() {
    let service = ChangeService::new(Arc::new(FixedSnapshots(HashMap::from([
        (2024, vec![rec("texas", "Jane Doe", "Defensive Coordinator"), rec("lsu", "Sam Roe", "Quarterbacks")]),
        (2025, vec![rec("texas", "Jane Doe", "Co-Defensive Coordinator"), rec("ucla", "Sam Roe", "Quarterbacks")]),
    ]))));

    let report = service.diff(2024, 2025).await.unwrap();

    assert_eq!((report.from, report.to), (2024, 2025));
    assert_eq!(report.promotions.len(), 1);
    assert_eq!(report.new_hires[0].change.school_slug, "ucla");
    assert_eq!(report.departures[0].change.school_slug, "lsu");
    assert_eq!(report.moves.len(), 1);
    assert_eq!(report.moves[0].change.to_school_slug, "ucla");
}

#[tokio::test]
async fn missing_seasons_diff_to_nothing() {
    let service = ChangeService::new(Arc::new(FixedSnapshots(HashMap::new())));

    let report = service.diff(1990, 1991).await.unwrap();

    assert!(report.new_hires.is_empty() && report.departures.is_empty());
    assert!(report.data_quality.is_clean());
}

#[tokio::test]
async fn data_quality_issues_reach_the_report() {
    let service = ChangeService::new(Arc::new(FixedSnapshots(HashMap::from([
        (2024, vec![rec("texas", "Jane Doe", "Defensive Coordinator")]),
        (2025, vec![rec("texas", "Jane Doe", "Defensive Coordinator"), rec("texas", " ", "Tight Ends")]),
    ]))));

    let report = service.diff(2024, 2025).await.unwrap();

    assert_eq!(report.data_quality.malformed, 1);
    assert!(report.new_hires.is_empty() && report.departures.is_empty());
    assert_eq!(report.alert_count(), 0);
}

#[tokio::test]
async fn storage_errors_propagate() {
    let service = ChangeService::new(Arc::new(FixedSnapshots(HashMap::new())));

    let err = service.diff(-1, 2025).await.unwrap_err();

    assert!(matches!(err, ServiceError::Storage(_)));
}

#[tokio::test]
async fn diff_over_real_storage() {
    let (services, storage, _temp_dir) = create_test_services();
    seed_staff(&storage, "Georgia", 2024, &[("Kirby Smart", "Head Coach"), ("Todd Monken", "Offensive Coordinator")]);
    seed_staff(&storage, "Georgia", 2025, &[("Kirby Smart", "Head Coach"), ("Mike Bobo", "Offensive Coordinator")]);

    let report = services.changes.diff(2024, 2025).await.unwrap();

    assert_eq!(report.new_hires.len(), 1);
    assert_eq!(report.new_hires[0].change.name, "Mike Bobo");
    assert_eq!(report.departures[0].change.name, "Todd Monken");
    assert!(report.promotions.is_empty());
    // Georgia is SEC
    assert!(report.new_hires[0].alert && report.departures[0].alert);

    let same = services.changes.diff(2025, 2025).await.unwrap();
    assert!(same.new_hires.is_empty() && same.departures.is_empty() && same.promotions.is_empty());
}
