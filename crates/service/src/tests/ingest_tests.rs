#![expect(clippy::unwrap_used, reason = "test code")]

use std::io::Write as _;

use coachdb_core::{EnrichedImportOptions, SchoolQuery};

use super::{create_test_services, seed_staff};
use crate::ServiceError;

fn write_json(dir: &tempfile::TempDir, name: &str, value: &serde_json::Value) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(value.to_string().as_bytes()).unwrap();
    path
}

#[tokio::test]
async fn usa_today_file_import() {
    let (services, _storage, temp_dir) = create_test_services();
    let path = write_json(
        &temp_dir,
        "usatoday.json",
        &serde_json::json!({"coaches": [
            {"school": "Georgia", "conference": "SEC", "coach": "Kirby Smart", "totalPay": 13282580},
            {"school": "Ohio State", "conference": "Big Ten", "coach": "Ryan Day", "totalPay": 12500000}
        ]}),
    );

    let counts = services.ingest.import_usa_today_file(&path, Some(2025)).await.unwrap();

    assert_eq!(counts.schools_created, 2);
    assert_eq!(counts.salaries_inserted, 2);
    let big_ten = SchoolQuery { conference: Some("Big 10".to_owned()), year: Some(2025), ..Default::default() };
    let schools = services.catalog.schools(big_ten).await.unwrap();
    assert_eq!(schools[0].head_coach.as_deref(), Some("Ryan Day"));
}

#[tokio::test]
async fn staff_file_import_skips_metadata() {
    let (services, _storage, temp_dir) = create_test_services();
    let path = write_json(
        &temp_dir,
        "staff.json",
        &serde_json::json!({
            "_generated": "2025-02-01",
            "georgia": {"head_coach": "Kirby Smart", "scraped_at": "2025-02-01",
                        "coaches": [{"name": "Mike Bobo", "position": "Offensive Coordinator"}]}
        }),
    );

    let counts = services.ingest.import_staff_file(&path, Some(2025)).await.unwrap();

    assert_eq!(counts.schools_created, 1);
    assert_eq!(counts.coaches_inserted, 2);
}

#[tokio::test]
async fn enriched_files_attach_coordinator_pay() {
    let (services, storage, temp_dir) = create_test_services();
    seed_staff(&storage, "Georgia", 2025, &[("Mike Bobo", "Offensive Coordinator"), ("Josh Crawford", "Running Backs")]);
    let state = write_json(
        &temp_dir,
        "state.json",
        &serde_json::json!({"matches": [
            {"coach": "Mike Bobo", "school": "Georgia", "position": "Offensive Coordinator",
             "baseSalary": 900000, "totalComp": 2000000, "salaryYear": 2025},
            {"coach": "Josh Crawford", "school": "Georgia", "position": "Running Backs",
             "baseSalary": 500000, "salaryYear": 2025}
        ]}),
    );

    let counts = services
        .ingest
        .import_enriched_files(Some(&state), None, EnrichedImportOptions::default())
        .await
        .unwrap();

    assert_eq!(counts.salaries_inserted, 1);
    assert_eq!(counts.unresolved, 0);
}

#[tokio::test]
async fn enriched_requires_an_input_and_reports_bad_json() {
    let (services, _storage, temp_dir) = create_test_services();

    let none = services.ingest.import_enriched_files(None, None, EnrichedImportOptions::default()).await;
    assert!(matches!(none, Err(ServiceError::InvalidInput(_))));

    let path = temp_dir.path().join("broken.json");
    std::fs::write(&path, "{not json").unwrap();
    let bad = services.ingest.import_usa_today_file(&path, Some(2025)).await;
    assert!(matches!(bad, Err(ServiceError::Serialization(_))));

    let missing = services.ingest.import_usa_today_file(&temp_dir.path().join("nope.json"), None).await;
    assert!(matches!(missing, Err(ServiceError::Io(_))));
}
