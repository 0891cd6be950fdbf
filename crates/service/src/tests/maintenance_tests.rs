#![expect(clippy::unwrap_used, reason = "test code")]

use coachdb_core::{NewSalarySource, SchoolMerge};

use super::{create_test_services, seed_staff};
use crate::ServiceError;

fn source(slug: &str, url: &str) -> NewSalarySource {
    NewSalarySource {
        school_slug: slug.to_owned(),
        source_type: "state_portal".to_owned(),
        base_url: url.to_owned(),
        query_params: None,
        parser_name: "generic_csv".to_owned(),
    }
}

#[tokio::test]
async fn dedup_dry_run_then_apply() {
    let (services, storage, _temp_dir) = create_test_services();
    seed_staff(&storage, "Mississippi", 2025, &[("Lane Kiffin", "Head Coach")]);
    seed_staff(&storage, "Ole Miss Rebels", 2025, &[("Charlie Weis Jr.", "Offensive Coordinator")]);
    let merge = SchoolMerge { keep_slug: "mississippi".to_owned(), drop_slug: "ole-miss-rebels".to_owned() };

    let preview = services.maintenance.dedup(std::slice::from_ref(&merge), false).await.unwrap();
    assert!(!preview.applied);
    assert_eq!(preview.merges[0].coaches_moved, 1);
    assert!(services.catalog.school("ole-miss-rebels", None).await.unwrap().is_some());

    let applied = services.maintenance.dedup(&[merge], true).await.unwrap();
    assert!(applied.applied);
    assert!(services.catalog.school("ole-miss-rebels", None).await.unwrap().is_none());
    let staff = services.catalog.school_staff("mississippi", None).await.unwrap().unwrap();
    assert_eq!(staff.len(), 2);
}

#[tokio::test]
async fn self_merge_is_rejected() {
    let (services, _storage, _temp_dir) = create_test_services();
    let merge = SchoolMerge { keep_slug: "pitt".to_owned(), drop_slug: "pitt".to_owned() };

    let err = services.maintenance.dedup(&[merge], true).await.unwrap_err();

    assert!(matches!(err, ServiceError::InvalidInput(_)));
}

#[tokio::test]
async fn salary_source_validation() {
    let (services, storage, _temp_dir) = create_test_services();
    seed_staff(&storage, "Georgia", 2025, &[]);

    let bad_url = services.maintenance.register_salary_source(&source("georgia", "ftp://x")).await;
    assert!(matches!(bad_url, Err(ServiceError::InvalidInput(_))));

    let unknown = services.maintenance.register_salary_source(&source("nowhere", "https://x.test")).await;
    assert!(unknown.unwrap_err().is_not_found());

    services.maintenance.register_salary_source(&source("georgia", "https://open.georgia.test")).await.unwrap();
    assert_eq!(services.maintenance.salary_sources(true).await.unwrap().len(), 1);
}
