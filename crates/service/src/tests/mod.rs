//! Service tests against a temporary database.

use coachdb_core::NewCoach;
use coachdb_storage::Storage;
use tempfile::TempDir;

use crate::Services;

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_services() -> (Services, Storage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let storage = Storage::new(&temp_dir.path().join("test.db")).unwrap();
    (Services::new(storage.clone()), storage, temp_dir)
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn seed_staff(storage: &Storage, school: &str, year: i32, staff: &[(&str, &str)]) {
    let (school_id, _) = storage.ensure_school(school, Some("SEC")).unwrap();
    for (name, position) in staff {
        storage
            .insert_coach(&NewCoach {
                name: (*name).to_owned(),
                school_id,
                position: Some((*position).to_owned()),
                is_head_coach: *position == "Head Coach",
                year,
                scraped_at: None,
            })
            .unwrap();
    }
}

mod change_tests;
mod ingest_tests;
mod maintenance_tests;
