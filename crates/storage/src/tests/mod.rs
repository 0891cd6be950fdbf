//! Test utilities and module declarations for storage tests.

use coachdb_core::{NewCoach, NewSalary, SalarySource};
use tempfile::TempDir;

use crate::Storage;

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_storage() -> (Storage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let storage = Storage::new(&db_path).unwrap();
    (storage, temp_dir)
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn seed_school(storage: &Storage, name: &str, conference: &str) -> i64 {
    storage.ensure_school(name, Some(conference)).unwrap().0
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn seed_coach(
    storage: &Storage,
    school_id: i64,
    name: &str,
    position: Option<&str>,
    is_head_coach: bool,
    year: i32,
) -> i64 {
    storage
        .insert_coach(&NewCoach {
            name: name.to_owned(),
            school_id,
            position: position.map(str::to_owned),
            is_head_coach,
            year,
            scraped_at: None,
        })
        .unwrap()
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn seed_salary(storage: &Storage, coach_id: i64, year: i32, total_pay: i64, source: SalarySource) -> i64 {
    storage
        .insert_salary(&NewSalary {
            coach_id,
            year,
            total_pay: Some(total_pay),
            school_pay: Some(total_pay),
            max_bonus: None,
            bonuses_paid: None,
            buyout: None,
            source,
            source_date: Some(format!("{year}-09-01")),
        })
        .unwrap()
}

/// Ids of the rows created by [`seed_league`].
pub struct League {
    pub georgia: i64,
    pub alabama: i64,
    pub smart_2024: i64,
    pub smart_2025: i64,
    pub bobo: i64,
    pub schumann: i64,
    pub deboer: i64,
    pub day: i64,
}

/// Three schools over two seasons.
///
/// 2024: Smart (Georgia HC, paid), Saban (Alabama HC).
/// 2025: Smart, Bobo (OC, paid), Schumann (DC) at Georgia; DeBoer (Alabama
/// HC, paid); Day (Ohio State HC, unpaid).
pub fn seed_league(storage: &Storage) -> League {
    let georgia = seed_school(storage, "Georgia", "SEC");
    let alabama = seed_school(storage, "Alabama", "SEC");
    let ohio_state = seed_school(storage, "Ohio State", "Big Ten");

    let smart_2024 = seed_coach(storage, georgia, "Kirby Smart", Some("Head Coach"), true, 2024);
    seed_coach(storage, alabama, "Nick Saban", Some("Head Coach"), true, 2024);
    seed_salary(storage, smart_2024, 2024, 12_000_000, SalarySource::UsaToday);

    let smart_2025 = seed_coach(storage, georgia, "Kirby Smart", Some("Head Coach"), true, 2025);
    let bobo = seed_coach(storage, georgia, "Mike Bobo", Some("Offensive Coordinator"), false, 2025);
    let schumann =
        seed_coach(storage, georgia, "Glenn Schumann", Some("Defensive Coordinator"), false, 2025);
    let deboer = seed_coach(storage, alabama, "Kalen DeBoer", Some("Head Coach"), true, 2025);
    let day = seed_coach(storage, ohio_state, "Ryan Day", Some("Head Coach"), true, 2025);
    seed_salary(storage, smart_2025, 2025, 13_282_580, SalarySource::UsaToday);
    seed_salary(storage, bobo, 2025, 2_000_000, SalarySource::StatePayroll);
    seed_salary(storage, deboer, 2025, 10_000_000, SalarySource::UsaToday);

    League { georgia, alabama, smart_2024, smart_2025, bobo, schumann, deboer, day }
}
