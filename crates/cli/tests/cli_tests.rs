use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn coachdb(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("coachdb").unwrap();
    cmd.env("COACHDB_DB_PATH", temp_dir.path().join("coaches.db")).env("RUST_LOG", "warn");
    cmd
}

fn write_file(temp_dir: &TempDir, name: &str, value: &serde_json::Value) -> std::path::PathBuf {
    let path = temp_dir.path().join(name);
    std::fs::write(&path, value.to_string()).unwrap();
    path
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("coachdb").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("College football coaching staff and salary database"));
}

#[test]
fn test_cli_serve_help() {
    let mut cmd = Command::cargo_bin("coachdb").unwrap();
    cmd.arg("serve").arg("--help").assert().success().stdout(predicate::str::contains("port"));
}

#[test]
fn test_import_then_query() {
    let temp_dir = TempDir::new().unwrap();
    let feed = write_file(
        &temp_dir,
        "usatoday.json",
        &serde_json::json!({"coaches": [
            {"school": "Georgia", "conference": "SEC", "coach": "Smart, Kirby", "totalPay": 13282580}
        ]}),
    );

    coachdb(&temp_dir)
        .args(["import-salaries", feed.to_str().unwrap(), "--year", "2025"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"salaries_inserted\": 1"));

    coachdb(&temp_dir)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"head_coaches\": 1").and(predicate::str::contains("\"year\": 2025")));

    coachdb(&temp_dir)
        .args(["search", "kirby"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Kirby Smart"));
}

#[test]
fn test_salaries_by_conference_and_buyout() {
    let temp_dir = TempDir::new().unwrap();
    let feed = write_file(
        &temp_dir,
        "usatoday.json",
        &serde_json::json!({"coaches": [
            {"school": "Georgia", "conference": "SEC", "coach": "Smart, Kirby", "totalPay": 13282580,
             "buyout": 105000000},
            {"school": "Kent State", "conference": "MAC", "coach": "Carney, Mark", "totalPay": 600000}
        ]}),
    );
    coachdb(&temp_dir).args(["import-salaries", feed.to_str().unwrap(), "--year", "2025"]).assert().success();

    coachdb(&temp_dir)
        .args(["salaries", "--power-four"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"conference\": \"SEC\"").and(predicate::str::contains("MAC").not()));

    coachdb(&temp_dir)
        .args(["salaries", "--sort", "buyout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("105000000").and(predicate::str::contains("Mark Carney").not()));
}

#[test]
fn test_changes_between_staff_imports() {
    let temp_dir = TempDir::new().unwrap();
    let old = write_file(
        &temp_dir,
        "staff_2024.json",
        &serde_json::json!({"georgia": {"head_coach": "Kirby Smart",
            "coaches": [{"name": "Todd Monken", "position": "Offensive Coordinator"}]}}),
    );
    let new = write_file(
        &temp_dir,
        "staff_2025.json",
        &serde_json::json!({"georgia": {"head_coach": "Kirby Smart",
            "coaches": [{"name": "Mike Bobo", "position": "Offensive Coordinator"}]}}),
    );
    coachdb(&temp_dir).args(["import-staff", old.to_str().unwrap(), "--year", "2024"]).assert().success();
    coachdb(&temp_dir).args(["import-staff", new.to_str().unwrap(), "--year", "2025"]).assert().success();

    coachdb(&temp_dir)
        .args(["changes", "--from", "2024", "--to", "2025"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mike Bobo").and(predicate::str::contains("Todd Monken")));
}

#[test]
fn test_short_search_fails() {
    let temp_dir = TempDir::new().unwrap();

    coachdb(&temp_dir).args(["search", "a"]).assert().failure().stderr(predicate::str::contains("invalid input"));
}

#[test]
fn test_dedup_rejects_malformed_merge() {
    let temp_dir = TempDir::new().unwrap();

    coachdb(&temp_dir).args(["dedup", "--merge", "mississippi"]).assert().failure();
}

#[test]
fn test_dedup_dry_run_reports_without_applying() {
    let temp_dir = TempDir::new().unwrap();

    coachdb(&temp_dir)
        .arg("dedup")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"applied\": false"));
}
