//! Command line tests against the built binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn subtrack(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("subtrack").unwrap();
    cmd.env("SUBTRACK_DATA_DIR", data_dir.path())
        .env_remove("SUBTRACK_LOG")
        .arg("--as-of")
        .arg("2024-05-01");
    cmd
}

fn add(data_dir: &TempDir, args: &[&str]) {
    subtrack(data_dir).arg("add").args(args).assert().success();
}

fn seed(data_dir: &TempDir) {
    add(data_dir, &["Netflix", "390", "--cycle", "monthly", "--category", "streaming", "--start", "2024-01-03"]);
    add(data_dir, &["Adobe", "1680", "--cycle", "monthly", "--category", "software", "--start", "2023-11-20"]);
    add(data_dir, &["Notion", "2190", "--cycle", "yearly", "--category", "productivity", "--start", "2023-05-06"]);
}

#[test]
fn test_init_and_config() {
    let data_dir = TempDir::new().unwrap();

    subtrack(&data_dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized Subtrack"));

    assert!(data_dir.path().join("config.json").exists());

    subtrack(&data_dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already initialized"));

    subtrack(&data_dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Reminder window:  7 days"));
}

#[test]
fn test_add_and_list() {
    let data_dir = TempDir::new().unwrap();
    seed(&data_dir);

    subtrack(&data_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Netflix"))
        .stdout(predicate::str::contains("2024-05-03 (2d)"))
        .stdout(predicate::str::contains("$2252.50 per month"));

    assert!(data_dir.path().join("data").join("subscriptions.json").exists());
}

#[test]
fn test_add_rejects_unknown_cycle() {
    let data_dir = TempDir::new().unwrap();

    subtrack(&data_dir)
        .args(["add", "Gym", "30", "--cycle", "weekly"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid billing cycle"));
}

#[test]
fn test_add_rejects_bad_start_date() {
    let data_dir = TempDir::new().unwrap();

    subtrack(&data_dir)
        .args(["add", "Gym", "30", "--start", "2024-02-30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn test_add_rejects_oversized_price() {
    let data_dir = TempDir::new().unwrap();

    subtrack(&data_dir)
        .args(["add", "Big", "1000000000000000000000000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot exceed"));

    subtrack(&data_dir)
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Active subscriptions: 0"));
}

#[test]
fn test_duplicate_add_fails() {
    let data_dir = TempDir::new().unwrap();
    add(&data_dir, &["Spotify", "149"]);

    subtrack(&data_dir)
        .args(["add", "spotify", "149"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_categories_breakdown() {
    let data_dir = TempDir::new().unwrap();
    seed(&data_dir);

    subtrack(&data_dir)
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("74.6%"))
        .stdout(predicate::str::contains("17.3%"))
        .stdout(predicate::str::contains("8.1%"));
}

#[test]
fn test_upcoming_window() {
    let data_dir = TempDir::new().unwrap();
    seed(&data_dir);

    subtrack(&data_dir)
        .arg("upcoming")
        .assert()
        .success()
        .stdout(predicate::str::contains("Netflix"))
        .stdout(predicate::str::contains("Notion"))
        .stdout(predicate::str::contains("Adobe").not());

    subtrack(&data_dir)
        .args(["upcoming", "--days", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No charges in the next 1 days."));
}

#[test]
fn test_budget_flow() {
    let data_dir = TempDir::new().unwrap();
    seed(&data_dir);

    subtrack(&data_dir)
        .args(["budget", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No monthly budget set"));

    subtrack(&data_dir)
        .args(["budget", "set", "2000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Over budget!"))
        .stdout(predicate::str::contains("$252.50 over"));

    subtrack(&data_dir)
        .args(["budget", "set", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("greater than zero"));

    subtrack(&data_dir)
        .args(["budget", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Monthly budget cleared."));
}

#[test]
fn test_pause_excludes_from_summary() {
    let data_dir = TempDir::new().unwrap();
    seed(&data_dir);

    subtrack(&data_dir).args(["pause", "adobe"]).assert().success();

    subtrack(&data_dir)
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Active subscriptions: 2 (1 paused)"))
        .stdout(predicate::str::contains("$572.50"));

    subtrack(&data_dir).args(["resume", "Adobe"]).assert().success();
    subtrack(&data_dir)
        .args(["summary", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"active_count\": 3"));
}

#[test]
fn test_remove_unknown_subscription() {
    let data_dir = TempDir::new().unwrap();

    subtrack(&data_dir)
        .args(["remove", "Nothing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Subscription not found"));
}

#[test]
fn test_csv_import_reports_bad_rows() {
    let data_dir = TempDir::new().unwrap();
    let csv_path = data_dir.path().join("subs.csv");
    std::fs::write(
        &csv_path,
        "name,price,currency,cycle,category,start_date\n\
         Netflix,390,TWD,monthly,streaming,2024-01-15\n\
         Gym,30,TWD,weekly,other,2024-01-01\n",
    )
    .unwrap();

    subtrack(&data_dir)
        .arg("import")
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 subscription(s)."))
        .stdout(predicate::str::contains("line 3"));
}

#[test]
fn test_export_and_restore() {
    let data_dir = TempDir::new().unwrap();
    seed(&data_dir);
    let backup = data_dir.path().join("backup.yaml");

    subtrack(&data_dir)
        .arg("export")
        .arg(&backup)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 3 subscription(s)"));

    let other_dir = TempDir::new().unwrap();
    subtrack(&other_dir)
        .arg("import")
        .arg(&backup)
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored 3 subscription(s)"));

    subtrack(&other_dir)
        .args(["export", "subs.csv"])
        .current_dir(other_dir.path())
        .assert()
        .success();
    let csv = std::fs::read_to_string(other_dir.path().join("subs.csv")).unwrap();
    assert!(csv.starts_with("name,price,currency,cycle"));
    assert!(csv.contains("Notion,2190,TWD,yearly,productivity,2023-05-06,true,182.50,"));
}
