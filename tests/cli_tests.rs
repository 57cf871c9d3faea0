//! End-to-end tests of the `homebudget` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn homebudget(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("homebudget").unwrap();
    cmd.arg("--data-dir").arg(temp_dir.path()).env_remove("RUST_LOG");
    cmd
}

fn seeded() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    homebudget(&temp_dir).arg("init").assert().success();

    for (category, amount, date) in [
        ("Clothes", "10", "2018-01-10"),
        ("Credit Card", "-10", "2018-01-11"),
        ("Clothes", "15", "2019-01-10"),
        ("9", "-15", "2020-01-10"),
        ("Eating Out", "45", "2020-01-11"),
        ("Eating Out", "25", "2020-01-12"),
    ] {
        homebudget(&temp_dir)
            .args(["expense", "add", category, amount, "--date", date])
            .assert()
            .success();
    }

    temp_dir
}

#[test]
fn init_creates_default_categories() {
    let temp_dir = TempDir::new().unwrap();

    homebudget(&temp_dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("16 default categories"));

    homebudget(&temp_dir)
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Eating Out"))
        .stdout(predicate::str::contains("Credit Card"));

    homebudget(&temp_dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Already initialized"));
}

#[test]
fn items_report_as_csv() {
    let temp_dir = seeded();

    homebudget(&temp_dir)
        .args(["report", "items", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Expense ID,Category ID,Category,Date,Amount,Description,Balance",
        ))
        .stdout(predicate::str::contains("6,14,Eating Out,2020-01-12 00:00:00,25.00,,70.00"));
}

#[test]
fn filtered_items_report() {
    let temp_dir = seeded();

    homebudget(&temp_dir)
        .args(["report", "items", "--category", "Credit Card", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains(",-25.00"))
        .stdout(predicate::str::contains("Clothes").not());
}

#[test]
fn date_only_end_includes_that_day() {
    let temp_dir = seeded();

    homebudget(&temp_dir)
        .args([
            "report", "by-month", "--start", "2020-01-01", "--end", "2020-01-11", "--format",
            "csv",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("2020/01,5,14,Eating Out"))
        .stdout(predicate::str::contains("2020-01-12").not());
}

#[test]
fn category_month_report_terminal() {
    let temp_dir = seeded();

    homebudget(&temp_dir)
        .args(["report", "by-category-month"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Category by Month"))
        .stdout(predicate::str::contains("TOTALS"))
        .stdout(predicate::str::contains("2019/01"));
}

#[test]
fn category_report_json_to_file() {
    let temp_dir = seeded();
    let output = temp_dir.path().join("by-category.json");

    homebudget(&temp_dir)
        .args(["report", "by-category", "--format", "json", "--output"])
        .arg(&output)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json[0]["category"], "Clothes");
    assert_eq!(json[2]["total"], 7000);
}

#[test]
fn unknown_category_fails() {
    let temp_dir = seeded();

    homebudget(&temp_dir)
        .args(["expense", "add", "Yachts", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid category reference: Yachts"));

    homebudget(&temp_dir)
        .args(["report", "items", "--category", "Yachts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid category reference: Yachts"));
}

#[test]
fn category_in_use_cannot_be_deleted() {
    let temp_dir = seeded();

    homebudget(&temp_dir)
        .args(["category", "delete", "Clothes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is used by 2 expense(s)"));

    homebudget(&temp_dir)
        .args(["category", "delete", "Gifts"])
        .assert()
        .success();
}

#[test]
fn full_export_writes_json() {
    let temp_dir = seeded();
    let output = temp_dir.path().join("export.json");

    homebudget(&temp_dir)
        .args(["export", "all", "--pretty", "--output"])
        .arg(&output)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["schema_version"], "1.0.0");
    assert_eq!(json["expenses"].as_array().unwrap().len(), 6);
}
