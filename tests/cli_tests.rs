mod common;

use assert_cmd::Command;
use cashlog::ledger::{Category, MovementKind};
use cashlog::storage::FlatFileStore;
use common::movement;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

const BIN_NAME: &str = "cashlog";

/// Command pointed at an isolated data dir so user configuration never
/// leaks into the tests.
fn cashlog(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("CASHLOG_HOME", home.path());
    cmd
}

fn seeded_store(home: &TempDir) -> FlatFileStore {
    let store = FlatFileStore::new(home.path().join("movements.log"));
    for record in [
        movement(
            MovementKind::Profit,
            Category::Job,
            "Salary",
            100.0,
            "2024-01-05 09:00:00",
        ),
        movement(
            MovementKind::Loss,
            Category::Food,
            "Lunch",
            12.5,
            "2024-01-05 13:00:00",
        ),
        movement(
            MovementKind::Loss,
            Category::Transport,
            "Bus",
            2.5,
            "2024-01-05 18:00:00",
        ),
    ] {
        store.append(&record).expect("seed store");
    }
    store
}

#[test]
fn listing_prints_records_and_total() {
    let home = TempDir::new().unwrap();
    let store = seeded_store(&home);

    cashlog(&home)
        .arg("--file")
        .arg(store.path())
        .assert()
        .success()
        .stdout(contains("Salary"))
        .stdout(contains("Lunch"))
        .stdout(contains("-- Sum: 85.00 $"));
}

#[test]
fn category_flag_narrows_listing() {
    let home = TempDir::new().unwrap();
    let store = seeded_store(&home);

    cashlog(&home)
        .arg("--file")
        .arg(store.path())
        .args(["--category", "food"])
        .assert()
        .success()
        .stdout(contains("Lunch"))
        .stdout(contains("Salary").not())
        .stdout(contains("-- Sum: -12.50 $"));
}

#[test]
fn missing_store_lists_empty_and_succeeds() {
    let home = TempDir::new().unwrap();

    cashlog(&home)
        .arg("--file")
        .arg(home.path().join("nope.log"))
        .assert()
        .success()
        .stdout(contains("(no movements)"))
        .stdout(contains("-- Sum: 0.00 $"));
}

#[test]
fn malformed_store_line_is_reported_not_fatal() {
    let home = TempDir::new().unwrap();
    let store = seeded_store(&home);
    let mut contents = std::fs::read_to_string(store.path()).unwrap();
    contents.push_str("garbage line\n");
    std::fs::write(store.path(), contents).unwrap();

    cashlog(&home)
        .arg("--file")
        .arg(store.path())
        .assert()
        .success()
        .stdout(contains("-- Sum: 85.00 $"))
        .stderr(contains("WARNING"))
        .stderr(contains(":4:"));
}

#[test]
fn unknown_category_flag_fails_with_diagnostic() {
    let home = TempDir::new().unwrap();
    let store = seeded_store(&home);

    cashlog(&home)
        .arg("--file")
        .arg(store.path())
        .args(["--category", "groceries"])
        .assert()
        .failure()
        .stderr(contains("unknown category"));
}

#[test]
fn profits_and_losses_flags_conflict() {
    let home = TempDir::new().unwrap();

    cashlog(&home)
        .args(["--profits", "--losses"])
        .assert()
        .failure();
}
