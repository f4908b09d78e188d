use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tally(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.env("TALLY_DATA_DIR", dir.path()).env_remove("TALLY_LOG");
    cmd
}

fn stored_ids(dir: &TempDir) -> Vec<String> {
    let store = fs::read_to_string(dir.path().join("data").join("store.json")).unwrap();
    let store: serde_json::Value = serde_json::from_str(&store).unwrap();
    let records: serde_json::Value =
        serde_json::from_str(store["finance:data"].as_str().unwrap()).unwrap();
    records
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn add_then_list() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["add", "Lunch", "12.50", "-c", "Food", "-d", "2024-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added record: txn_001_"));

    tally(&dir)
        .args(["list", "--no-highlight"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lunch"))
        .stdout(predicate::str::contains("12.50 $"));
}

#[test]
fn invalid_add_is_rejected() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["add", "coffee coffee", "0", "-c", "Food", "-d", "2024-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate words"))
        .stderr(predicate::str::contains("Enter a valid amount"));

    tally(&dir)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No records found matching current filter/search criteria.",
        ));
}

#[test]
fn search_reports_matches_and_invalid_patterns() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["add", "Coffee beans", "8", "-c", "Food", "-d", "2024-01-02"])
        .assert()
        .success();
    tally(&dir)
        .args(["add", "Bus fare", "2.50", "-c", "Transport", "-d", "2024-01-03"])
        .assert()
        .success();

    tally(&dir)
        .args(["list", "-S", "food", "-i", "--no-highlight"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Valid pattern - 1 match(es) found"))
        .stdout(predicate::str::contains("Coffee beans"))
        .stdout(predicate::str::contains("Bus fare").not());

    tally(&dir)
        .args(["list", "-S", "("])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Invalid regex pattern. Please check syntax.",
        ))
        .stdout(predicate::str::contains("Bus fare"));
}

#[test]
fn edit_and_delete() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["add", "Lunch", "10", "-c", "Food", "-d", "2024-01-01"])
        .assert()
        .success();
    let id = stored_ids(&dir).remove(0);

    tally(&dir)
        .args(["edit", &id, "-a", "0", "-c", "Dining Out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[Dining Out] 10.00"));

    tally(&dir)
        .args(["delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Use --force to confirm deletion"));
    assert_eq!(stored_ids(&dir).len(), 1);

    tally(&dir)
        .args(["delete", &id, "--force"])
        .assert()
        .success();
    assert!(stored_ids(&dir).is_empty());

    tally(&dir)
        .args(["show", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Record not found"));
}

#[test]
fn settings_and_dashboard() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["settings", "currency", "RWF"])
        .assert()
        .success();
    tally(&dir)
        .args(["settings", "cap", "100"])
        .assert()
        .success();
    tally(&dir)
        .args(["add", "Rent", "101", "-c", "Housing", "-d", "2024-01-01"])
        .assert()
        .success();

    tally(&dir)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("Top Category:   Housing"))
        .stdout(predicate::str::contains(
            "Budget EXCEEDED! You are 1300.00 Fr over your cap of 100.00 $.",
        ));

    tally(&dir)
        .args(["settings", "currency", "EUR"])
        .assert()
        .failure();
}

#[test]
fn import_and_export() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("import.json");

    fs::write(&file, r#"{"not":"an array"}"#).unwrap();
    tally(&dir)
        .arg("import")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Ensure that the file contents are JSON arrays.",
        ));

    fs::write(
        &file,
        r#"[{"id":"x","description":"a","amount":5,"category":"Food",
            "date":"2024-01-01","createdAt":"t","updatedAt":"t"}]"#,
    )
    .unwrap();
    tally(&dir)
        .arg("import")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Import success. You have added 1 records.",
        ));

    let ids = stored_ids(&dir);
    assert_eq!(ids.len(), 1);
    assert_ne!(ids[0], "x");

    tally(&dir)
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"description\": \"a\""));
}

#[test]
fn audit_log_records_changes() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["add", "Lunch", "10", "-c", "Food", "-d", "2024-01-01"])
        .assert()
        .success();

    tally(&dir)
        .arg("audit")
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE Record txn_001_"));
}

#[test]
fn unreadable_store_is_moved_aside() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("data")).unwrap();
    fs::write(dir.path().join("data").join("store.json"), "{oops").unwrap();

    tally(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("(not created yet)"))
        .stderr(predicate::str::contains("store file unreadable"));

    tally(&dir)
        .args(["add", "Lunch", "10", "-c", "Food", "-d", "2024-01-01"])
        .assert()
        .success();
    assert_eq!(stored_ids(&dir).len(), 1);

    let set_aside = fs::read_dir(dir.path().join("data"))
        .unwrap()
        .filter(|entry| {
            entry
                .as_ref()
                .unwrap()
                .file_name()
                .to_string_lossy()
                .starts_with("store.json.corrupt-")
        })
        .count();
    assert_eq!(set_aside, 1);
}

#[test]
fn oversized_amount_is_a_validation_error() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["add", "Yacht", "100000000000000000", "-c", "Toys", "-d", "2024-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Enter a valid amount"));

    tally(&dir)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Records:  0"));
}

#[test]
fn list_sort_flags() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["add", "Coffee beans", "8", "-c", "Food", "-d", "2024-01-02"])
        .assert()
        .success();
    tally(&dir)
        .args(["add", "Bus fare", "2.50", "-c", "Transport", "-d", "2024-01-03"])
        .assert()
        .success();

    let listing = |args: &[&str]| {
        let output = tally(&dir).args(args).output().unwrap();
        assert!(output.status.success());
        let text = String::from_utf8(output.stdout).unwrap();
        let coffee = text.find("Coffee beans").unwrap();
        let bus = text.find("Bus fare").unwrap();
        bus < coffee
    };

    assert!(listing(&["list", "--no-highlight"]));
    assert!(listing(&["list", "--sort", "amount", "--no-highlight"]));
    assert!(!listing(&["list", "--sort", "amount", "--dir", "desc", "--no-highlight"]));
    assert!(!listing(&["list", "--sort", "date", "--no-highlight"]));
}
