use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::prelude::*;
use std::path::Path;

fn rolodex(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rolodex").unwrap();
    cmd.arg("--dir").arg(dir).env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn add_ann(dir: &Path) {
    rolodex(dir)
        .args(["add", "--name", "Ann Lee", "--phone", "555-0100"])
        .args(["--email", "ann@initech.com", "--company", "Initech", "-t", "vip"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Contact added: Ann Lee (id 1)"));
}

#[test]
fn test_add_then_list() {
    let temp_dir = tempfile::tempdir().unwrap();
    add_ann(temp_dir.path());

    rolodex(temp_dir.path())
        .args(["list", "--compact"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Ann Lee"))
        .stdout(predicates::str::contains("555-0100"));
}

#[test]
fn test_duplicate_phone_is_an_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    add_ann(temp_dir.path());

    rolodex(temp_dir.path())
        .args(["add", "--name", "Someone Else", "--phone", "555-0100"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("already exists"));
}

#[test]
fn test_invalid_phone_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();
    rolodex(temp_dir.path())
        .args(["add", "--name", "Ann Lee", "--phone", "call me"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("Invalid phone"));

    rolodex(temp_dir.path())
        .args(["list", "--compact"])
        .assert()
        .success()
        .stdout(predicates::str::contains("No contacts found."));
}

#[test]
fn test_favorite_and_delete_lifecycle() {
    let temp_dir = tempfile::tempdir().unwrap();
    add_ann(temp_dir.path());

    rolodex(temp_dir.path())
        .args(["favorite", "555-0100"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Added to favorites"));

    rolodex(temp_dir.path())
        .args(["list", "--favorites", "--compact"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Ann Lee"));

    rolodex(temp_dir.path())
        .args(["delete", "555-0100"])
        .assert()
        .success();

    rolodex(temp_dir.path())
        .args(["search", "555-0100", "--by", "phone"])
        .assert()
        .success()
        .stdout(predicates::str::contains("No contacts match"));
}

#[test]
fn test_show_and_edit() {
    let temp_dir = tempfile::tempdir().unwrap();
    add_ann(temp_dir.path());

    rolodex(temp_dir.path())
        .args(["edit", "555-0100", "--new-phone", "555-0150", "--job-title", "Engineer"])
        .assert()
        .success();

    rolodex(temp_dir.path())
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicates::str::contains("555-0150"))
        .stdout(predicates::str::contains("Engineer"))
        .stdout(predicates::str::contains("vip"));

    rolodex(temp_dir.path())
        .args(["show", "7"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("not found"));
}

#[test]
fn test_tags() {
    let temp_dir = tempfile::tempdir().unwrap();
    add_ann(temp_dir.path());
    rolodex(temp_dir.path())
        .args(["add", "--name", "Bo Diaz", "--phone", "555-0199"])
        .assert()
        .success();

    rolodex(temp_dir.path())
        .args(["tag", "add", "golf", "555-0100", "555-0199"])
        .assert()
        .success()
        .stdout(predicates::str::contains("added to 2 contact(s)"));

    rolodex(temp_dir.path())
        .args(["tag", "list"])
        .assert()
        .success()
        .stdout(predicates::str::contains("golf").and(predicates::str::contains("vip")));

    rolodex(temp_dir.path())
        .args(["search", "golf", "--by", "tag"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Bo Diaz"));
}

#[test]
fn test_export_csv() {
    let temp_dir = tempfile::tempdir().unwrap();
    add_ann(temp_dir.path());
    let out = temp_dir.path().join("out.csv");

    rolodex(temp_dir.path())
        .arg("export")
        .arg(&out)
        .assert()
        .success();

    let csv = std::fs::read_to_string(out).unwrap();
    let mut lines = csv.lines();
    assert!(lines.next().unwrap().starts_with("ID,Name,Phone"));
    assert!(lines.next().unwrap().starts_with(r#"1,"Ann Lee","555-0100""#));
}

#[test]
fn test_contact_file_is_obfuscated_and_logged() {
    let temp_dir = tempfile::tempdir().unwrap();
    add_ann(temp_dir.path());

    let data = std::fs::read(temp_dir.path().join("contacts.dat")).unwrap();
    assert!(!String::from_utf8_lossy(&data).contains("Ann Lee"));

    let log = std::fs::read_to_string(temp_dir.path().join("contact_manager.log")).unwrap();
    assert!(log.contains("[INFO] Contact added: Ann Lee (555-0100)"));
}

#[test]
fn test_config_roundtrip() {
    let temp_dir = tempfile::tempdir().unwrap();

    rolodex(temp_dir.path())
        .args(["config", "backup-interval", "120"])
        .assert()
        .success()
        .stdout(predicates::str::contains("backup-interval set to 120"));

    rolodex(temp_dir.path())
        .args(["config", "backup-interval"])
        .assert()
        .success()
        .stdout(predicates::str::contains("120"));

    rolodex(temp_dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicates::str::contains("auto-backup = true"));
}

#[test]
fn test_key_change_then_revert_keeps_contacts() {
    let temp_dir = tempfile::tempdir().unwrap();
    add_ann(temp_dir.path());

    rolodex(temp_dir.path())
        .args(["config", "obfuscation-key", "newkey"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Re-encoded 1 contacts"));

    rolodex(temp_dir.path())
        .args(["list", "--compact"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Ann Lee"));

    rolodex(temp_dir.path())
        .args(["config", "obfuscation-key", "default_key_123"])
        .assert()
        .success();

    rolodex(temp_dir.path())
        .args(["list", "--compact"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Ann Lee"));
}

#[test]
fn test_config_works_on_undecodable_store() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join("contacts.dat"), b"\xff\xfe").unwrap();

    rolodex(temp_dir.path())
        .arg("list")
        .assert()
        .failure();

    rolodex(temp_dir.path())
        .args(["config", "backup-interval"])
        .assert()
        .success()
        .stdout(predicates::str::contains("3600"));
}

#[test]
fn test_manual_backup_and_restore() {
    let temp_dir = tempfile::tempdir().unwrap();
    add_ann(temp_dir.path());

    rolodex(temp_dir.path())
        .args(["backup", "create"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Backup created"));

    rolodex(temp_dir.path())
        .args(["add", "--name", "Bo Diaz", "--phone", "555-0199"])
        .assert()
        .success();

    let backups = std::fs::read_dir(temp_dir.path().join("backups"))
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(backups.len(), 1);

    rolodex(temp_dir.path())
        .args(["backup", "restore", &backups[0]])
        .assert()
        .success()
        .stdout(predicates::str::contains("Restored 1 contacts"));

    rolodex(temp_dir.path())
        .args(["list", "--compact"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Bo Diaz").not());
}
