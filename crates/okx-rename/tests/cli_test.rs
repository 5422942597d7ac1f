//! CLI integration tests for okx-rename

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn okx_rename() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("okx-rename").expect("Failed to find okx-rename binary")
}

#[test]
fn test_version_flag() {
    okx_rename()
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::contains("okx-rename"));
}

#[test]
fn test_directory_from_config() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let input = dir.path().join("in");
    fs::create_dir_all(input.join("sub")).unwrap();
    fs::write(input.join("a.csv"), "name,image\nx,1.png\ny,2.png\n").unwrap();
    fs::write(input.join("sub").join("b.csv"), "image,name\n3.png,z\n").unwrap();
    fs::write(
        dir.path().join("convert_okx.ini"),
        "[rename]\ninput = in\noutput = out\nprefix = Cat\nformat = {0} No.{1}\nstart = 100\n",
    )
    .unwrap();

    okx_rename()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Rows updated: 3"))
        .stdout(predicate::str::contains("Last number: 102"));

    let a = fs::read_to_string(dir.path().join("out").join("a.csv")).unwrap();
    assert_eq!(a, "name,image\nCat No.100,1.png\nCat No.101,2.png\n");
    let b = fs::read_to_string(dir.path().join("out").join("sub").join("b.csv")).unwrap();
    assert_eq!(b, "image,name\n3.png,Cat No.102\n");
}

#[test]
fn test_flags_override_config() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(dir.path().join("items.csv"), "name\nx\n").unwrap();
    fs::write(
        dir.path().join("convert_okx.ini"),
        "[rename]\ninput = items.csv\noutput = renamed.csv\nprefix = Cat\n",
    )
    .unwrap();

    okx_rename()
        .current_dir(dir.path())
        .args(["-p", "Dog", "-n", "5"])
        .assert()
        .success();

    let out = fs::read_to_string(dir.path().join("renamed.csv")).unwrap();
    assert_eq!(out, "name\nDog #5\n");
}

#[test]
fn test_missing_name_column_fails() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(dir.path().join("items.csv"), "title\nx\n").unwrap();

    okx_rename()
        .current_dir(dir.path())
        .args(["-i", "items.csv", "-o", "out.csv"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no 'name' column"));

    assert!(!dir.path().join("out.csv").exists());
}

#[test]
fn test_non_csv_input_fails() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(dir.path().join("items.txt"), "name\nx\n").unwrap();

    okx_rename()
        .current_dir(dir.path())
        .args(["-i", "items.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a CSV file"));
}
