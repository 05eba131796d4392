use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn tabplot() -> Command {
    Command::cargo_bin("tabplot").unwrap()
}

#[test]
fn help_lists_commands() {
    tabplot()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("plot"))
        .stdout(predicate::str::contains("surface"))
        .stdout(predicate::str::contains("generate"));
}

#[test]
fn missing_file_fails_before_plotting() {
    let dir = tempdir().unwrap();
    tabplot()
        .arg("plot")
        .arg(dir.path().join("basic"))
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error: "))
        .stderr(predicate::str::contains("basic"));
}

#[test]
fn malformed_row_reports_line_and_field() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("basic");
    fs::write(&path, "1 3\n2 five\n3 2\n").unwrap();

    tabplot()
        .arg("plot")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains(":2: not a number"))
        .stderr(predicate::str::contains("five"));
}

#[test]
fn unknown_overlay_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mystery");
    fs::write(&path, "1 3\n2 5\n").unwrap();

    tabplot()
        .arg("plot")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("mystery"));

    tabplot()
        .args(["plot", "--scenario", "nope"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn surface_with_wrong_row_count_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("manual");
    let rows: String = (0..5399).map(|i| format!("{} 0 0\n", i)).collect();
    fs::write(&path, rows).unwrap();

    tabplot()
        .arg("surface")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("5399"));
}

#[test]
fn generate_writes_curve_and_surface_files() {
    let dir = tempdir().unwrap();
    let curve = dir.path().join("step");
    let surface = dir.path().join("manual");

    tabplot()
        .arg("generate")
        .arg("step")
        .arg(&curve)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 700 rows"));
    let text = fs::read_to_string(&curve).unwrap();
    assert_eq!(text.lines().count(), 700);
    assert!(text.lines().all(|l| l.split_whitespace().count() == 2));

    tabplot()
        .arg("generate")
        .arg("manual")
        .arg(&surface)
        .assert()
        .success();
    let text = fs::read_to_string(&surface).unwrap();
    assert_eq!(text.lines().count(), 5400);
}

#[test]
fn generate_rejects_unknown_target() {
    let dir = tempdir().unwrap();
    tabplot()
        .arg("generate")
        .arg("spiral")
        .arg(dir.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("spiral"));
}

#[test]
fn log_file_records_generation() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("tabplot.log");

    tabplot()
        .arg("--log")
        .arg(&log)
        .arg("generate")
        .arg("basic")
        .arg(dir.path().join("basic"))
        .assert()
        .success();

    let text = fs::read_to_string(&log).unwrap();
    assert!(text.contains("Starting tabplot"));
    assert!(text.contains("Wrote"));
}
