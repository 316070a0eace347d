use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn mathsim() -> Command {
    Command::cargo_bin("mathsim").unwrap()
}

#[test]
fn help_lists_options() {
    mathsim()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--list-topics"))
        .stdout(predicate::str::contains("--api-url"))
        .stdout(predicate::str::contains("--concepts"));
}

#[test]
fn list_topics_prints_catalogue() {
    mathsim()
        .arg("--list-topics")
        .assert()
        .success()
        .stdout(predicate::str::contains("Calculus - Derivatives"))
        .stdout(predicate::str::contains("Linear Algebra"))
        .stdout(predicate::str::contains("Pre-University"))
        .stdout(predicate::str::contains("probability-basics"))
        .stdout(predicate::str::contains("pre-university"));
}

#[test]
fn unknown_topic_is_rejected() {
    mathsim()
        .args(["--topic", "geometry", "--list-topics"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown topic 'geometry'"));
}

#[test]
fn difficulty_needs_a_topic() {
    mathsim()
        .args(["--difficulty", "applied", "--list-topics"])
        .assert()
        .failure();

    mathsim()
        .args(["--topic", "linear-algebra", "--difficulty", "core concept", "--list-topics"])
        .assert()
        .success();
}

#[test]
fn list_topics_with_custom_notes() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(br#"{"Probability": {"foundation": {"definition": "Chance."}}}"#)
        .unwrap();

    let output = mathsim()
        .arg("--concepts")
        .arg(file.path())
        .arg("--list-topics")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.matches("notes").count(), 1);
}

#[test]
fn invalid_config_fails() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"[plot]\nscale = -1.0\n").unwrap();

    mathsim()
        .arg("--config")
        .arg(file.path())
        .arg("--list-topics")
        .assert()
        .failure()
        .stderr(predicate::str::contains("plot.scale"));
}

#[test]
fn missing_concepts_file_fails() {
    mathsim()
        .arg("--concepts")
        .arg("/nonexistent/notes.json")
        .arg("--list-topics")
        .assert()
        .failure()
        .stderr(predicate::str::contains("notes.json"));
}
