#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd(temp: &TempDir) -> assert_cmd::Command {
    let mut c = assert_cmd::Command::cargo_bin("mindvault").unwrap();
    c.env("MINDVAULT_DIR", temp.path())
        .env("NO_COLOR", "1")
        .env("MINDVAULT_NO_FETCH", "1")
        .env_remove("MINDVAULT_UNDO")
        .env_remove("MINDVAULT_TOAST_MS");
    c
}

fn add_note(temp: &TempDir, title: &str) -> String {
    let out = cmd(temp).args(["note", "add", title]).assert().success().get_output().stdout.clone();
    String::from_utf8_lossy(&out)
        .split_whitespace()
        .nth(2)
        .expect("id")
        .to_string()
}

fn note_titles(temp: &TempDir) -> Vec<String> {
    let raw = fs::read_to_string(temp.path().join("mindvault_data_v2.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    json["notes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["title"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[test]
fn delete_then_undo_restores_position() {
    let temp = TempDir::new().unwrap();
    add_note(&temp, "Oldest");
    let middle = add_note(&temp, "Middle");
    add_note(&temp, "Newest");

    cmd(&temp)
        .arg("shell")
        .write_stdin(format!("delete {middle}\nundo\nquit\n"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Note \"Middle\" deleted (undo 1 within 5s)"))
        .stdout(predicate::str::contains(format!("Restored note {middle}")));

    assert_eq!(note_titles(&temp), vec!["Newest", "Middle", "Oldest"]);
}

#[test]
fn undo_with_nothing_pending() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .arg("shell")
        .write_stdin("undo\ntoasts\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to undo."))
        .stdout(predicate::str::contains("No notifications."));
}

#[test]
fn expired_toast_cannot_be_undone() {
    let temp = TempDir::new().unwrap();
    let id = add_note(&temp, "Gone");
    cmd(&temp)
        .env("MINDVAULT_TOAST_MS", "0")
        .arg("shell")
        .write_stdin(format!("delete {id}\nundo\n"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to undo."));
    assert!(note_titles(&temp).is_empty());
}

#[test]
fn shell_switches_view_and_quotes_arguments() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .arg("shell")
        .write_stdin("view bookmarks\nadd https://example.com --title \"Example site\"\nlist\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Viewing bookmarks"))
        .stdout(predicate::str::contains("(Example site)"));

    cmd(&temp)
        .args(["bookmark", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Example site"));
}

#[test]
fn shell_reports_errors_and_keeps_going() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .arg("shell")
        .write_stdin("note add \"unclosed\ntheme bogus\nnote add Survivor\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Unterminated quote"))
        .stderr(predicate::str::contains("Unknown theme"))
        .stdout(predicate::str::contains("(Survivor)"));
}
