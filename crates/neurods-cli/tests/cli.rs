//! CLI-level tests for the strip and interact subcommands.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// A command with config/state/log locations pinned inside `home`.
fn neurods(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("neurods").unwrap();
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("XDG_STATE_HOME", home.join(".local/state"));
    cmd
}

#[test]
fn strip_writes_student_copy() {
    let home = tempdir().unwrap();
    let nb = json!({
        "cells": [
            {
                "cell_type": "code",
                "source": "setup()\n### STUDENT ANSWER\nanswer = 42",
                "execution_count": 2,
                "outputs": [{"output_type": "stream", "text": "42"}],
                "metadata": {}
            }
        ],
        "metadata": {},
        "nbformat": 4,
        "nbformat_minor": 2
    });
    let nb_path = home.path().join("lab01.ipynb");
    fs::write(&nb_path, serde_json::to_string(&nb).unwrap()).unwrap();

    neurods(home.path())
        .args(["strip", nb_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 cells"));

    let saved = fs::read_to_string(home.path().join("lab01_student.ipynb")).unwrap();
    assert!(saved.contains("### STUDENT ANSWER"));
    assert!(!saved.contains("answer = 42"));
}

#[test]
fn strip_fails_on_missing_notebook() {
    let home = tempdir().unwrap();
    neurods(home.path())
        .args(["strip", "no-such.ipynb"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no-such.ipynb"));
}

#[test]
fn interact_prints_hub_link() {
    let home = tempdir().unwrap();
    neurods(home.path())
        .args([
            "interact",
            "https://github.com/data-8/textbook/blob/gh-pages/chapters/01/intro.ipynb",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://data8.berkeley.edu/hub/interact?repo=textbook&path=chapters/01/intro.ipynb",
        ));
}

#[test]
fn interact_rejects_urls_without_course_marker() {
    let home = tempdir().unwrap();
    neurods(home.path())
        .args(["interact", "https://example.com/notebook.ipynb"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("data-8"));
}

#[test]
fn fetch_conflict_reports_the_remedy() {
    let home = tempdir().unwrap();
    let data_root = home.path().join("data");
    fs::create_dir_all(&data_root).unwrap();
    fs::write(data_root.join("eeg.zip"), b"already here").unwrap();

    // The conflict is detected before any network access, so a dead URL is fine.
    neurods(home.path())
        .args(["fetch", "http://127.0.0.1:9/unreachable", "eeg.zip"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("replace"));
}
