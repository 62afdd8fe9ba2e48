#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::predicate;

#[test]
fn test_help_lists_subcommands() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("movierec");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("tui"))
        .stdout(predicate::str::contains("movies"))
        .stdout(predicate::str::contains("watchlist"))
        .stdout(predicate::str::contains("ratings"))
        .stdout(predicate::str::contains("--api-url"));
}

#[test]
fn test_movies_help_lists_queries() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("movierec");
    cmd.args(["movies", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("similar"))
        .stdout(predicate::str::contains("top-rated"));
}

#[test]
fn test_movies_list_help_shows_filters() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("movierec");
    cmd.args(["movies", "list", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--genre"))
        .stdout(predicate::str::contains("--min-rating"))
        .stdout(predicate::str::contains("--ordering"));
}

#[test]
fn test_auth_login_requires_username() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("movierec");
    cmd.args(["auth", "login", "--password", "secret"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--username"));
}

#[test]
fn test_movies_show_requires_id() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("movierec");
    cmd.args(["movies", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("<ID>"));
}

#[test]
fn test_ratings_add_rejects_out_of_range() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("movierec");
    cmd.args(["ratings", "add", "7", "11"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1..=10"));
}

#[test]
fn test_ratings_add_rejects_zero() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("movierec");
    cmd.args(["ratings", "add", "7", "0"])
        .assert()
        .failure();
}

#[test]
fn test_completions_bash() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("movierec");
    cmd.args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("movierec"));
}

#[test]
fn test_completions_unknown_shell() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("movierec");
    cmd.args(["completions", "cmd.exe"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_ratings_help_lists_remove() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("movierec");
    cmd.args(["ratings", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("remove"));
}

#[test]
fn test_ratings_remove_requires_id() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("movierec");
    cmd.args(["ratings", "remove"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("<RATING_ID>"));
}
