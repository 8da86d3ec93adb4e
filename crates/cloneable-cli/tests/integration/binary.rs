//! End-to-end runs of the `cloneable` binary.

use std::process::{Command, Output};

fn cloneable(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cloneable"))
        .args(args)
        .env_remove("GITHUB_TOKEN")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run cloneable")
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_unknown_flag_exits_with_usage_code() {
    let output = cloneable(&["--unknown-flag"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());

    let err = stderr(&output);
    let lines: Vec<&str> = err.lines().collect();
    assert_eq!(lines[0], "Unknown option: '--unknown-flag'");
    assert!(lines.iter().any(|l| l.starts_with("Usage: cloneable")));
    assert_eq!(
        lines.last().copied(),
        Some("Try 'cloneable --help' for more information.")
    );
}

#[test]
fn test_nested_subcommand_failure_names_full_path() {
    let output = cloneable(&["auth", "check", "--verbos"]);

    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.contains("Possible solutions: --verbose\n"));
    assert!(err.ends_with("Try 'cloneable auth check --help' for more information.\n"));
}

#[test]
fn test_missing_subcommand_after_option() {
    let output = cloneable(&["auth", "-v"]);

    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.starts_with("Missing required subcommand\n"));
    assert!(err.ends_with("Try 'cloneable auth --help' for more information.\n"));
}

#[test]
fn test_bare_group_prints_help_on_stderr() {
    let output = cloneable(&["auth"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Usage: cloneable auth"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_missing_token_exits_with_credential_code() {
    let output = cloneable(&["auth", "check"]);

    assert_eq!(output.status.code(), Some(3));
    let err = stderr(&output);
    assert!(err.contains(
        "error: No GitHub token credential provided or GITHUB_TOKEN environment variable missing."
    ));
    assert!(err.contains("hint: "));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_token_from_environment() {
    let output = Command::new(env!("CARGO_BIN_EXE_cloneable"))
        .args(["auth", "check"])
        .env("GITHUB_TOKEN", "ghp_fromenvironment")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run cloneable");

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.starts_with("GitHub token found: ghp_"));
    assert!(!out.contains("fromenvironment"));
}

#[test]
fn test_help_exits_zero() {
    let output = cloneable(&["--help"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("auth"));
}
