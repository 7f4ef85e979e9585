//! Command-line tests for the `scanwatch` binary.
//!
//! Everything here fails before or at the first network call, so no
//! scanning service is needed. Each test runs in an empty temp dir with
//! its own config home so stray config files cannot leak in.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn scanwatch(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("scanwatch").unwrap();
    cmd.current_dir(tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path())
        .env("HOME", tmp.path())
        .env_remove("SCANWATCH_BASE_URL")
        .env_remove("SCANWATCH_TIMEOUT_SECS")
        .env_remove("SCANWATCH_GIT_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_subcommands() {
    let tmp = TempDir::new().unwrap();
    scanwatch(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("watch")
                .and(predicate::str::contains("status"))
                .and(predicate::str::contains("findings")),
        );
}

#[test]
fn missing_subcommand_is_a_usage_error() {
    let tmp = TempDir::new().unwrap();
    scanwatch(&tmp).assert().failure().code(2);
}

#[test]
fn github_form_reports_every_missing_field() {
    let tmp = TempDir::new().unwrap();
    scanwatch(&tmp)
        .args(["start", "github", "--name", "nightly"])
        .assert()
        .code(1)
        .stderr(
            predicate::str::contains("--project: Project selection is required")
                .and(predicate::str::contains("--token: GitHub Token is required"))
                .and(predicate::str::contains("--owner: GitHub Repository Owner is required"))
                .and(predicate::str::contains("--repo: GitHub Repository is required"))
                .and(predicate::str::contains("Scan name").not()),
        );
}

#[test]
fn zip_form_rejects_other_archives() {
    let tmp = TempDir::new().unwrap();
    scanwatch(&tmp)
        .args(["start", "zip", "--project", "p", "--name", "n", "--file", "src.tar.gz"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Only .zip archives are supported"));
}

#[test]
fn azure_is_not_implemented() {
    let tmp = TempDir::new().unwrap();
    scanwatch(&tmp)
        .args(["start", "azure"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not implemented"));
}

#[test]
fn invalid_base_url_is_reported() {
    let tmp = TempDir::new().unwrap();
    scanwatch(&tmp)
        .args(["--base-url", "ftp://scanner.example.com", "status", "abc"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unsupported scheme"));
}

#[test]
fn unreachable_service_is_an_error() {
    let tmp = TempDir::new().unwrap();
    scanwatch(&tmp)
        .args(["--base-url", "http://127.0.0.1:9", "--timeout-secs", "2", "status", "abc"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to fetch scan abc"));
}

#[test]
fn malformed_project_config_is_reported() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join(".scanwatch.toml"), "[api\n").unwrap();
    scanwatch(&tmp)
        .args(["status", "abc"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid TOML"));
}
