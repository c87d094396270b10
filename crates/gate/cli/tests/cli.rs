use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn legend(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("legend").unwrap();
    cmd.env_remove("LEGEND_CONFIG")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(dir.join("config.toml"))
        .arg("--store")
        .arg(dir.join("identity.json"));
    cmd
}

#[test]
fn fresh_store_requires_sign_in() {
    let dir = tempfile::tempdir().unwrap();

    legend(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sign-in required (email)"));
}

#[test]
fn sign_in_persists_normalized_identity() {
    let dir = tempfile::tempdir().unwrap();

    legend(dir.path())
        .args(["sign-in", "--email", "  Ann@B.com "])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in as ann@b.com"));

    legend(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Authenticated as ann@b.com"));

    let stored = std::fs::read_to_string(dir.path().join("identity.json")).unwrap();
    assert!(stored.contains("\"legend-user-email\": \"ann@b.com\""));
}

#[test]
fn malformed_email_is_rejected_and_nothing_is_stored() {
    let dir = tempfile::tempdir().unwrap();

    legend(dir.path())
        .args(["sign-in", "--email", "not-an-email"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input"));

    assert!(!dir.path().join("identity.json").exists());
}

#[test]
fn sign_in_page_requires_name_and_forwards() {
    let dir = tempfile::tempdir().unwrap();

    legend(dir.path())
        .args(["--require-name", "--next-route", "/map"])
        .args(["sign-in", "--email", "a@b.com"])
        .assert()
        .failure();

    legend(dir.path())
        .args(["--require-name", "--next-route", "/map"])
        .args(["sign-in", "--email", "a@b.com", "--name", "Ann"])
        .assert()
        .success()
        .stdout(predicate::str::contains("→ /map"))
        .stdout(predicate::str::contains("Signed in as Ann <a@b.com>"));

    legend(dir.path())
        .args(["--require-name", "--next-route", "/map", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("→ /map (replacing history)"));
}

#[test]
fn sign_out_forgets_the_visitor() {
    let dir = tempfile::tempdir().unwrap();

    legend(dir.path())
        .args(["sign-in", "--email", "a@b.com"])
        .assert()
        .success();

    legend(dir.path()).arg("sign-out").assert().success();

    legend(dir.path())
        .args(["status", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"state\": \"unauthenticated\""));
}

#[test]
fn config_file_drives_the_gate() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[gate]\ncapture = \"name_and_email\"\n",
    )
    .unwrap();

    legend(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sign-in required (name and email)"));
}
