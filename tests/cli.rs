//! CLI integration tests for the sshportal binary.
//!
//! Each test uses an isolated temp directory for the database, ensuring tests
//! can run in parallel safely.

#![allow(deprecated)] // Command::cargo_bin deprecation only affects custom build dirs

use std::path::Path;

use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::prelude::*;
use serde_json::Value;
use sshportal::bootstrap::SshKeygen;
use sshportal::config::ADMIN_INVITE_TOKEN_ENV;
use sshportal::store::{SqliteStore, Store};

struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    fn data_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    fn data_dir_str(&self) -> String {
        self.data_dir().to_string_lossy().to_string()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("sshportal").expect("failed to find binary");
        cmd.env("NO_COLOR", "1");
        cmd.env_remove(ADMIN_INVITE_TOKEN_ENV);
        cmd
    }

    fn init(&self) -> assert_cmd::assert::Assert {
        self.cmd()
            .env(ADMIN_INVITE_TOKEN_ENV, "tok123")
            .args(["init", "--data-dir", &self.data_dir_str()])
            .assert()
    }

    fn migrate(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.cmd()
            .arg("migrate")
            .args(args)
            .args(["--data-dir", &self.data_dir_str()])
            .assert()
    }

    fn status_json(&self) -> Value {
        let output = self
            .cmd()
            .args([
                "migrate",
                "status",
                "--data-dir",
                &self.data_dir_str(),
                "--json",
            ])
            .output()
            .expect("failed to run command");

        serde_json::from_slice(&output.stdout).expect("failed to parse JSON")
    }

    fn store(&self) -> SqliteStore {
        SqliteStore::new(self.data_dir().join("sshportal.db")).expect("failed to open store")
    }
}

fn ssh_keygen_available() -> bool {
    SshKeygen::new().is_available()
}

#[test]
fn test_init_prints_invite_token_once() {
    if !ssh_keygen_available() {
        eprintln!("Skipping test: ssh-keygen not available");
        return;
    }

    let ctx = TestContext::new();

    ctx.init()
        .success()
        .stdout(predicate::str::contains("invite:tok123"));

    ctx.init()
        .success()
        .stdout(predicate::str::contains("invite:").not());

    let store = ctx.store();
    assert_eq!(store.count_users().unwrap(), 1);
    assert_eq!(store.count_ssh_keys().unwrap(), 2);

    let key = store.get_ssh_key_by_name("default").unwrap().unwrap();
    assert!(key.fingerprint.starts_with("SHA256:"));
    assert_eq!(key.length, 2048);
}

#[test]
fn test_init_invite_token_flag() {
    if !ssh_keygen_available() {
        eprintln!("Skipping test: ssh-keygen not available");
        return;
    }

    let ctx = TestContext::new();

    ctx.cmd()
        .args([
            "init",
            "--data-dir",
            &ctx.data_dir_str(),
            "--invite-token",
            "fromflag",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("invite:fromflag"));
}

#[test]
fn test_migrate_up_and_status() {
    let ctx = TestContext::new();

    ctx.migrate(&["up", "--to", "15"]).success();

    let status = ctx.status_json();
    let entries = status.as_array().expect("status is an array");
    assert_eq!(entries.len(), 21);
    assert!(entries[14]["applied_at"].is_string());
    assert!(entries[15].get("applied_at").is_none());
    assert_eq!(entries[15]["id"], "16");
    assert_eq!(entries[15]["reversible"], false);

    ctx.migrate(&["up"]).success();
    let status = ctx.status_json();
    assert!(
        status
            .as_array()
            .unwrap()
            .iter()
            .all(|e| e["applied_at"].is_string())
    );
}

#[test]
fn test_migrate_rollback_last() {
    let ctx = TestContext::new();
    ctx.migrate(&["up"]).success();

    ctx.migrate(&["rollback", "--last"])
        .success()
        .stdout(predicate::str::contains("Rolled back 21"));
}

#[test]
fn test_migrate_rollback_past_one_way_step_fails() {
    let ctx = TestContext::new();
    ctx.migrate(&["up"]).success();

    ctx.migrate(&["rollback", "--to", "15"])
        .failure()
        .stderr(predicate::str::contains("not supported"));

    let store = ctx.store();
    assert_eq!(store.applied_migrations().unwrap().len(), 19);
}

#[test]
fn test_migrate_rollback_requires_target() {
    let ctx = TestContext::new();
    ctx.migrate(&["up"]).success();

    ctx.migrate(&["rollback"])
        .failure()
        .stderr(predicate::str::contains("--to"));
}

#[test]
fn test_migrate_status_text() {
    let ctx = TestContext::new();

    ctx.migrate(&["status"])
        .success()
        .stdout(predicate::str::contains("pending"))
        .stdout(predicate::str::contains("(one-way)"));
}
