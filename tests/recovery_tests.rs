//! Pending-operation recovery tests
//!
//! Binary-level coverage of the lock-present startup paths that need no
//! terminal. The Resume/Discard decisions themselves are covered by unit
//! tests in src/recovery.rs; without a terminal the recovery prompt fails
//! and warden falls back to Abort, the only choice that changes nothing.

mod common;

use predicates::prelude::*;

const VALID_LOCK: &str = "Command: disable WorldEdit\nTimestamp: 2026-08-20 10:00:00\nPID: 4242\n";

#[test]
fn pending_lock_blocks_startup_without_a_terminal() {
    let server = common::TestServer::new();
    server.add_mod("WorldEdit", "name: WorldEdit\n");
    server.plant_lock(VALID_LOCK);

    server
        .warden()
        .arg("list")
        .assert()
        .failure()
        .stdout(predicate::str::contains("did not complete"))
        .stdout(predicate::str::contains("disable WorldEdit"));

    // abort leaves the lock and the registry untouched
    assert!(server.lock_exists());
    assert!(server.has_dir("WorldEdit"));
}

#[test]
fn pending_lock_blocks_mutating_commands_too() {
    let server = common::TestServer::new();
    server.add_mod("Lone", "name: Lone\n");
    server.plant_lock(VALID_LOCK);

    server
        .warden()
        .args(["disable", "Lone"])
        .assert()
        .failure();

    assert!(server.lock_exists());
    assert!(server.has_dir("Lone"));
}

#[test]
fn malformed_lock_warns_and_is_removed() {
    let server = common::TestServer::new();
    server.add_mod("Lone", "name: Lone\n");
    server.plant_lock("complete nonsense, no recognized keys\n");

    server
        .warden()
        .arg("list")
        .assert()
        .success()
        .stderr(predicate::str::contains("malformed"))
        .stdout(predicate::str::contains("Lone"));

    assert!(!server.lock_exists());
}

#[test]
fn lock_written_by_an_older_tool_version_still_parses() {
    let server = common::TestServer::new();
    server.plant_lock(
        "Command: toggle Alpha\nFuture-Key: ignored\nTimestamp: 2026-08-20 10:00:00\nPID: 1\n",
    );

    server
        .warden()
        .arg("list")
        .assert()
        .failure()
        .stdout(predicate::str::contains("toggle Alpha"));

    assert!(server.lock_exists());
}

#[test]
fn completed_run_leaves_no_lock_behind() {
    let server = common::TestServer::new();
    server.add_mod("Lone", "name: Lone\n");

    server.warden().args(["disable", "Lone"]).assert().success();
    assert!(!server.lock_exists());

    server.warden().args(["enable", "Lone"]).assert().success();
    assert!(!server.lock_exists());
}
