// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;
use std::process::{Child, Command};

/// A pid that cannot be alive: one past the default kernel pid_max.
const DEAD_PID: i32 = 4_194_305;

fn pidfile_in(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join("steady.pid")
}

fn spawn_sleeper() -> Child {
    Command::new("sleep").arg("30").spawn().unwrap()
}

fn reap(mut child: Child) {
    let _ = child.kill();
    let _ = child.wait();
}

#[test]
fn acquires_when_no_pidfile_exists() {
    let dir = tempfile::tempdir().unwrap();
    let path = pidfile_in(&dir);
    let mut guard = InstanceGuard::new(&path, false, false);
    guard.acquire().unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, std::process::id().to_string());
}

#[test]
fn reclaims_stale_pidfile() {
    let dir = tempfile::tempdir().unwrap();
    let path = pidfile_in(&dir);
    std::fs::write(&path, DEAD_PID.to_string()).unwrap();

    let mut guard = InstanceGuard::new(&path, false, false);
    guard.acquire().unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, std::process::id().to_string());
}

#[test]
fn unreadable_pidfile_is_not_a_conflict() {
    let dir = tempfile::tempdir().unwrap();
    let path = pidfile_in(&dir);
    std::fs::write(&path, "not-a-pid").unwrap();

    let mut guard = InstanceGuard::new(&path, false, false);
    guard.acquire().unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, std::process::id().to_string());
}

#[test]
#[serial]
fn live_competitor_without_kill_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = pidfile_in(&dir);
    let child = spawn_sleeper();
    let child_pid = child.id() as i32;
    std::fs::write(&path, child_pid.to_string()).unwrap();

    let mut guard = InstanceGuard::new(&path, false, false);
    let err = guard.acquire().unwrap_err();
    assert!(matches!(err, GuardError::Conflict { pid, .. } if pid == child_pid));

    // the conflict must not overwrite the holder's pidfile
    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents, child_pid.to_string());

    reap(child);
}

/// Spawn a sleeper that is NOT our child (reparented to init), so its
/// process-table entry disappears on exit without us reaping it, the
/// same shape as a real competing scheduler instance.
fn spawn_detached_sleeper() -> i32 {
    let output = Command::new("/bin/sh")
        .arg("-c")
        .arg("sleep 30 >/dev/null 2>&1 & echo $!")
        .output()
        .unwrap();
    String::from_utf8_lossy(&output.stdout).trim().parse().unwrap()
}

#[test]
#[serial]
fn kill_concurrent_terminates_holder_then_acquires() {
    let dir = tempfile::tempdir().unwrap();
    let path = pidfile_in(&dir);
    let holder_pid = spawn_detached_sleeper();
    std::fs::write(&path, holder_pid.to_string()).unwrap();

    let mut guard = InstanceGuard::new(&path, false, true)
        .with_poll_interval(Duration::from_millis(1000));
    guard.acquire().unwrap();

    assert!(!process_alive(holder_pid));
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, std::process::id().to_string());
}

#[test]
#[serial]
fn allow_concurrent_skips_conflict_handling() {
    let dir = tempfile::tempdir().unwrap();
    let path = pidfile_in(&dir);
    let child = spawn_sleeper();
    std::fs::write(&path, child.id().to_string()).unwrap();

    let mut guard = InstanceGuard::new(&path, true, false);
    guard.acquire().unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, std::process::id().to_string());

    reap(child);
}

#[test]
fn release_removes_owned_pidfile() {
    let dir = tempfile::tempdir().unwrap();
    let path = pidfile_in(&dir);
    {
        let mut guard = InstanceGuard::new(&path, false, false);
        guard.acquire().unwrap();
        assert!(path.exists());
    }
    // dropped: released
    assert!(!path.exists());
}

#[test]
fn release_leaves_a_successors_pidfile_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = pidfile_in(&dir);
    let mut guard = InstanceGuard::new(&path, false, false);
    guard.acquire().unwrap();

    // a successor overwrote the record
    std::fs::write(&path, DEAD_PID.to_string()).unwrap();
    guard.release();
    assert!(path.exists());
}

#[test]
fn release_without_acquire_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let path = pidfile_in(&dir);
    std::fs::write(&path, DEAD_PID.to_string()).unwrap();

    let mut guard = InstanceGuard::new(&path, false, false);
    guard.release();
    assert!(path.exists());
}

#[test]
fn process_alive_sees_own_process() {
    assert!(process_alive(std::process::id() as i32));
    assert!(!process_alive(DEAD_PID));
}
