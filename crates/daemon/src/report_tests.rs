// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Instant;
use steady_core::JobFailure;

fn record(message: &str, trace: &str) -> FailureRecord {
    FailureRecord::new(
        JobFailure::new("exit-status", message).with_trace(trace),
        Instant::now(),
        1_700_000_000_000,
    )
}

#[test]
fn first_failure_subject_names_task_and_failure() {
    let current = record("command exited with status 3", "oops");
    let report = failure(
        "sync-exchange",
        NotifyReason::FirstFailure,
        &current,
        1,
        Duration::from_secs(0),
        &[&current],
    );
    assert_eq!(
        report.subject,
        "[sync-exchange] First failure: exit-status: command exited with status 3"
    );
}

#[test]
fn downtime_subjects_carry_elapsed_time() {
    let current = record("x", "");
    let reached = failure(
        "sync",
        NotifyReason::DowntimeReached,
        &current,
        5,
        Duration::from_secs(3 * 3600),
        &[],
    );
    assert_eq!(reached.subject, "[sync] Down for 3h");

    let again = failure(
        "sync",
        NotifyReason::DowntimeReachedAgain,
        &current,
        9,
        Duration::from_secs(6 * 3600),
        &[],
    );
    assert_eq!(again.subject, "[sync] Still down after 6h");
}

#[test]
fn failure_body_has_state_downtime_and_blocks() {
    let current = record("broken pipe", "trace line 1\ntrace line 2");
    let report = failure(
        "sync",
        NotifyReason::NewFailure,
        &current,
        2,
        Duration::from_secs(90),
        &[&current],
    );

    assert!(report.body.contains("Task: sync"));
    assert!(report.body.contains("State: new-failure"));
    assert!(report.body.contains("Downtime: 1m 30s (failing 2 consecutive times)"));
    assert!(report.body.contains("Message: broken pipe"));
    assert!(report.body.contains("Failure kind: exit-status"));
    assert!(report.body.contains("trace line 2"));
    assert!(report.body.contains("Date/Time: 2023-11-14 22:13:20 UTC"));
    assert!(report.body.contains("Distinct failures seen for this task:"));
}

#[test]
fn healed_report_summarizes_streak_and_history() {
    let streak = vec![record("a", ""), record("a", ""), record("b", "")];
    let distinct = vec![&streak[0], &streak[2]];
    let report = healed("sync", &streak, Duration::from_secs(600), &distinct);

    assert_eq!(report.subject, "[sync] Recovered after 3 consecutive failures");
    assert!(report.body.contains("State: healed"));
    assert!(report.body.contains("Outage: 10m across 3 failures"));
    assert!(report.body.contains("Failures in the streak that just ended:"));
    assert!(report.body.contains("Distinct failures seen for this task:"));
}

#[test]
fn distinct_section_is_omitted_when_empty() {
    let current = record("x", "");
    let report = failure("t", NotifyReason::FirstFailure, &current, 1, Duration::ZERO, &[]);
    assert!(!report.body.contains("Distinct failures"));
}
