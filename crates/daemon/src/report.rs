// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification subject and body construction.
//!
//! One block per failure (message, date/time, failure kind, traceback)
//! with the current state and downtime up front, and the deduplicated
//! history of distinct failures at the end.

use std::fmt::Write as _;
use std::time::Duration;

use steady_core::{format_elapsed, FailureRecord, NotifyReason};

/// A ready-to-send notification.
#[derive(Debug, Clone)]
pub struct Report {
    pub subject: String,
    pub body: String,
}

/// Build the report for a failure-path notification.
pub fn failure(
    task: &str,
    reason: NotifyReason,
    current: &FailureRecord,
    streak_len: usize,
    downtime: Duration,
    distinct: &[&FailureRecord],
) -> Report {
    let subject = match reason {
        NotifyReason::FirstFailure => format!("[{task}] First failure: {}", current.failure),
        NotifyReason::NewFailure => format!("[{task}] New failure: {}", current.failure),
        NotifyReason::DowntimeReached => {
            format!("[{task}] Down for {}", format_elapsed(downtime))
        }
        NotifyReason::DowntimeReachedAgain => {
            format!("[{task}] Still down after {}", format_elapsed(downtime))
        }
        NotifyReason::Healed => format!("[{task}] Recovered"),
    };

    let mut body = String::new();
    let _ = writeln!(body, "Task: {task}");
    let _ = writeln!(body, "State: {reason}");
    let _ = writeln!(
        body,
        "Downtime: {} (failing {} consecutive times)",
        format_elapsed(downtime),
        streak_len
    );
    let _ = writeln!(body);
    let _ = writeln!(body, "Current failure:");
    let _ = writeln!(body);
    push_failure_block(&mut body, current);
    push_distinct_section(&mut body, distinct);

    Report { subject, body }
}

/// Build the report for a success that closed a non-empty failure streak.
pub fn healed(
    task: &str,
    closed_streak: &[FailureRecord],
    outage: Duration,
    distinct: &[&FailureRecord],
) -> Report {
    let subject = format!(
        "[{task}] Recovered after {} consecutive failures",
        closed_streak.len()
    );

    let mut body = String::new();
    let _ = writeln!(body, "Task: {task}");
    let _ = writeln!(body, "State: {}", NotifyReason::Healed);
    let _ = writeln!(
        body,
        "Outage: {} across {} failures",
        format_elapsed(outage),
        closed_streak.len()
    );
    let _ = writeln!(body);
    let _ = writeln!(body, "Failures in the streak that just ended:");
    let _ = writeln!(body);
    for record in closed_streak {
        push_failure_block(&mut body, record);
    }
    push_distinct_section(&mut body, distinct);

    Report { subject, body }
}

fn push_distinct_section(body: &mut String, distinct: &[&FailureRecord]) {
    if distinct.is_empty() {
        return;
    }
    let _ = writeln!(body, "Distinct failures seen for this task:");
    let _ = writeln!(body);
    for record in distinct {
        push_failure_block(body, record);
    }
}

fn push_failure_block(body: &mut String, record: &FailureRecord) {
    let _ = writeln!(body, "Message: {}", record.failure.message);
    let _ = writeln!(body, "Date/Time: {}", timestamp(record.at_ms));
    let _ = writeln!(body, "Failure kind: {}", record.failure.kind);
    let _ = writeln!(body, "Traceback:");
    let _ = writeln!(body, "{}", record.failure.trace);
    let _ = writeln!(body);
}

fn timestamp(at_ms: u64) -> String {
    chrono::DateTime::from_timestamp_millis(at_ms as i64)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| format!("{at_ms}ms"))
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
