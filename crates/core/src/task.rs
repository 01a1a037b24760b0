// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-task configuration and failure bookkeeping.
//!
//! One [`TaskState`] exists per registered job for the whole process
//! lifetime. It owns three append-ordered sequences:
//!
//! - `all_time`: every failure ever captured, never pruned
//! - `streak`: the unbroken run of failures since the last success,
//!   cleared exactly when an execution succeeds
//! - `notified`: every notification emitted, with its reason and time
//!
//! `streak` is always a suffix of `all_time`, and it is empty iff the most
//! recent completed execution succeeded (or nothing has run yet).

use std::time::{Duration, Instant};

use crate::escalation::NotifyReason;
use crate::failure::{FailureRecord, JobFailure};

/// Per-job scheduling and escalation options.
#[derive(Debug, Clone)]
pub struct JobOptions {
    /// Sleep after a successful execution
    pub success_cooldown: Duration,
    /// Sleep after a failed execution
    pub fail_cooldown: Duration,
    /// Downtime at which a still-failing task escalates to operators
    pub non_recoverable_downtime: Duration,
    /// Log target name for this task's log lines
    pub logger_name: String,
    /// Accepted for compatibility; privilege drop is an OS-level concern
    /// enforced outside the scheduler.
    pub run_as_uid: Option<u32>,
    pub run_as_gid: Option<u32>,
}

impl Default for JobOptions {
    fn default() -> Self {
        Self {
            success_cooldown: Duration::from_secs(5 * 60),
            fail_cooldown: Duration::from_secs(20 * 60),
            non_recoverable_downtime: Duration::from_secs(12 * 60 * 60),
            logger_name: "steady".to_string(),
            run_as_uid: None,
            run_as_gid: None,
        }
    }
}

/// A notification that was emitted, and why.
#[derive(Debug, Clone)]
pub struct NotificationRecord {
    pub reason: NotifyReason,
    pub at: Instant,
    pub at_ms: u64,
}

/// Result of one job execution.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub started: Instant,
    pub ended: Instant,
    pub failure: Option<JobFailure>,
}

impl Outcome {
    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }

    pub fn duration(&self) -> Duration {
        self.ended.duration_since(self.started)
    }
}

/// Failure history and notification bookkeeping for one job.
#[derive(Debug, Default)]
pub struct TaskState {
    all_time: Vec<FailureRecord>,
    streak: Vec<FailureRecord>,
    notified: Vec<NotificationRecord>,
}

impl TaskState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a failure to both the all-time history and the current streak.
    pub fn record_failure(&mut self, failure: JobFailure, at: Instant, at_ms: u64) {
        let record = FailureRecord::new(failure, at, at_ms);
        self.streak.push(record.clone());
        self.all_time.push(record);
    }

    /// Close the current streak on a successful execution.
    ///
    /// Returns the streak that just ended (possibly empty). The all-time
    /// history is untouched; only the streak resets.
    pub fn record_success(&mut self) -> Vec<FailureRecord> {
        std::mem::take(&mut self.streak)
    }

    pub fn record_notification(&mut self, reason: NotifyReason, at: Instant, at_ms: u64) {
        self.notified.push(NotificationRecord { reason, at, at_ms });
    }

    pub fn all_time(&self) -> &[FailureRecord] {
        &self.all_time
    }

    pub fn streak(&self) -> &[FailureRecord] {
        &self.streak
    }

    pub fn notified(&self) -> &[NotificationRecord] {
        &self.notified
    }

    /// Start of the current streak, if the task is currently down.
    pub fn down_since(&self) -> Option<Instant> {
        self.streak.first().map(|r| r.at)
    }

    /// Elapsed time since the start of the current streak.
    pub fn downtime(&self, now: Instant) -> Option<Duration> {
        self.down_since().map(|since| now.duration_since(since))
    }

    /// Most recent downtime-threshold notification, if any was ever sent.
    pub fn last_downtime_notice(&self) -> Option<&NotificationRecord> {
        self.notified.iter().rev().find(|n| n.reason.is_downtime())
    }

    /// First occurrence of each distinct failure signature, in first-seen
    /// order over the all-time history.
    pub fn distinct_failures(&self) -> Vec<&FailureRecord> {
        let mut distinct: Vec<&FailureRecord> = Vec::new();
        for record in &self.all_time {
            if !distinct.iter().any(|seen| seen.failure.same_as(&record.failure)) {
                distinct.push(record);
            }
        }
        distinct
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
