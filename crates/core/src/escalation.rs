// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The notification escalation decision.
//!
//! Evaluated on every failure, after the failure has been appended to the
//! task's history. The checks run in order and the first match wins:
//!
//! 1. very first failure ever for this task → [`NotifyReason::FirstFailure`]
//! 2. failure signature never seen before → [`NotifyReason::NewFailure`]
//! 3. downtime has reached the non-recoverable threshold:
//!    - no downtime notice ever sent → [`NotifyReason::DowntimeReached`]
//!    - a full threshold window elapsed since the last downtime notice →
//!      [`NotifyReason::DowntimeReachedAgain`]
//!    - otherwise stay silent (inside the current escalation window)
//! 4. otherwise stay silent (known, non-terminal failure)
//!
//! [`NotifyReason::Healed`] is never produced here; it is emitted by the
//! runner when a success closes a non-empty streak.

use std::time::{Duration, Instant};

use crate::task::TaskState;

/// Why a notification is being sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyReason {
    /// First failure ever recorded for this task in this process
    FirstFailure,
    /// A failure signature never seen before for this task
    NewFailure,
    /// The task has been down for the non-recoverable downtime threshold
    DowntimeReached,
    /// Still down one full threshold window after the last downtime notice
    DowntimeReachedAgain,
    /// A success ended a non-empty failure streak
    Healed,
}

impl NotifyReason {
    /// Whether this reason is one of the downtime-threshold escalations.
    ///
    /// Only these participate in the re-arm window; FIRST/NEW/HEALED
    /// notices never suppress a later downtime alert.
    pub fn is_downtime(self) -> bool {
        matches!(self, NotifyReason::DowntimeReached | NotifyReason::DowntimeReachedAgain)
    }
}

crate::simple_display! {
    NotifyReason {
        FirstFailure => "first-failure",
        NewFailure => "new-failure",
        DowntimeReached => "downtime-threshold-reached",
        DowntimeReachedAgain => "downtime-threshold-reached-again",
        Healed => "healed",
    }
}

/// Decide whether the failure just recorded warrants a notification.
///
/// `state` must already contain the current failure as the last entry of
/// its all-time history (and streak). Returns `None` when no failure has
/// been recorded at all.
pub fn decide(state: &TaskState, threshold: Duration, now: Instant) -> Option<NotifyReason> {
    let all_time = state.all_time();
    let current = all_time.last()?;

    if all_time.len() == 1 {
        return Some(NotifyReason::FirstFailure);
    }

    let prior = &all_time[..all_time.len() - 1];
    if !prior.iter().any(|seen| seen.failure.same_as(&current.failure)) {
        return Some(NotifyReason::NewFailure);
    }

    let downtime = state.downtime(now)?;
    if downtime < threshold {
        return None;
    }

    match state.last_downtime_notice() {
        None => Some(NotifyReason::DowntimeReached),
        Some(notice) if now.duration_since(notice.at) >= threshold => {
            Some(NotifyReason::DowntimeReachedAgain)
        }
        Some(_) => None,
    }
}

#[cfg(test)]
#[path = "escalation_tests.rs"]
mod tests;
