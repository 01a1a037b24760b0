// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! steady-core: domain types for the steady task scheduler.
//!
//! Everything here is pure: failure values and their equivalence, the
//! per-task failure history, the notification escalation decision, and the
//! clock/sleep abstractions that keep all of it testable without real time.

pub mod macros;

pub mod clock;
pub mod escalation;
pub mod failure;
pub mod task;
pub mod time_fmt;

pub use clock::{Clock, FakeClock, FakeSleeper, Sleeper, SystemClock, ThreadSleeper};
pub use escalation::{decide, NotifyReason};
pub use failure::{FailureRecord, JobFailure};
pub use task::{JobOptions, NotificationRecord, Outcome, TaskState};
pub use time_fmt::format_elapsed;
