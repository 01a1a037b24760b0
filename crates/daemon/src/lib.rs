// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! steady-daemon: the scheduling-and-resilience engine.
//!
//! A long-lived process that repeatedly invokes a fixed set of registered
//! jobs, absorbs and classifies their failures, throttles retries, and
//! escalates operator notification only when a failure is novel or has
//! become chronic. At most one instance runs per pidfile, enforced by
//! [`guard::InstanceGuard`] before the loop starts.

pub mod config;
pub mod guard;
pub mod job;
pub mod notify;
pub mod report;
pub mod runner;
pub mod scheduler;

pub use config::{Config, ConfigError, JobSpec};
pub use guard::{GuardError, InstanceGuard};
pub use job::{CommandJob, Job};
pub use notify::{DesktopNotifySink, NotifyError, NotifySink};
pub use runner::TaskRunner;
pub use scheduler::Scheduler;
