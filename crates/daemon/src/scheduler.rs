// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The multi-task loop.
//!
//! Single-threaded, sequential, round-robin: each registered task runs
//! once per full pass, in registration order, and the thread sleeps its
//! cooldown between executions. The instance guard is acquired before the
//! first pass; its failure is the only way out of `run`.

use steady_core::{Clock, Sleeper};
use tracing::info;

use crate::guard::{GuardError, InstanceGuard};
use crate::notify::NotifySink;
use crate::runner::TaskRunner;

/// Owns the ordered runners and the single-instance guard.
pub struct Scheduler<C, S, N> {
    guard: InstanceGuard,
    runners: Vec<TaskRunner<C, S, N>>,
}

impl<C: Clock, S: Sleeper, N: NotifySink> Scheduler<C, S, N> {
    pub fn new(guard: InstanceGuard, runners: Vec<TaskRunner<C, S, N>>) -> Self {
        Self { guard, runners }
    }

    pub fn runners(&self) -> &[TaskRunner<C, S, N>] {
        &self.runners
    }

    /// Acquire the instance guard. Must succeed before any pass runs;
    /// failure is fatal to the process.
    pub fn acquire(&mut self) -> Result<(), GuardError> {
        self.guard.acquire()
    }

    /// Run every task once, in registration order.
    pub fn pass(&mut self) {
        for runner in &mut self.runners {
            runner.run_once();
        }
    }

    /// Acquire the guard and loop forever.
    pub fn run(&mut self) -> Result<(), GuardError> {
        self.acquire()?;
        let names: Vec<&str> = self.runners.iter().map(|r| r.name()).collect();
        info!(tasks = ?names, pidfile = %self.guard.pidfile().display(), "scheduler started");
        loop {
            self.pass();
        }
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
