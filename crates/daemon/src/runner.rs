// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-task runner: execute once, classify, escalate, cool down.
//!
//! `run_once` is called by the scheduler once per loop pass and never
//! loops itself. A failure raised by the job body (including a panic) is
//! captured, folded into the task's history, and run through the
//! escalation decision; it never crosses the runner boundary. After every
//! execution the runner sleeps the configured cooldown, so a task's
//! effective cadence is `fail_cooldown` while unhealthy and
//! `success_cooldown` while healthy.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Duration;

use steady_core::{
    decide, format_elapsed, Clock, JobFailure, JobOptions, NotifyReason, Outcome, Sleeper,
    TaskState,
};
use tracing::{debug, error, info, warn};

use crate::job::Job;
use crate::notify::NotifySink;
use crate::report::{self, Report};

/// One registered job with its config, state, and collaborators.
pub struct TaskRunner<C, S, N> {
    name: String,
    options: JobOptions,
    job: Box<dyn Job>,
    state: TaskState,
    recipients: Vec<String>,
    clock: C,
    sleeper: S,
    sink: N,
}

impl<C: Clock, S: Sleeper, N: NotifySink> TaskRunner<C, S, N> {
    pub fn new(
        name: impl Into<String>,
        options: JobOptions,
        job: Box<dyn Job>,
        recipients: Vec<String>,
        clock: C,
        sleeper: S,
        sink: N,
    ) -> Self {
        Self {
            name: name.into(),
            options,
            job,
            state: TaskState::new(),
            recipients,
            clock,
            sleeper,
            sink,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &JobOptions {
        &self.options
    }

    pub fn state(&self) -> &TaskState {
        &self.state
    }

    /// Execute the job once, update state, notify if warranted, and sleep
    /// the configured cooldown.
    pub fn run_once(&mut self) {
        let started = self.clock.now();
        debug!(task = %self.name, logger = %self.options.logger_name, "starting");

        let result = match catch_unwind(AssertUnwindSafe(|| self.job.run())) {
            Ok(result) => result,
            Err(payload) => Err(JobFailure::from_panic(payload)),
        };

        let outcome =
            Outcome { started, ended: self.clock.now(), failure: result.err() };
        match outcome.failure.clone() {
            None => self.on_success(&outcome),
            Some(failure) => self.on_failure(failure),
        }
    }

    fn on_success(&mut self, outcome: &Outcome) {
        info!(
            task = %self.name,
            duration = %format_elapsed(outcome.duration()),
            "executed without failure"
        );

        let now = self.clock.now();
        let outage = self.state.downtime(now).unwrap_or(Duration::ZERO);
        let closed = self.state.record_success();
        if !closed.is_empty() {
            let report = {
                let distinct = self.state.distinct_failures();
                report::healed(&self.name, &closed, outage, &distinct)
            };
            self.emit(NotifyReason::Healed, report);
        }

        self.sleeper.sleep(self.options.success_cooldown);
    }

    fn on_failure(&mut self, failure: JobFailure) {
        warn!(task = %self.name, kind = %failure.kind, message = %failure.message, "failed");
        for line in failure.trace.lines() {
            debug!(task = %self.name, "{line}");
        }

        let now = self.clock.now();
        self.state.record_failure(failure, now, self.clock.epoch_ms());

        let streak_len = self.state.streak().len();
        if streak_len > 1 {
            error!(task = %self.name, count = streak_len, "failed consecutively");
        }

        if let Some(reason) = decide(&self.state, self.options.non_recoverable_downtime, now) {
            let downtime = self.state.downtime(now).unwrap_or(Duration::ZERO);
            let report = {
                let all_time = self.state.all_time();
                let current = &all_time[all_time.len() - 1];
                let distinct = self.state.distinct_failures();
                report::failure(&self.name, reason, current, streak_len, downtime, &distinct)
            };
            self.emit(reason, report);
        }

        self.sleeper.sleep(self.options.fail_cooldown);
    }

    /// Record the notification, then hand it to the sink. Delivery
    /// failures are logged and swallowed; they never reach the loop.
    fn emit(&mut self, reason: NotifyReason, report: Report) {
        self.state.record_notification(reason, self.clock.now(), self.clock.epoch_ms());
        info!(task = %self.name, %reason, subject = %report.subject, "notifying");
        if let Err(e) = self.sink.notify(&self.recipients, &report.subject, &report.body) {
            warn!(task = %self.name, %reason, error = %e, "notification delivery failed");
        }
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
