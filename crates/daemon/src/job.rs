// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job bodies: opaque, no-argument, fallible operations.
//!
//! The scheduler treats a job as a black box that either completes or
//! fails. Library users register any closure; the `steadyd` binary
//! registers [`CommandJob`]s built from `name=command` specs, where a
//! non-zero exit status is the failure and captured stderr is the trace.

use std::process::Command;

use steady_core::JobFailure;

/// A registered, no-argument, potentially-failing operation.
pub trait Job: Send {
    fn run(&self) -> Result<(), JobFailure>;
}

impl<F> Job for F
where
    F: Fn() -> Result<(), JobFailure> + Send,
{
    fn run(&self) -> Result<(), JobFailure> {
        self()
    }
}

/// A job that runs a shell command line via `sh -c`.
#[derive(Debug, Clone)]
pub struct CommandJob {
    command: String,
}

impl CommandJob {
    pub fn new(command: impl Into<String>) -> Self {
        Self { command: command.into() }
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

impl Job for CommandJob {
    fn run(&self) -> Result<(), JobFailure> {
        let output = Command::new("/bin/sh")
            .arg("-c")
            .arg(&self.command)
            .output()
            .map_err(|e| JobFailure::new("spawn-error", e.to_string()))?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim_end().to_string();
        let failure = match output.status.code() {
            Some(code) => {
                JobFailure::new("exit-status", format!("command exited with status {code}"))
            }
            // terminated by a signal; unix-only detail left out of the message
            None => JobFailure::new("signal", "command terminated by signal"),
        };
        Err(failure.with_trace(stderr))
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
