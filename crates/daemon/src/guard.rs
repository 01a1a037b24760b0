// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-instance pidfile guard.
//!
//! At most one scheduler runs per pidfile path. On acquire, any pid found
//! in the file is checked against the OS process table (a `/proc` lookup,
//! not a signal probe). A live competitor is either a fatal conflict or,
//! with `kill_concurrent`, terminated with SIGTERM and waited out on a
//! bounded poll. A stale record is silently reclaimed. Our own pid is then
//! written, flushed, and fsynced before the guard reports success; a
//! crash after the write but before the sync must not look "clean".
//!
//! Guard failure is the only fatal path in the whole system.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use thiserror::Error;
use tracing::{debug, error};

/// Poll cadence while waiting for a terminated competitor to exit
const KILL_POLL_INTERVAL: Duration = Duration::from_secs(5);
/// Bounded number of polls before giving up on the competitor
const KILL_WAIT_ATTEMPTS: u32 = 6;

/// Errors from guard acquisition. All of these are fatal to the process.
#[derive(Debug, Error)]
pub enum GuardError {
    #[error("pidfile {path} holds live pid {pid} and concurrent runs are not allowed")]
    Conflict { path: PathBuf, pid: i32 },
    #[error("concurrent pid {0} did not exit within the wait budget")]
    Unresolved(i32),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Pidfile-based single-instance guard.
///
/// Constructed once at process start; `acquire` runs before the scheduler
/// loop and the pidfile is held for the process lifetime. Dropping the
/// guard releases the file only if this process still owns it.
pub struct InstanceGuard {
    pidfile: PathBuf,
    allow_concurrent: bool,
    kill_concurrent: bool,
    poll_interval: Duration,
    held: bool,
}

impl InstanceGuard {
    pub fn new(pidfile: impl Into<PathBuf>, allow_concurrent: bool, kill_concurrent: bool) -> Self {
        Self {
            pidfile: pidfile.into(),
            allow_concurrent,
            kill_concurrent,
            poll_interval: KILL_POLL_INTERVAL,
            held: false,
        }
    }

    pub fn pidfile(&self) -> &Path {
        &self.pidfile
    }

    /// Shorten the competitor-exit poll interval (tests only).
    #[cfg(test)]
    pub(crate) fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Detect and resolve a competing instance, then write our own pid.
    pub fn acquire(&mut self) -> Result<(), GuardError> {
        if self.pidfile.exists() {
            match read_pid(&self.pidfile) {
                Ok(pid) => {
                    debug!(path = %self.pidfile.display(), pid, "found pidfile");
                    self.resolve_competitor(pid)?;
                }
                Err(e) => {
                    // Unreadable record: assume no live competitor and keep
                    // going. Risky, but not worth dying over.
                    error!(path = %self.pidfile.display(), error = %e, "could not read pidfile");
                }
            }
        } else {
            debug!(path = %self.pidfile.display(), "no pidfile, continuing normally");
        }

        self.write_own_pid()?;
        self.held = true;
        Ok(())
    }

    /// Release the pidfile if this process still owns it.
    ///
    /// A successor started with `kill_concurrent` may have overwritten the
    /// file; in that case it is theirs and must be left alone.
    pub fn release(&mut self) {
        if !self.held {
            return;
        }
        self.held = false;
        if let Ok(pid) = read_pid(&self.pidfile) {
            if pid == std::process::id() as i32 {
                let _ = fs::remove_file(&self.pidfile);
                debug!(path = %self.pidfile.display(), "released pidfile");
            }
        }
    }

    fn resolve_competitor(&self, pid: i32) -> Result<(), GuardError> {
        if !process_alive(pid) {
            debug!(pid, path = %self.pidfile.display(), "process not found, wiping stale pidfile");
            let _ = fs::remove_file(&self.pidfile);
            return Ok(());
        }

        if self.allow_concurrent {
            debug!(pid, "concurrent instance is live but concurrent runs are allowed");
            return Ok(());
        }

        if !self.kill_concurrent {
            error!(path = %self.pidfile.display(), pid, "pidfile holds a pid which is still running");
            return Err(GuardError::Conflict { path: self.pidfile.clone(), pid });
        }

        // ESRCH here means the competitor exited between the liveness check
        // and the kill; the poll below settles it either way.
        match kill(Pid::from_raw(pid), Signal::SIGTERM) {
            Ok(()) => debug!(pid, "sent SIGTERM to concurrent instance"),
            Err(e) => debug!(pid, error = %e, "SIGTERM delivery failed"),
        }

        let mut attempts = 0;
        while process_alive(pid) {
            if attempts == KILL_WAIT_ATTEMPTS {
                error!(pid, "exiting because concurrent pid is still there");
                return Err(GuardError::Unresolved(pid));
            }
            attempts += 1;
            debug!(pid, attempt = attempts, "concurrent pid still alive, waiting");
            std::thread::sleep(self.poll_interval);
        }
        Ok(())
    }

    fn write_own_pid(&self) -> Result<(), GuardError> {
        let mut file = File::create(&self.pidfile)?;
        write!(file, "{}", std::process::id())?;
        file.flush()?;
        // Force the record to storage before claiming the instance.
        file.sync_all()?;
        debug!(path = %self.pidfile.display(), pid = std::process::id(), "wrote pidfile");
        Ok(())
    }
}

impl Drop for InstanceGuard {
    fn drop(&mut self) {
        self.release();
    }
}

/// Whether a pid is present in the OS process table.
///
/// Uses procfs rather than a signal-0 probe, so no signal is ever sent
/// while merely checking liveness.
pub(crate) fn process_alive(pid: i32) -> bool {
    Path::new("/proc").join(pid.to_string()).exists()
}

fn read_pid(path: &Path) -> Result<i32, std::io::Error> {
    let contents = fs::read_to_string(path)?;
    contents
        .trim()
        .parse::<i32>()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
#[path = "guard_tests.rs"]
mod tests;
