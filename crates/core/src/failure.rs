// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Captured job failures and their equivalence relation.
//!
//! Two failures are "the same" iff kind, message, and trace text are all
//! byte-identical. This deliberately strict comparison is the single dedup
//! primitive for the whole system: both the failure history and the
//! escalation decision go through [`JobFailure::same_as`]. Exact trace
//! matching can over-count "new" failures when trace text varies run to
//! run.

use std::any::Any;
use std::time::Instant;

/// One captured failure: what went wrong, in text form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobFailure {
    /// Concrete failure category (error kind, exit status class, "panic", ...)
    pub kind: String,
    /// Human-readable failure message
    pub message: String,
    /// Formatted trace text (stderr tail, error chain, ...), possibly empty
    pub trace: String,
}

impl JobFailure {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self { kind: kind.into(), message: message.into(), trace: String::new() }
    }

    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = trace.into();
        self
    }

    /// The equivalence relation: kind, message, and trace all byte-identical.
    ///
    /// Timestamps never participate; a failure seen yesterday and the same
    /// failure seen now are equivalent.
    pub fn same_as(&self, other: &JobFailure) -> bool {
        self.kind == other.kind && self.message == other.message && self.trace == other.trace
    }

    /// Convert a caught panic payload into a failure with kind `"panic"`.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unhandled panic".to_string()
        };
        Self::new("panic", message)
    }
}

impl std::fmt::Display for JobFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// A failure plus when it was captured.
///
/// `at` is monotonic and drives all duration arithmetic; `at_ms` is
/// wall-clock epoch milliseconds for display in reports and logs.
#[derive(Debug, Clone)]
pub struct FailureRecord {
    pub failure: JobFailure,
    pub at: Instant,
    pub at_ms: u64,
}

impl FailureRecord {
    pub fn new(failure: JobFailure, at: Instant, at_ms: u64) -> Self {
        Self { failure, at, at_ms }
    }
}

#[cfg(test)]
#[path = "failure_tests.rs"]
mod tests;
