// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification sinks.
//!
//! The scheduler hands finished reports (recipients, subject, body) to a
//! [`NotifySink`]. Delivery failures are the sink's or caller's problem to
//! log; they must never crash the scheduler loop.

use thiserror::Error;

/// Errors from notify operations
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("send failed: {0}")]
    SendFailed(String),
}

/// Sink for operator notifications
pub trait NotifySink: Clone + Send + 'static {
    /// Deliver a notification to the given recipients.
    fn notify(&self, recipients: &[String], subject: &str, body: &str) -> Result<(), NotifyError>;
}

/// Desktop notification sink built on notify-rust.
///
/// Desktop notifications have no addressing, so recipients are logged for
/// the operator's benefit and otherwise ignored. Show failures are logged
/// and swallowed: this sink is fire-and-forget.
#[derive(Clone, Copy, Debug, Default)]
pub struct DesktopNotifySink;

impl DesktopNotifySink {
    pub fn new() -> Self {
        Self
    }
}

impl NotifySink for DesktopNotifySink {
    fn notify(&self, recipients: &[String], subject: &str, body: &str) -> Result<(), NotifyError> {
        tracing::info!(recipients = ?recipients, %subject, "sending desktop notification");
        match notify_rust::Notification::new().summary(subject).body(body).show() {
            Ok(_) => tracing::info!(%subject, "desktop notification sent"),
            Err(e) => tracing::warn!(%subject, error = %e, "desktop notification failed"),
        }
        Ok(())
    }
}

#[cfg(test)]
pub use fake::{FakeNotifySink, FailingNotifySink, NotifyCall};
