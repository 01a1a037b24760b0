// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Compact elapsed-time formatting for logs and report bodies.

use std::time::Duration;

/// Format a duration as a compact human string: `45s`, `12m`, `1h 30m`,
/// `2d 4h`. Sub-minute precision is dropped once the duration reaches an
/// hour; zero-valued trailing units are omitted.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs < 60 {
        return format!("{}s", secs);
    }
    let mins = secs / 60;
    if mins < 60 {
        let rem = secs % 60;
        return if rem == 0 { format!("{}m", mins) } else { format!("{}m {}s", mins, rem) };
    }
    let hours = mins / 60;
    if hours < 24 {
        let rem = mins % 60;
        return if rem == 0 { format!("{}h", hours) } else { format!("{}h {}m", hours, rem) };
    }
    let days = hours / 24;
    let rem = hours % 24;
    if rem == 0 {
        format!("{}d", days)
    } else {
        format!("{}d {}h", days, rem)
    }
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
