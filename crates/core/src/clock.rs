// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock and sleep abstractions for testable time handling.
//!
//! The scheduler is deliberately synchronous and blocking, so both reading
//! the time and spending it go through traits: [`Clock`] for "what time is
//! it" and [`Sleeper`] for cooldown sleeps. Production uses [`SystemClock`]
//! and [`ThreadSleeper`]; tests use [`FakeClock`] and [`FakeSleeper`], which
//! advance fake time instead of blocking.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// A clock that provides the current time
pub trait Clock: Clone + Send + Sync {
    /// Monotonic instant, used for all duration arithmetic
    fn now(&self) -> Instant;
    /// Wall-clock milliseconds since the Unix epoch, used for display
    fn epoch_ms(&self) -> u64;
}

/// Real system clock
#[derive(Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn epoch_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// A blocking sleep, used for post-execution cooldowns
pub trait Sleeper: Clone + Send {
    fn sleep(&self, duration: Duration);
}

/// Real sleeper backed by `std::thread::sleep`
#[derive(Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Fake clock for testing with controllable time
#[derive(Clone)]
pub struct FakeClock {
    inner: Arc<Mutex<FakeNow>>,
}

struct FakeNow {
    current: Instant,
    epoch_ms: u64,
}

impl FakeClock {
    pub fn new() -> Self {
        Self { inner: Arc::new(Mutex::new(FakeNow { current: Instant::now(), epoch_ms: 1_000_000 })) }
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        let mut now = self.inner.lock();
        now.current += duration;
        now.epoch_ms += duration.as_millis() as u64;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.inner.lock().current
    }

    fn epoch_ms(&self) -> u64 {
        self.inner.lock().epoch_ms
    }
}

/// Fake sleeper that advances a [`FakeClock`] instead of blocking.
///
/// Every requested sleep is also recorded, so tests can assert which
/// cooldown a runner chose.
#[derive(Clone)]
pub struct FakeSleeper {
    clock: FakeClock,
    slept: Arc<Mutex<Vec<Duration>>>,
}

impl FakeSleeper {
    pub fn new(clock: FakeClock) -> Self {
        Self { clock, slept: Arc::new(Mutex::new(Vec::new())) }
    }

    /// All sleeps requested so far, in order
    pub fn slept(&self) -> Vec<Duration> {
        self.slept.lock().clone()
    }
}

impl Sleeper for FakeSleeper {
    fn sleep(&self, duration: Duration) {
        self.slept.lock().push(duration);
        self.clock.advance(duration);
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
