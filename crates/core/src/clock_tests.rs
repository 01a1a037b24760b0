// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn system_clock_returns_increasing_time() {
    let clock = SystemClock;
    let t1 = clock.now();
    std::thread::sleep(Duration::from_millis(1));
    let t2 = clock.now();
    assert!(t2 > t1);
}

#[test]
fn fake_clock_can_be_advanced() {
    let clock = FakeClock::new();
    let t1 = clock.now();
    clock.advance(Duration::from_secs(60));
    let t2 = clock.now();
    assert!(t2.duration_since(t1) >= Duration::from_secs(60));
}

#[test]
fn fake_clock_advances_epoch_ms_in_step() {
    let clock = FakeClock::new();
    let e1 = clock.epoch_ms();
    clock.advance(Duration::from_millis(1500));
    assert_eq!(clock.epoch_ms(), e1 + 1500);
}

#[test]
fn fake_clock_is_cloneable_and_shared() {
    let clock1 = FakeClock::new();
    let clock2 = clock1.clone();
    let t1 = clock1.now();
    clock2.advance(Duration::from_secs(30));
    let t2 = clock1.now();
    assert!(t2.duration_since(t1) >= Duration::from_secs(30));
}

#[test]
fn fake_sleeper_advances_its_clock() {
    let clock = FakeClock::new();
    let sleeper = FakeSleeper::new(clock.clone());
    let t1 = clock.now();
    sleeper.sleep(Duration::from_secs(300));
    assert_eq!(clock.now().duration_since(t1), Duration::from_secs(300));
}

#[test]
fn fake_sleeper_records_requested_sleeps() {
    let sleeper = FakeSleeper::new(FakeClock::new());
    sleeper.sleep(Duration::from_secs(5));
    sleeper.sleep(Duration::from_secs(20));
    assert_eq!(sleeper.slept(), vec![Duration::from_secs(5), Duration::from_secs(20)]);
}
