// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Duration;

fn failure() -> JobFailure {
    JobFailure::new("io-error", "connection refused").with_trace("at main.rs:1")
}

#[test]
fn identical_failures_are_equivalent() {
    assert!(failure().same_as(&failure()));
}

#[test]
fn equivalence_ignores_timestamps() {
    let at = Instant::now();
    let a = FailureRecord::new(failure(), at, 1_000);
    let b = FailureRecord::new(failure(), at + Duration::from_secs(86_400), 90_000_000);
    assert!(a.failure.same_as(&b.failure));
}

#[yare::parameterized(
    kind    = { JobFailure::new("timeout", "connection refused").with_trace("at main.rs:1") },
    message = { JobFailure::new("io-error", "connection reset").with_trace("at main.rs:1") },
    trace   = { JobFailure::new("io-error", "connection refused").with_trace("at main.rs:2") },
    no_trace = { JobFailure::new("io-error", "connection refused") },
)]
fn any_differing_field_breaks_equivalence(other: JobFailure) {
    assert!(!failure().same_as(&other));
}

#[test]
fn panic_payload_str_becomes_message() {
    let payload: Box<dyn std::any::Any + Send> = Box::new("index out of bounds");
    let f = JobFailure::from_panic(payload);
    assert_eq!(f.kind, "panic");
    assert_eq!(f.message, "index out of bounds");
    assert_eq!(f.trace, "");
}

#[test]
fn panic_payload_string_becomes_message() {
    let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("boom"));
    let f = JobFailure::from_panic(payload);
    assert_eq!(f.message, "boom");
}

#[test]
fn opaque_panic_payload_gets_placeholder_message() {
    let payload: Box<dyn std::any::Any + Send> = Box::new(42u32);
    let f = JobFailure::from_panic(payload);
    assert_eq!(f.message, "unhandled panic");
}

#[test]
fn display_is_kind_and_message() {
    assert_eq!(failure().to_string(), "io-error: connection refused");
}
