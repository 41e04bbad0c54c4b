//! Repeated initialize calls bring the core up once.

use corecast::{InitGuard, InitOutcome, InitState};

use crate::common::RecordingRuntime;

#[test]
fn first_call_brings_up_core() {
    let guard = InitGuard::new();
    let runtime = RecordingRuntime::new();

    assert_eq!(guard.initialize(&runtime), Ok(InitOutcome::BroughtUp));
    assert!(guard.is_initialized());
    assert_eq!(guard.state(), InitState::Initialized);
    assert_eq!(runtime.bring_up_calls(), 1);
}

#[test]
fn second_call_is_a_no_op() {
    let guard = InitGuard::new();
    let runtime = RecordingRuntime::new();

    assert_eq!(guard.initialize(&runtime), Ok(InitOutcome::BroughtUp));
    assert_eq!(
        guard.initialize(&runtime),
        Ok(InitOutcome::AlreadyInitialized)
    );
    assert_eq!(runtime.bring_up_calls(), 1);
    assert_eq!(runtime.configs_created(), 1);
}

#[test]
fn many_calls_touch_the_interpreter_once() {
    let guard = InitGuard::new();
    let runtime = RecordingRuntime::new();

    for _ in 0..16 {
        assert!(guard.initialize(&runtime).is_ok());
    }
    assert_eq!(runtime.bring_up_calls(), 1);
    // Only the first call reaches the liveness check.
    assert_eq!(runtime.liveness_checks(), 1);
    assert!(guard.is_initialized());
}

#[test]
fn is_initialized_before_any_attempt_is_false() {
    let guard = InitGuard::default();
    let runtime = RecordingRuntime::new();

    assert!(!guard.is_initialized());
    assert_eq!(runtime.liveness_checks(), 0);
    assert_eq!(runtime.bring_up_calls(), 0);
}

#[test]
fn guards_are_independent() {
    let first = InitGuard::new();
    let second = InitGuard::new();
    let runtime = RecordingRuntime::new();

    assert!(first.initialize(&runtime).is_ok());
    assert!(first.is_initialized());
    assert!(!second.is_initialized());
}

#[test]
fn config_released_after_success() {
    let guard = InitGuard::new();
    let runtime = RecordingRuntime::new();

    assert!(guard.initialize(&runtime).is_ok());
    assert_eq!(runtime.configs_created(), 1);
    assert_eq!(runtime.configs_released(), 1);
}
