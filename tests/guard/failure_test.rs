//! Failed bring-up leaves the guard unset and releases the configuration.

use std::panic::{self, AssertUnwindSafe};

use corecast::{CoreStatus, InitError, InitGuard, InitOutcome, InitState};

use crate::common::RecordingRuntime;

#[test]
fn interpreter_error_reports_failure() {
    let guard = InitGuard::new();
    let runtime = RecordingRuntime::new();
    runtime.script([CoreStatus::error("can't initialize sys module")]);

    assert_eq!(
        guard.initialize(&runtime),
        Err(InitError::InitializationFailed)
    );
    assert!(!guard.is_initialized());
    assert_eq!(runtime.configs_created(), 1);
    assert_eq!(runtime.configs_released(), 1);
}

#[test]
fn exit_request_reports_failure() {
    let guard = InitGuard::new();
    let runtime = RecordingRuntime::new();
    runtime.script([CoreStatus::Exit { code: 1 }]);

    assert_eq!(
        guard.initialize(&runtime),
        Err(InitError::InitializationFailed)
    );
    assert_eq!(guard.state(), InitState::Uninitialized);
    assert_eq!(runtime.configs_released(), 1);
}

#[test]
fn failure_is_retryable() {
    let guard = InitGuard::new();
    let runtime = RecordingRuntime::new();
    runtime.script([CoreStatus::error("first attempt"), CoreStatus::Ok]);

    assert!(guard.initialize(&runtime).is_err());
    assert!(!guard.is_initialized());

    assert_eq!(guard.initialize(&runtime), Ok(InitOutcome::BroughtUp));
    assert!(guard.is_initialized());
    assert_eq!(runtime.bring_up_calls(), 2);
    assert_eq!(runtime.configs_created(), 2);
    assert_eq!(runtime.configs_released(), 2);
}

#[test]
fn each_failing_call_attempts_once() {
    let guard = InitGuard::new();
    let runtime = RecordingRuntime::new();
    runtime.script((0..3).map(|_| CoreStatus::error("still broken")));

    for attempt in 1..=3 {
        assert!(guard.initialize(&runtime).is_err());
        assert_eq!(runtime.bring_up_calls(), attempt);
        assert_eq!(runtime.configs_released(), attempt);
    }
}

#[test]
fn config_creation_failure_skips_bring_up() {
    let guard = InitGuard::new();
    let runtime = RecordingRuntime::new();
    runtime.fail_config_creation(true);

    assert_eq!(
        guard.initialize(&runtime),
        Err(InitError::InitializationFailed)
    );
    assert_eq!(runtime.bring_up_calls(), 0);
    assert!(!guard.is_initialized());

    runtime.fail_config_creation(false);
    assert_eq!(guard.initialize(&runtime), Ok(InitOutcome::BroughtUp));
}

#[test]
fn panicking_bring_up_rolls_back_and_releases() {
    let guard = InitGuard::new();
    let runtime = RecordingRuntime::new();
    runtime.panic_on_bring_up(true);

    let unwound = panic::catch_unwind(AssertUnwindSafe(|| guard.initialize(&runtime)));
    assert!(unwound.is_err());
    assert_eq!(guard.state(), InitState::Uninitialized);
    assert_eq!(runtime.configs_created(), 1);
    assert_eq!(runtime.configs_released(), 1);

    // The serializing lock is poisoned now; the guard still works.
    runtime.panic_on_bring_up(false);
    assert_eq!(guard.initialize(&runtime), Ok(InitOutcome::BroughtUp));
    assert!(guard.is_initialized());
}
