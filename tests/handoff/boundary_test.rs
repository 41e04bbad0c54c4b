//! Two-valued boundary status for the four bring-up scenarios.

use corecast::{BootStatus, CoreStatus, InitGuard};

use crate::common::RecordingRuntime;

#[test]
fn healthy_core_reports_success() {
    let guard = InitGuard::new();
    let runtime = RecordingRuntime::new();

    let status = BootStatus::from(guard.initialize(&runtime));
    assert_eq!(status, BootStatus::Success);
    assert_eq!(status.as_raw(), 0);
    assert!(guard.is_initialized());
}

#[test]
fn repeat_call_reports_success_without_bring_up() {
    let guard = InitGuard::new();
    let runtime = RecordingRuntime::new();

    let _ = guard.initialize(&runtime);
    let status = BootStatus::from(guard.initialize(&runtime));
    assert!(status.is_success());
    assert_eq!(runtime.bring_up_calls(), 1);
}

#[test]
fn interpreter_failure_reports_failure() {
    let guard = InitGuard::new();
    let runtime = RecordingRuntime::new();
    runtime.script([CoreStatus::error("no memory")]);

    let status = BootStatus::from(guard.initialize(&runtime));
    assert_eq!(status, BootStatus::Failure);
    assert_eq!(status.as_raw(), 1);
    assert!(!guard.is_initialized());
    assert_eq!(runtime.configs_released(), 1);
}

#[test]
fn live_interpreter_reports_success_and_sets_guard() {
    let guard = InitGuard::new();
    let runtime = RecordingRuntime::already_live();

    let status = BootStatus::from(guard.initialize(&runtime));
    assert!(status.is_success());
    assert!(guard.is_initialized());
    assert_eq!(runtime.bring_up_calls(), 0);
}
