//! Concurrent initialize calls bring the core up exactly once.

use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use corecast::{CoreStatus, InitError, InitGuard, InitOutcome};

use crate::common::RecordingRuntime;

const CALLERS: usize = 8;

fn race(
    guard: &Arc<InitGuard>,
    runtime: &Arc<RecordingRuntime>,
) -> Vec<Result<InitOutcome, InitError>> {
    let barrier = Arc::new(Barrier::new(CALLERS));
    let handles: Vec<_> = (0..CALLERS)
        .map(|_| {
            let guard = Arc::clone(guard);
            let runtime = Arc::clone(runtime);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                guard.initialize(runtime.as_ref())
            })
        })
        .collect();

    handles
        .into_iter()
        .map(|handle| handle.join().expect("caller thread should not panic"))
        .collect()
}

#[test]
fn racing_callers_bring_up_once() {
    let guard = Arc::new(InitGuard::new());
    let runtime = Arc::new(RecordingRuntime::new());
    runtime.delay_bring_up(Duration::from_millis(20));

    let results = race(&guard, &runtime);

    assert!(results.iter().all(Result::is_ok));
    let brought_up = results
        .iter()
        .filter(|r| matches!(r, Ok(InitOutcome::BroughtUp)))
        .count();
    assert_eq!(brought_up, 1);
    assert_eq!(runtime.bring_up_calls(), 1);
    assert_eq!(runtime.configs_released(), 1);
    assert!(guard.is_initialized());
}

#[test]
fn racing_callers_after_failure_retry_serially() {
    let guard = Arc::new(InitGuard::new());
    let runtime = Arc::new(RecordingRuntime::new());
    runtime.delay_bring_up(Duration::from_millis(5));
    runtime.script([CoreStatus::error("first caller fails")]);

    let results = race(&guard, &runtime);

    // One caller fails, the next one through the lock succeeds, the rest
    // find the guard set.
    assert_eq!(results.iter().filter(|r| r.is_err()).count(), 1);
    assert_eq!(runtime.bring_up_calls(), 2);
    assert_eq!(runtime.configs_released(), 2);
    assert!(guard.is_initialized());
}
