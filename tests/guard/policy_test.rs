//! Every configuration handed to bring-up carries the fixed policy.

use corecast::{CorePolicy, CoreStatus, InitGuard};

use crate::common::RecordingRuntime;

#[test]
fn bring_up_receives_embedded_policy() {
    let guard = InitGuard::new();
    let runtime = RecordingRuntime::new();

    assert!(guard.initialize(&runtime).is_ok());
    assert_eq!(runtime.policies(), vec![CorePolicy::EMBEDDED]);
}

#[test]
fn policy_is_fixed_across_attempts() {
    let guard = InitGuard::new();
    let runtime = RecordingRuntime::new();
    runtime.script([
        CoreStatus::error("one"),
        CoreStatus::Exit { code: 2 },
        CoreStatus::Ok,
    ]);

    for _ in 0..4 {
        let _ = guard.initialize(&runtime);
    }

    let policies = runtime.policies();
    assert_eq!(policies.len(), 3);
    for policy in policies {
        assert!(policy.isolated);
        assert!(policy.use_frozen_modules);
        assert!(!policy.install_signal_handlers);
        assert!(!policy.site_import);
        assert!(!policy.pathconfig_warnings);
        assert!(!policy.is_python_build);
        assert!(!policy.init_main);
    }
}
