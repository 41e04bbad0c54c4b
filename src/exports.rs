//! C ABI exported to the sandbox host.
//!
//! The host calls these before handing control to the orchestration layer.
//! Return codes follow the C convention of the host: `0` is success.

#![allow(unsafe_code)]

use std::ffi::c_int;
use std::panic;

use crate::boundary::BootStatus;
use crate::cpython::CPythonRuntime;
use crate::guard::InitGuard;

static CORE_GUARD: InitGuard = InitGuard::new();

/// The process-wide guard behind the exported functions.
///
/// Rust-side orchestration shares it with [`crate::handoff::boot`] so that
/// both entry points agree on the interpreter's state.
pub fn core_guard() -> &'static InitGuard {
    &CORE_GUARD
}

/// Bring up the interpreter core. Returns `0` on success, `1` on failure.
#[no_mangle]
pub extern "C" fn corecast_core_init() -> c_int {
    let status = panic::catch_unwind(|| CORE_GUARD.initialize(&CPythonRuntime))
        .map_or(BootStatus::Failure, BootStatus::from);
    status.as_raw()
}

/// Returns `1` if the interpreter core has been brought up, `0` otherwise.
#[no_mangle]
pub extern "C" fn corecast_core_is_initialized() -> c_int {
    c_int::from(CORE_GUARD.is_initialized())
}
