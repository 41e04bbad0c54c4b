//! CPython 3.14+ backend for [`CoreRuntime`].
//!
//! Uses the opaque-handle initialization API added in CPython 3.14
//! (`PyInitConfig_*`); it does not link against older libraries. The handle
//! hides the `PyConfig` layout, so nothing here depends on the interpreter's
//! struct definitions. A handle created by `PyInitConfig_Create` starts from
//! the isolated configuration; the policy options are applied on top of it
//! one by one.

#![allow(unsafe_code)]

use std::ffi::{c_char, c_int, CStr};
use std::ptr::{self, NonNull};

use tracing::trace;

use super::status;
use crate::policy::CorePolicy;
use crate::runtime::{CoreRuntime, CoreStatus};

/// Opaque `PyInitConfig`.
#[repr(C)]
pub struct PyInitConfig {
    _private: [u8; 0],
}

mod ffi {
    use std::ffi::{c_char, c_int};

    use super::PyInitConfig;

    extern "C" {
        pub fn PyInitConfig_Create() -> *mut PyInitConfig;
        pub fn PyInitConfig_Free(config: *mut PyInitConfig);
        pub fn PyInitConfig_SetInt(
            config: *mut PyInitConfig,
            name: *const c_char,
            value: i64,
        ) -> c_int;
        pub fn PyInitConfig_GetError(config: *mut PyInitConfig, err_msg: *mut *const c_char)
            -> c_int;
        pub fn PyInitConfig_GetExitCode(config: *mut PyInitConfig, exitcode: *mut c_int) -> c_int;
        pub fn Py_InitializeFromInitConfig(config: *mut PyInitConfig) -> c_int;
        pub fn Py_IsInitialized() -> c_int;
    }
}

/// Owning handle over a `PyInitConfig`. Freed on drop.
#[derive(Debug)]
pub struct InitConfigHandle {
    ptr: NonNull<PyInitConfig>,
}

impl InitConfigHandle {
    /// Allocate a configuration with isolated defaults.
    pub fn create() -> Option<Self> {
        // SAFETY: no preconditions; a null return means allocation failed.
        let raw = unsafe { ffi::PyInitConfig_Create() };
        NonNull::new(raw).map(|ptr| Self { ptr })
    }

    /// Set one integer option by interpreter name.
    ///
    /// # Errors
    ///
    /// Returns the status recorded on the handle when the option is unknown
    /// or has the wrong type.
    pub fn set_option(&self, name: &CStr, enabled: bool) -> Result<(), CoreStatus> {
        trace!(option = %name.to_string_lossy(), enabled, "applying core option");
        // SAFETY: `ptr` is a live handle owned by `self`; `name` is NUL-terminated.
        let rc = unsafe {
            ffi::PyInitConfig_SetInt(self.ptr.as_ptr(), name.as_ptr(), i64::from(enabled))
        };
        if rc == 0 {
            Ok(())
        } else {
            Err(self.status())
        }
    }

    /// Read the failure recorded on the handle.
    ///
    /// Only meaningful after a call on this handle returned an error.
    pub fn status(&self) -> CoreStatus {
        let mut code: c_int = 0;
        // SAFETY: `ptr` is live; `code` is a valid out-pointer.
        let exit_rc = unsafe { ffi::PyInitConfig_GetExitCode(self.ptr.as_ptr(), &mut code) };

        let mut msg: *const c_char = ptr::null();
        // SAFETY: `ptr` is live; `msg` is a valid out-pointer.
        let error_rc = unsafe { ffi::PyInitConfig_GetError(self.ptr.as_ptr(), &mut msg) };
        // SAFETY: a non-null message is NUL-terminated and owned by the
        // handle, which outlives this borrow; decoding copies it.
        let message = (!msg.is_null()).then(|| unsafe { CStr::from_ptr(msg) });

        status::from_init_config(exit_rc, code, error_rc, message)
    }

    fn as_ptr(&self) -> *mut PyInitConfig {
        self.ptr.as_ptr()
    }
}

impl Drop for InitConfigHandle {
    fn drop(&mut self) {
        // SAFETY: the handle was created by PyInitConfig_Create and is freed once.
        unsafe { ffi::PyInitConfig_Free(self.ptr.as_ptr()) };
    }
}

/// [`CoreRuntime`] backed by the linked CPython.
#[derive(Debug, Clone, Copy, Default)]
pub struct CPythonRuntime;

impl CoreRuntime for CPythonRuntime {
    type Config = InitConfigHandle;

    fn is_live(&self) -> bool {
        // SAFETY: callable at any time, including before initialization.
        unsafe { ffi::Py_IsInitialized() != 0 }
    }

    fn create_config(&self, policy: &CorePolicy) -> Result<InitConfigHandle, CoreStatus> {
        let handle = InitConfigHandle::create()
            .ok_or_else(|| CoreStatus::error("PyInitConfig_Create returned NULL"))?;
        for (name, enabled) in policy.int_options() {
            handle.set_option(name, enabled)?;
        }
        Ok(handle)
    }

    fn bring_up(&self, config: &InitConfigHandle) -> CoreStatus {
        // SAFETY: `config` is a live handle; calls are serialized by the guard.
        let rc = unsafe { ffi::Py_InitializeFromInitConfig(config.as_ptr()) };
        if rc == 0 {
            CoreStatus::Ok
        } else {
            config.status()
        }
    }
}
