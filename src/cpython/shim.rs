//! CPython 3.11–3.13 backend for [`CoreRuntime`].
//!
//! The `PyConfig` struct is filled by `corecast_shim.c`, which the build
//! script compiles against the interpreter's headers. The handle owns the
//! heap-allocated struct; dropping it runs `PyConfig_Clear` and frees it.

#![allow(unsafe_code)]

use std::ffi::{c_char, c_int, CStr};
use std::ptr::{self, NonNull};

use tracing::trace;

use super::status;
use crate::policy::CorePolicy;
use crate::runtime::{CoreRuntime, CoreStatus};

/// Opaque `PyConfig`; its layout stays on the C side.
#[repr(C)]
pub struct PyConfig {
    _private: [u8; 0],
}

mod ffi {
    use std::ffi::{c_char, c_int};

    use super::PyConfig;

    extern "C" {
        pub fn corecast_config_create() -> *mut PyConfig;
        pub fn corecast_config_free(config: *mut PyConfig);
        pub fn corecast_config_set_int(
            config: *mut PyConfig,
            name: *const c_char,
            value: c_int,
        ) -> c_int;
        pub fn corecast_initialize(
            config: *mut PyConfig,
            exitcode: *mut c_int,
            func: *mut *const c_char,
            err_msg: *mut *const c_char,
        ) -> c_int;
        pub fn Py_IsInitialized() -> c_int;
    }
}

/// Owning handle over a shim-allocated `PyConfig`. Cleared and freed on drop.
#[derive(Debug)]
pub struct ConfigHandle {
    ptr: NonNull<PyConfig>,
}

impl ConfigHandle {
    /// Allocate a configuration with isolated defaults.
    pub fn create() -> Option<Self> {
        // SAFETY: no preconditions; a null return means allocation failed.
        let raw = unsafe { ffi::corecast_config_create() };
        NonNull::new(raw).map(|ptr| Self { ptr })
    }

    /// Set one integer option by interpreter name.
    ///
    /// # Errors
    ///
    /// Returns an error status when the shim does not know the option.
    pub fn set_option(&self, name: &CStr, enabled: bool) -> Result<(), CoreStatus> {
        trace!(option = %name.to_string_lossy(), enabled, "applying core option");
        // SAFETY: `ptr` is a live handle owned by `self`; `name` is NUL-terminated.
        let rc = unsafe {
            ffi::corecast_config_set_int(self.ptr.as_ptr(), name.as_ptr(), c_int::from(enabled))
        };
        if rc == 0 {
            Ok(())
        } else {
            Err(CoreStatus::error(format!(
                "unknown config option name: {}",
                name.to_string_lossy()
            )))
        }
    }
}

impl Drop for ConfigHandle {
    fn drop(&mut self) {
        // SAFETY: the handle was created by corecast_config_create and is freed once.
        unsafe { ffi::corecast_config_free(self.ptr.as_ptr()) };
    }
}

/// [`CoreRuntime`] backed by the linked CPython through the `PyConfig` shim.
#[derive(Debug, Clone, Copy, Default)]
pub struct CPythonRuntime;

impl CoreRuntime for CPythonRuntime {
    type Config = ConfigHandle;

    fn is_live(&self) -> bool {
        // SAFETY: callable at any time, including before initialization.
        unsafe { ffi::Py_IsInitialized() != 0 }
    }

    fn create_config(&self, policy: &CorePolicy) -> Result<ConfigHandle, CoreStatus> {
        let handle = ConfigHandle::create()
            .ok_or_else(|| CoreStatus::error("PyConfig allocation returned NULL"))?;
        for (name, enabled) in policy.int_options() {
            handle.set_option(name, enabled)?;
        }
        Ok(handle)
    }

    fn bring_up(&self, config: &ConfigHandle) -> CoreStatus {
        let mut code: c_int = 0;
        let mut func: *const c_char = ptr::null();
        let mut msg: *const c_char = ptr::null();
        // SAFETY: `config` is a live handle; the out-pointers are valid and
        // calls are serialized by the guard.
        let kind = unsafe {
            ffi::corecast_initialize(config.ptr.as_ptr(), &mut code, &mut func, &mut msg)
        };
        // SAFETY: non-null status strings are static NUL-terminated literals
        // inside libpython.
        let func = (!func.is_null()).then(|| unsafe { CStr::from_ptr(func) });
        // SAFETY: as above.
        let message = (!msg.is_null()).then(|| unsafe { CStr::from_ptr(msg) });
        status::from_shim(kind, code, func, message)
    }
}
