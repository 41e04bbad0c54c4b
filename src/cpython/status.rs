//! Decoding of interpreter failure reports into [`CoreStatus`].
//!
//! The backends read raw return codes and borrowed C strings; the mapping
//! from those to a status is kept here so it can be tested without
//! libpython.

use std::ffi::{c_int, CStr};

use crate::runtime::CoreStatus;

/// Status kinds reported by the `PyConfig` shim. Matches `corecast_shim.c`.
pub const SHIM_OK: c_int = 0;
/// The shim's bring-up reported an error.
pub const SHIM_ERROR: c_int = 1;
/// The shim's bring-up requested a process exit.
pub const SHIM_EXIT: c_int = 2;

const NO_DIAGNOSTIC: &str = "interpreter reported a failure without a diagnostic";

fn owned(text: Option<&CStr>) -> Option<String> {
    text.map(|text| text.to_string_lossy().into_owned())
}

/// Decode the failure recorded on a `PyInitConfig` handle.
///
/// `exit_rc` and `error_rc` are the return values of
/// `PyInitConfig_GetExitCode` and `PyInitConfig_GetError`; `1` means the
/// out-parameter was filled. An exit request wins over an error message.
pub fn from_init_config(
    exit_rc: c_int,
    exit_code: c_int,
    error_rc: c_int,
    message: Option<&CStr>,
) -> CoreStatus {
    if exit_rc == 1 {
        return CoreStatus::Exit { code: exit_code };
    }
    match message {
        Some(message) if error_rc == 1 => CoreStatus::Error {
            func: None,
            message: owned(Some(message)),
        },
        _ => CoreStatus::error(NO_DIAGNOSTIC),
    }
}

/// Decode a status returned by the `PyConfig` shim.
///
/// Unknown kinds are treated as errors so a mismatched shim never reads as
/// success.
pub fn from_shim(
    kind: c_int,
    exit_code: c_int,
    func: Option<&CStr>,
    message: Option<&CStr>,
) -> CoreStatus {
    match kind {
        SHIM_OK => CoreStatus::Ok,
        SHIM_EXIT => CoreStatus::Exit { code: exit_code },
        SHIM_ERROR if func.is_some() || message.is_some() => CoreStatus::Error {
            func: owned(func),
            message: owned(message),
        },
        _ => CoreStatus::error(NO_DIAGNOSTIC),
    }
}
