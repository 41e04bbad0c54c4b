//! Two-valued status handed across the host boundary.

use std::ffi::c_int;

use crate::runtime::InitError;

/// Result of an initialize call as seen by the host.
///
/// No error payload crosses the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootStatus {
    /// The interpreter core is up.
    Success,
    /// Bring-up failed; the call may be retried.
    Failure,
}

impl BootStatus {
    /// C return code: `0` for success, `1` for failure.
    pub fn as_raw(self) -> c_int {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }

    /// Returns `true` for [`BootStatus::Success`].
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl<T> From<Result<T, InitError>> for BootStatus {
    fn from(result: Result<T, InitError>) -> Self {
        match result {
            Ok(_) => Self::Success,
            Err(InitError::InitializationFailed) => Self::Failure,
        }
    }
}
