//! Seam between the init guard and the embedded interpreter.
//!
//! [`CoreRuntime`] is the only surface the guard touches. The CPython
//! backend implements it over the C API; tests implement it with a
//! recording double.

use tracing::warn;

use crate::policy::CorePolicy;

/// Errors produced by core initialization.
///
/// Every interpreter-side failure collapses into one kind. Recovery does not
/// depend on which subsystem failed: the caller either retries or aborts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InitError {
    /// The interpreter core could not be brought up.
    #[error("interpreter core initialization failed")]
    InitializationFailed,
}

/// Status reported by the interpreter for a configuration or bring-up step.
///
/// Mirrors the interpreter's own status object. It is translated into
/// [`InitError`] by [`CoreStatus::into_result`] and never crosses the
/// crate boundary.
///
/// Only the crate itself collapses a status into [`InitError`]:
///
/// ```compile_fail
/// let _ = corecast::CoreStatus::Ok.into_failure();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreStatus {
    /// The step succeeded.
    Ok,
    /// The interpreter reported an error.
    Error {
        /// Interpreter function that raised the error, when known.
        func: Option<String>,
        /// Interpreter diagnostic text, when available.
        message: Option<String>,
    },
    /// The interpreter asked the process to exit.
    Exit {
        /// Requested exit code.
        code: i32,
    },
}

impl CoreStatus {
    /// Build an error status carrying only a message.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            func: None,
            message: Some(message.into()),
        }
    }

    /// Returns `true` for any status other than [`CoreStatus::Ok`].
    pub fn is_exception(&self) -> bool {
        !matches!(self, Self::Ok)
    }

    /// Translate into the crate's result type.
    ///
    /// The interpreter diagnostic is logged and then dropped.
    pub fn into_result(self) -> Result<(), InitError> {
        if self.is_exception() {
            Err(self.into_failure())
        } else {
            Ok(())
        }
    }

    /// Log this status and collapse it into [`InitError::InitializationFailed`].
    ///
    /// Callers pass only exception statuses.
    pub(crate) fn into_failure(self) -> InitError {
        match self {
            Self::Ok => {
                warn!("interpreter reported success where a failure was expected");
            }
            Self::Error { func, message } => {
                warn!(
                    func = func.as_deref().unwrap_or("<unknown>"),
                    message = message.as_deref().unwrap_or("<none>"),
                    "interpreter core reported an error"
                );
            }
            Self::Exit { code } => {
                warn!(code, "interpreter core requested exit during bring-up");
            }
        }
        InitError::InitializationFailed
    }
}

/// Interpreter operations needed to bring up its core.
pub trait CoreRuntime: Send + Sync {
    /// Owning configuration handle. Dropping it releases the configuration.
    type Config;

    /// Whether the interpreter is already live through some other path.
    fn is_live(&self) -> bool;

    /// Allocate a configuration and apply `policy` to it.
    ///
    /// # Errors
    ///
    /// Returns the interpreter status when allocation or any option fails.
    /// A partially built handle must be released before returning.
    fn create_config(&self, policy: &CorePolicy) -> Result<Self::Config, CoreStatus>;

    /// Run core bring-up with `config`.
    fn bring_up(&self, config: &Self::Config) -> CoreStatus;
}
