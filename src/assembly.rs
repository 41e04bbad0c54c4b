//! Core configuration assembly.
//!
//! Builds a fresh configuration from [`CorePolicy::EMBEDDED`], hands it to
//! the interpreter by reference and releases it before the status is looked
//! at. The handle lives only inside [`bring_up_core`].

use tracing::debug;

use crate::policy::CorePolicy;
use crate::runtime::{CoreRuntime, InitError};

/// Assemble a core configuration and run one bring-up attempt.
///
/// # Errors
///
/// Returns [`InitError::InitializationFailed`] when the configuration cannot
/// be built or the interpreter reports an exception status.
pub fn bring_up_core<R: CoreRuntime + ?Sized>(runtime: &R) -> Result<(), InitError> {
    let policy = CorePolicy::EMBEDDED;
    debug!(?policy, "assembling interpreter core configuration");

    let config = runtime
        .create_config(&policy)
        .map_err(|status| status.into_failure())?;

    // Unwinding out of bring_up still drops the handle.
    let status = runtime.bring_up(&config);
    drop(config);

    status.into_result()
}
