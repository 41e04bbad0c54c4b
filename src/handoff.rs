//! Hand-off to the orchestration layer.
//!
//! Core bring-up skips the interpreter's main phase. Whatever that phase
//! would have done (running the `__main__` equivalent, registering
//! builtins) belongs to an [`Orchestrator`] supplied by the embedding.

use anyhow::Context;
use tracing::{debug, info};

use crate::guard::{InitGuard, InitOutcome};
use crate::runtime::CoreRuntime;

/// External layer that takes over once the interpreter core is up.
pub trait Orchestrator {
    /// Called once after the guard moves to initialized.
    ///
    /// # Errors
    ///
    /// Any error is propagated to the caller of [`boot`]. The guard stays
    /// initialized; retrying the hand-off is the orchestrator's business.
    fn on_core_ready(&mut self) -> anyhow::Result<()>;
}

/// Initialize the interpreter core and hand off to `orchestrator`.
///
/// The orchestrator runs only for the call that moved the guard to
/// initialized. Later calls return [`InitOutcome::AlreadyInitialized`]
/// without invoking it again.
///
/// # Errors
///
/// Returns an error when core initialization fails or when the
/// orchestrator's hand-off fails.
pub fn boot<R, O>(
    guard: &InitGuard,
    runtime: &R,
    orchestrator: &mut O,
) -> anyhow::Result<InitOutcome>
where
    R: CoreRuntime + ?Sized,
    O: Orchestrator + ?Sized,
{
    let outcome = guard
        .initialize(runtime)
        .context("interpreter core bring-up failed")?;

    if outcome.is_fresh() {
        info!(?outcome, "handing off to orchestration layer");
        orchestrator
            .on_core_ready()
            .context("orchestration layer failed after core bring-up")?;
    } else {
        debug!("core already initialized, orchestration hand-off skipped");
    }

    Ok(outcome)
}
