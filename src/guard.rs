//! Init-state guard for interpreter core bring-up.
//!
//! [`InitGuard`] records whether the core is up and makes `initialize`
//! idempotent. It is an ordinary value owned by the embedding context, so
//! tests build a fresh one each time and the host exports keep a single
//! process-wide instance.
//!
//! State machine:
//!
//! ```text
//! Uninitialized ──initialize──▶ Initializing ──ok──▶ Initialized (terminal)
//!       ▲                            │
//!       └──────────failure───────────┘
//! ```
//!
//! `initialize` calls are serialized by a lock held for the whole attempt,
//! while the state itself is an atomic so `is_initialized` never blocks.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, PoisonError};

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::assembly;
use crate::runtime::{CoreRuntime, InitError};

const UNINITIALIZED: u8 = 0;
const INITIALIZING: u8 = 1;
const INITIALIZED: u8 = 2;

/// Observable guard state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitState {
    /// No successful bring-up yet.
    Uninitialized,
    /// A bring-up attempt is in flight.
    Initializing,
    /// The core is up. Never left.
    Initialized,
}

impl InitState {
    fn from_raw(raw: u8) -> Self {
        match raw {
            INITIALIZED => Self::Initialized,
            INITIALIZING => Self::Initializing,
            _ => Self::Uninitialized,
        }
    }
}

/// How to treat an interpreter that is already live while the guard is not set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForeignLiveness {
    /// Accept the live interpreter and mark the guard initialized.
    #[default]
    Adopt,
    /// Refuse to proceed; report a failure and leave the guard unset.
    Reject,
}

/// Successful result of [`InitGuard::initialize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// This call ran core bring-up and it succeeded.
    BroughtUp,
    /// The guard was already set; nothing was touched.
    AlreadyInitialized,
    /// The interpreter was live through another path and has been adopted.
    AdoptedLiveInterpreter,
}

impl InitOutcome {
    /// Whether this call moved the guard to [`InitState::Initialized`].
    pub fn is_fresh(self) -> bool {
        !matches!(self, Self::AlreadyInitialized)
    }
}

/// Process-wide latch gating interpreter core bring-up.
#[derive(Debug)]
pub struct InitGuard {
    state: AtomicU8,
    serial: Mutex<()>,
    foreign_liveness: ForeignLiveness,
}

impl InitGuard {
    /// Create an unset guard that adopts an already-live interpreter.
    pub const fn new() -> Self {
        Self::with_foreign_liveness(ForeignLiveness::Adopt)
    }

    /// Create an unset guard with an explicit foreign-liveness policy.
    pub const fn with_foreign_liveness(foreign_liveness: ForeignLiveness) -> Self {
        Self {
            state: AtomicU8::new(UNINITIALIZED),
            serial: Mutex::new(()),
            foreign_liveness,
        }
    }

    /// Whether core initialization has succeeded. Never blocks.
    pub fn is_initialized(&self) -> bool {
        self.state() == InitState::Initialized
    }

    /// Current guard state.
    pub fn state(&self) -> InitState {
        InitState::from_raw(self.state.load(Ordering::Acquire))
    }

    /// Foreign-liveness policy this guard was built with.
    pub fn foreign_liveness(&self) -> ForeignLiveness {
        self.foreign_liveness
    }

    /// Bring up the interpreter core at most once.
    ///
    /// Returns immediately when the guard is already set. Otherwise consults
    /// the interpreter's own liveness check, then runs one configuration
    /// assembly and bring-up attempt. Only a successful attempt sets the
    /// guard; a failed one leaves it unset so the call can be retried.
    ///
    /// # Errors
    ///
    /// Returns [`InitError::InitializationFailed`] when bring-up fails, or
    /// when the interpreter is already live and the guard was built with
    /// [`ForeignLiveness::Reject`].
    pub fn initialize<R: CoreRuntime + ?Sized>(
        &self,
        runtime: &R,
    ) -> Result<InitOutcome, InitError> {
        if self.is_initialized() {
            debug!("interpreter core already initialized");
            return Ok(InitOutcome::AlreadyInitialized);
        }

        // Poisoned only if a previous attempt unwound; Transition already rolled back.
        let _serial = self.serial.lock().unwrap_or_else(PoisonError::into_inner);

        if self.is_initialized() {
            debug!("interpreter core initialized by a concurrent caller");
            return Ok(InitOutcome::AlreadyInitialized);
        }

        if runtime.is_live() {
            return self.reconcile_live_interpreter();
        }

        let transition = Transition::begin(&self.state);
        match assembly::bring_up_core(runtime) {
            Ok(()) => {
                transition.commit();
                info!("interpreter core initialized");
                Ok(InitOutcome::BroughtUp)
            }
            Err(err) => {
                drop(transition);
                warn!(error = %err, "interpreter core bring-up failed, guard left unset");
                Err(err)
            }
        }
    }

    fn reconcile_live_interpreter(&self) -> Result<InitOutcome, InitError> {
        match self.foreign_liveness {
            ForeignLiveness::Adopt => {
                self.state.store(INITIALIZED, Ordering::Release);
                info!("interpreter already live, adopting it without bring-up");
                Ok(InitOutcome::AdoptedLiveInterpreter)
            }
            ForeignLiveness::Reject => {
                warn!("interpreter already live through another path, refusing to adopt it");
                Err(InitError::InitializationFailed)
            }
        }
    }
}

impl Default for InitGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// Holds the guard in `Initializing`; rolls back unless committed.
struct Transition<'a> {
    state: &'a AtomicU8,
    committed: bool,
}

impl<'a> Transition<'a> {
    fn begin(state: &'a AtomicU8) -> Self {
        state.store(INITIALIZING, Ordering::Release);
        Self {
            state,
            committed: false,
        }
    }

    fn commit(mut self) {
        self.state.store(INITIALIZED, Ordering::Release);
        self.committed = true;
    }
}

impl Drop for Transition<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.state.store(UNINITIALIZED, Ordering::Release);
        }
    }
}
