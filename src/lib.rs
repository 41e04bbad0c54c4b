//! corecast — core-only bring-up of an embedded CPython inside a WASI sandbox.
//!
//! Brings the interpreter to its "core" state and stops there: no standard
//! streams, no signal handlers, no `site`, no `__main__`. Imports are served
//! from the frozen module table linked into the binary. Everything the
//! skipped main phase would have done is left to the orchestration layer
//! (see [`handoff`]).
//!
//! The moving parts:
//! - [`guard::InitGuard`] makes initialization idempotent and safe under
//!   concurrent callers.
//! - [`assembly`] builds the fixed [`policy::CorePolicy`] configuration,
//!   runs bring-up and releases the configuration on every path.
//! - [`runtime::CoreRuntime`] is the seam to the interpreter. The real
//!   backends and the host C ABI are behind cargo features:
//!   `cpython-314` (alias `cpython`) needs CPython 3.14 or newer, while
//!   `cpython-313` goes through a `PyConfig` shim for CPython 3.11 to 3.13.
//!
//! See `DESIGN.md` for the decisions behind the guard semantics.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod assembly;
pub mod boundary;
pub mod config;
pub mod cpython;
pub mod guard;
pub mod handoff;
pub mod logging;
pub mod policy;
pub mod runtime;

#[cfg(any(feature = "cpython-313", feature = "cpython-314"))]
pub mod exports;

pub use boundary::BootStatus;
pub use guard::{ForeignLiveness, InitGuard, InitOutcome, InitState};
pub use handoff::{boot, Orchestrator};
pub use policy::CorePolicy;
pub use runtime::{CoreRuntime, CoreStatus, InitError};
