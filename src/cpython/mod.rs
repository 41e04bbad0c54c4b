//! CPython backends for [`crate::runtime::CoreRuntime`].
//!
//! Two backends, one per interpreter API, selected by cargo feature:
//! - `cpython-314` ([`init_config`]): the opaque `PyInitConfig_*` API. Needs
//!   CPython 3.14 or newer.
//! - `cpython-313` ([`shim`]): the `PyConfig` struct API through a small C
//!   shim compiled by the build script. Works with CPython 3.11 and newer,
//!   including the 3.13 library the sandbox ships.
//!
//! Both export [`CPythonRuntime`]. Status decoding lives in [`status`] and
//! does not need the interpreter to be linked.

#[cfg(all(feature = "cpython-313", feature = "cpython-314"))]
compile_error!("features `cpython-313` and `cpython-314` select different backends; enable only one");

pub mod status;

#[cfg(feature = "cpython-314")]
pub mod init_config;
#[cfg(feature = "cpython-314")]
pub use init_config::CPythonRuntime;

#[cfg(all(feature = "cpython-313", not(feature = "cpython-314")))]
pub mod shim;
#[cfg(all(feature = "cpython-313", not(feature = "cpython-314")))]
pub use shim::CPythonRuntime;
