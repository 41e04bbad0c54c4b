//! Fixed option set for core-only interpreter bring-up.
//!
//! The policy is baked into the embedding. Nothing on the initialize path
//! accepts caller-supplied values: the sandbox owns signal delivery, has no
//! site packages, and serves imports from the frozen module table.

use std::ffi::CStr;

/// Interpreter options applied to every core configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorePolicy {
    /// Ignore ambient environment variables, paths and user site directories.
    pub isolated: bool,
    /// Serve imports from the embedded frozen module table.
    pub use_frozen_modules: bool,
    /// Let the interpreter install its own signal handlers.
    pub install_signal_handlers: bool,
    /// Import `site` during startup.
    pub site_import: bool,
    /// Emit warnings when the path configuration cannot be computed.
    pub pathconfig_warnings: bool,
    /// Treat the layout as a from-source build tree.
    pub is_python_build: bool,
    /// Run the main initialization phase (streams, `__main__`).
    pub init_main: bool,
}

impl CorePolicy {
    /// The policy used for every bring-up inside the sandbox.
    pub const EMBEDDED: Self = Self {
        isolated: true,
        use_frozen_modules: true,
        install_signal_handlers: false,
        site_import: false,
        pathconfig_warnings: false,
        is_python_build: false,
        init_main: false,
    };

    /// Interpreter option names paired with their values, in application order.
    pub fn int_options(&self) -> [(&'static CStr, bool); 7] {
        [
            (c"isolated", self.isolated),
            (c"use_frozen_modules", self.use_frozen_modules),
            (c"install_signal_handlers", self.install_signal_handlers),
            (c"site_import", self.site_import),
            (c"pathconfig_warnings", self.pathconfig_warnings),
            (c"_is_python_build", self.is_python_build),
            (c"_init_main", self.init_main),
        ]
    }

    /// Returns `true` when this policy is exactly [`CorePolicy::EMBEDDED`].
    pub fn is_embedded(&self) -> bool {
        *self == Self::EMBEDDED
    }
}
