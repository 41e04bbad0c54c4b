//! CPython backend and library selection for the build script.
//!
//! Kept free of cargo I/O so the rules can be tested from `tests/build.rs`.

/// Interpreter API the crate is built against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// `PyConfig` filled by the C shim (CPython 3.11 to 3.13).
    ConfigShim,
    /// Opaque `PyInitConfig_*` API (CPython 3.14+).
    InitConfig,
}

impl Backend {
    /// Pick the backend from the enabled cargo features.
    ///
    /// `Ok(None)` means no backend: nothing is linked.
    pub fn from_features(cpython_313: bool, cpython_314: bool) -> Result<Option<Self>, String> {
        match (cpython_313, cpython_314) {
            (false, false) => Ok(None),
            (true, false) => Ok(Some(Self::ConfigShim)),
            (false, true) => Ok(Some(Self::InitConfig)),
            (true, true) => Err(
                "features `cpython-313` and `cpython-314` are mutually exclusive; \
                 `cpython` implies `cpython-314`"
                    .to_owned(),
            ),
        }
    }

    /// Library linked when `CORECAST_PYTHON_LIB` is not set.
    pub fn default_lib(self) -> &'static str {
        match self {
            Self::ConfigShim => "python3.13",
            Self::InitConfig => "python3.14",
        }
    }

    /// Oldest `(major, minor)` the backend's API exists in.
    pub fn min_version(self) -> (u32, u32) {
        match self {
            Self::ConfigShim => (3, 11),
            Self::InitConfig => (3, 14),
        }
    }
}

/// Version encoded in a library name such as `python3.13` or `python3.14d`.
pub fn lib_version(lib: &str) -> Option<(u32, u32)> {
    let version = lib.strip_prefix("python")?;
    let (major, rest) = version.split_once('.')?;
    let minor_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let minor = rest.get(..minor_end)?;
    Some((major.parse().ok()?, minor.parse().ok()?))
}

/// Check `lib` against what `backend` needs.
///
/// Returns the parsed version, or `Ok(None)` when the name carries none and
/// the link is attempted as configured.
pub fn check_lib(backend: Backend, lib: &str) -> Result<Option<(u32, u32)>, String> {
    let Some(version) = lib_version(lib) else {
        return Ok(None);
    };
    let (min_major, min_minor) = backend.min_version();
    if version < (min_major, min_minor) {
        let hint = match backend {
            Backend::InitConfig => "; build with `--no-default-features --features cpython-313` instead",
            Backend::ConfigShim => "",
        };
        return Err(format!(
            "CORECAST_PYTHON_LIB={lib} is CPython {}.{}, but the {backend:?} backend needs \
             {min_major}.{min_minor} or newer{hint}",
            version.0, version.1
        ));
    }
    Ok(Some(version))
}
