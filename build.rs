//! Build script for corecast.
//!
//! Links the embedded CPython library when a backend feature is enabled.
//! `CORECAST_PYTHON_DIR` points at the directory holding the library and
//! `CORECAST_PYTHON_LIB` overrides its name (default `python3.14` for
//! `cpython-314`, `python3.13` for `cpython-313`). The 3.13 backend also
//! compiles `src/cpython/corecast_shim.c` against the headers in
//! `CORECAST_PYTHON_INCLUDE`.

use std::env;

#[path = "build/python.rs"]
mod python;

use python::Backend;

/// Emulation shims the wasi-sdk build of CPython links against.
const WASI_EMULATION_LIBS: [&str; 4] = [
    "wasi-emulated-signal",
    "wasi-emulated-process-clocks",
    "wasi-emulated-mman",
    "wasi-emulated-getpid",
];

const SHIM_SOURCE: &str = "src/cpython/corecast_shim.c";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=build/python.rs");
    println!("cargo:rerun-if-changed={SHIM_SOURCE}");
    println!("cargo:rerun-if-env-changed=CORECAST_PYTHON_DIR");
    println!("cargo:rerun-if-env-changed=CORECAST_PYTHON_LIB");
    println!("cargo:rerun-if-env-changed=CORECAST_PYTHON_INCLUDE");

    let backend = match Backend::from_features(
        env::var_os("CARGO_FEATURE_CPYTHON_313").is_some(),
        env::var_os("CARGO_FEATURE_CPYTHON_314").is_some(),
    ) {
        Ok(Some(backend)) => backend,
        Ok(None) => return,
        Err(msg) => panic!("corecast: {msg}"),
    };

    let target = env::var("TARGET").unwrap_or_else(|_| "unknown".to_owned());
    let wasm = target.starts_with("wasm32");
    let lib = env::var("CORECAST_PYTHON_LIB").unwrap_or_else(|_| backend.default_lib().to_owned());

    match python::check_lib(backend, &lib) {
        Ok(Some(_)) => {}
        Ok(None) => println!(
            "cargo:warning=corecast: cannot read a CPython version from `{lib}`, linking it as is"
        ),
        Err(msg) => panic!("corecast: {msg}"),
    }

    if backend == Backend::ConfigShim {
        compile_shim();
    }

    match env::var("CORECAST_PYTHON_DIR") {
        Ok(dir) => println!("cargo:rustc-link-search=native={dir}"),
        Err(_) => println!(
            "cargo:warning=corecast: CORECAST_PYTHON_DIR is not set, relying on the default linker search path"
        ),
    }

    // The sandbox build is always static; host builds use the shared library.
    let kind = if wasm { "static" } else { "dylib" };
    println!("cargo:rustc-link-lib={kind}={lib}");

    if wasm {
        for emulated in WASI_EMULATION_LIBS {
            println!("cargo:rustc-link-lib={emulated}");
        }
    }
}

/// Compile the `PyConfig` shim; `cc` emits its own link directives.
fn compile_shim() {
    let mut build = cc::Build::new();
    build.file(SHIM_SOURCE).warnings(true);
    match env::var("CORECAST_PYTHON_INCLUDE") {
        Ok(dir) => {
            build.include(dir);
        }
        Err(_) => println!(
            "cargo:warning=corecast: CORECAST_PYTHON_INCLUDE is not set, Python.h must be on the default include path"
        ),
    }
    build.compile("corecast_shim");
}
