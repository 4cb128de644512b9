//! Link setup for the `python` feature.
//!
//! The `_dwimeta` extension module is loaded by the interpreter, which
//! provides the libpython symbols. macOS linkers reject those unresolved
//! symbols unless told to defer them to load time.

use std::env;

fn main() {
    if env::var_os("CARGO_FEATURE_PYTHON").is_none() {
        return;
    }
    if env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("macos") {
        println!("cargo:rustc-link-arg=-Wl,-undefined,dynamic_lookup");
    }
}
