// src/lib.rs

//! Hopewell Portal - the hospital portal's login form
//!
//! Client-side username/password validation, a dark-mode toggle and a
//! delayed welcome toast, rendered with Dioxus on desktop and web.

#![deny(unsafe_code)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    if let Err(e) = tracing_wasm::try_set_as_global_default() {
        web_sys::console::error_1(&format!("Failed to set up tracing: {:?}", e).into());
    }

    dioxus::launch(ui::App);
}

// Core modules (always available)
pub mod auth;
pub mod config;
pub mod error;
pub mod scheduler;
pub mod ui;
pub mod utils;
pub mod validation;

// Native-only modules
#[cfg(not(target_arch = "wasm32"))]
pub mod logging;

// Re-export commonly used types
pub use error::{Error, ErrorKind, Result, ResultExt};
pub use validation::{validate, FormFields, ValidationErrors, ValidationReport};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
