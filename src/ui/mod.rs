// src/ui/mod.rs - Login form UI

//! The login form is split the same way on every platform:
//! - [`controller`] owns the ephemeral view state and the toast timer
//! - [`state`] holds the plain state types and the reducer
//! - [`pages`] and [`components`] render snapshots with Dioxus and call back
//!   into the controller

// Re-export main app component
pub use app::App;

// Module declarations
pub mod app;
pub mod components;
pub mod controller;
pub mod desktop_css;
pub mod pages;
pub mod state;
pub mod theme;

// Re-exports for convenience
pub use controller::{LoginController, SubmitOutcome};
pub use pages::{AuthenticatorContext, LoginForm};
pub use state::{login_state_reducer, LoginAction, LoginState, ToastState, UiToggles};
pub use theme::Palette;
