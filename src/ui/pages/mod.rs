// src/ui/pages/mod.rs - Page components module

mod login;

pub use login::{AuthenticatorContext, LoginForm, ANIMATION_CSS};
