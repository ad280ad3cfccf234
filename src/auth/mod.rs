// src/auth/mod.rs - Authentication collaborator for the login form

use std::fmt;

use serde::{Deserialize, Serialize};

/// Credentials handed over after a successful validation pass
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub remember_me: bool,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>, remember_me: bool) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            remember_me,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .field("remember_me", &self.remember_me)
            .finish()
    }
}

/// Receives validated credentials from the login form.
///
/// Implementations must not panic; the form treats the hand-off as
/// fire-and-forget.
#[cfg(not(target_arch = "wasm32"))]
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, credentials: &Credentials);
}

#[cfg(target_arch = "wasm32")]
pub trait Authenticator {
    fn authenticate(&self, credentials: &Credentials);
}

/// Default collaborator: records the login attempt in the log and nothing else
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingAuthenticator;

impl Authenticator for LoggingAuthenticator {
    fn authenticate(&self, credentials: &Credentials) {
        tracing::info!(
            username = %credentials.username,
            password_len = credentials.password.chars().count(),
            remember_me = credentials.remember_me,
            "Logging in"
        );
    }
}
