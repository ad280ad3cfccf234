// src/error.rs - Error handling for the portal runtime

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    Configuration {
        key: Option<String>,
        validation_errors: Vec<String>,
    },
    /// A timer could not be scheduled
    Scheduler,
    Application,
    Io,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Error {
    pub id: Uuid,
    pub kind: ErrorKind,
    pub message: String,
    pub severity: ErrorSeverity,
    pub source: String,
    pub timestamp: DateTime<Utc>,
    pub causes: Vec<String>,
}

impl Error {
    /// Creates a new error with the specified kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            severity: ErrorSeverity::Medium,
            source: "unknown".to_string(),
            timestamp: crate::utils::time::Time::now(),
            causes: Vec::new(),
        }
    }

    /// Sets the error severity
    pub fn severity(mut self, severity: ErrorSeverity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the error source
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Adds a cause to the error chain
    pub fn caused_by(mut self, cause: impl fmt::Display) -> Self {
        self.causes.push(cause.to_string());
        self
    }

    /// Creates a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::Configuration {
                key: None,
                validation_errors: Vec::new(),
            },
            message,
        )
            .severity(ErrorSeverity::High)
    }

    /// Creates a configuration error for a specific key
    pub fn config_key(
        key: impl Into<String>,
        validation_errors: Vec<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(
            ErrorKind::Configuration {
                key: Some(key.into()),
                validation_errors,
            },
            message,
        )
            .severity(ErrorSeverity::High)
    }

    /// Creates a scheduler error; a missing timer only costs the delayed toast
    pub fn scheduler(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Scheduler, message)
            .severity(ErrorSeverity::Low)
            .source("scheduler")
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({}): {}",
            self.severity, self.source, self.id, self.message
        )
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let msg = err.to_string();

        let mut error = Error::new(ErrorKind::Io, msg);
        error.source = "std::io::Error".to_string();
        error.severity = ErrorSeverity::High;

        error
    }
}

/// Extension trait for Results to add context
pub trait ResultExt<T> {
    /// Wraps the error in an application error with the given message,
    /// keeping the original as a cause
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| Error::new(ErrorKind::Application, f()).caused_by(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let error = Error::config("Invalid configuration value").source("portal_config");

        assert_eq!(error.severity, ErrorSeverity::High);
        assert_eq!(error.source, "portal_config");
        assert!(matches!(error.kind, ErrorKind::Configuration { .. }));
    }

    #[test]
    fn test_scheduler_error() {
        let error = Error::scheduler("no runtime");
        assert_eq!(error.kind, ErrorKind::Scheduler);
        assert_eq!(error.severity, ErrorSeverity::Low);
        assert_eq!(error.source, "scheduler");
        assert!(error.to_string().starts_with("[LOW] scheduler"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "portal.toml");
        let error: Error = io.into();
        assert_eq!(error.kind, ErrorKind::Io);
        assert_eq!(error.severity, ErrorSeverity::High);
        assert!(error.to_string().contains("portal.toml"));
    }

    #[test]
    fn test_result_context() {
        let result: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        let error = result
            .with_context(|| "Failed to read portal config".to_string())
            .unwrap_err();
        assert_eq!(error.message, "Failed to read portal config");
        assert_eq!(error.causes, vec!["disk".to_string()]);
    }
}
