// src/validation.rs

//! Login form field validation
//!
//! Each field has its own ordered rule chain and only the first failing rule
//! is reported. Both fields are always checked so the form can show every
//! problem after a single submit.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum username length, in UTF-16 code units
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Minimum password length, in UTF-16 code units
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Characters accepted as the password's special character
pub const SPECIAL_CHARACTERS: &[char] = &['!', '@', '#', '$', '%', '^', '&', '*'];

/// Raw values of the two text inputs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    pub username: String,
    pub password: String,
}

impl FormFields {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Which text input an edit applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Username,
    Password,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UsernameError {
    #[error("Username is required.")]
    Required,
    #[error("Username must be at least 3 characters long.")]
    TooShort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("Password is required.")]
    Required,
    #[error("Password must be at least 8 characters long.")]
    TooShort,
    #[error("Password must contain at least one uppercase letter.")]
    MissingUppercase,
    #[error("Password must contain at least one number.")]
    MissingDigit,
    #[error("Password must contain at least one special character.")]
    MissingSpecial,
}

/// User-visible error messages, one slot per field; `None` means the field passed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub username_error: Option<String>,
    pub password_error: Option<String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.username_error.is_none() && self.password_error.is_none()
    }
}

/// Outcome of one validation pass over both fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub username: Option<UsernameError>,
    pub password: Option<PasswordError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.username.is_none() && self.password.is_none()
    }

    /// Message form of the report, as shown next to the inputs
    pub fn errors(&self) -> ValidationErrors {
        ValidationErrors {
            username_error: self.username.map(|e| e.to_string()),
            password_error: self.password.map(|e| e.to_string()),
        }
    }
}

/// Length in UTF-16 code units, the unit browsers report for input values
fn input_length(value: &str) -> usize {
    value.encode_utf16().count()
}

pub fn validate_username(username: &str) -> Option<UsernameError> {
    if username.is_empty() {
        Some(UsernameError::Required)
    } else if input_length(username) < MIN_USERNAME_LENGTH {
        Some(UsernameError::TooShort)
    } else {
        None
    }
}

pub fn validate_password(password: &str) -> Option<PasswordError> {
    if password.is_empty() {
        Some(PasswordError::Required)
    } else if input_length(password) < MIN_PASSWORD_LENGTH {
        Some(PasswordError::TooShort)
    } else if !password.chars().any(|c| c.is_ascii_uppercase()) {
        Some(PasswordError::MissingUppercase)
    } else if !password.chars().any(|c| c.is_ascii_digit()) {
        Some(PasswordError::MissingDigit)
    } else if !password.chars().any(|c| SPECIAL_CHARACTERS.contains(&c)) {
        Some(PasswordError::MissingSpecial)
    } else {
        None
    }
}

/// Runs both rule chains; never short-circuits across fields
pub fn validate(fields: &FormFields) -> ValidationReport {
    ValidationReport {
        username: validate_username(&fields.username),
        password: validate_password(&fields.password),
    }
}
