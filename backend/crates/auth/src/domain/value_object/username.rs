//! Username Value Object
//!
//! Display name chosen at registration. Not an identifier: uniqueness is
//! carried by the email, so two users may share a username.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for username (in characters)
pub const USERNAME_MAX_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Trim and validate: 1..=64 characters, no control characters
    pub fn new(raw: impl Into<String>) -> AppResult<Self> {
        let trimmed = raw.into().trim().to_string();

        if trimmed.is_empty() {
            return Err(AppError::bad_request("Username cannot be empty"));
        }

        if trimmed.chars().count() > USERNAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Username must be at most {} characters",
                USERNAME_MAX_LENGTH
            )));
        }

        if trimmed.chars().any(char::is_control) {
            return Err(AppError::bad_request(
                "Username contains invalid control characters",
            ));
        }

        Ok(Self(trimmed))
    }

    pub fn from_stored(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
