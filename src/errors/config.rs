// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for process configuration.

/// Errors raised while reading process configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("Missing required environment variable {name}")]
    Missing { name: &'static str },

    /// A variable is set but cannot be parsed.
    #[error("Invalid value {value:?} for {name}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    /// Create a `Missing` error.
    pub fn missing(name: &'static str) -> Self {
        ConfigError::Missing { name }
    }

    /// Create an `Invalid` error.
    pub fn invalid(name: &'static str, value: impl Into<String>, reason: impl ToString) -> Self {
        ConfigError::Invalid {
            name,
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}
