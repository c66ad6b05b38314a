//! Rule error types.

use thiserror::Error;

/// Result type for rule construction.
pub type RuleResult<T> = Result<T, RuleError>;

/// Errors that can occur while building a rule from options.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("Cannot build a rule from empty options")]
    EmptyOptions,

    #[error("Unknown predicate: {name}")]
    UnknownPredicate { name: String },

    #[error("Invalid argument for {predicate}: expected {expected}, got {actual}")]
    InvalidArgument {
        predicate: String,
        expected: String,
        actual: String,
    },

    #[error("Unknown format: {name}")]
    UnknownFormat { name: String },

    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Invalid options: {message}")]
    InvalidOptions { message: String },
}

impl RuleError {
    pub fn unknown_predicate(name: impl Into<String>) -> Self {
        Self::UnknownPredicate { name: name.into() }
    }

    pub fn invalid_argument(
        predicate: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            predicate: predicate.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn unknown_format(name: impl Into<String>) -> Self {
        Self::UnknownFormat { name: name.into() }
    }

    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    pub fn invalid_options(message: impl Into<String>) -> Self {
        Self::InvalidOptions {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for RuleError {
    fn from(e: serde_json::Error) -> Self {
        Self::invalid_options(e.to_string())
    }
}
