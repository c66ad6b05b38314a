//! Non-raising results of `try_call`.

use sieve_core::Value;

use crate::error::{TypeError, TypeResult};

/// An input paired with the error produced while processing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    input: Value,
    error: TypeError,
}

impl Failure {
    pub fn new(input: Value, error: impl Into<TypeError>) -> Self {
        Self {
            input,
            error: error.into(),
        }
    }

    pub fn input(&self) -> &Value {
        &self.input
    }

    pub fn error(&self) -> &TypeError {
        &self.error
    }

    pub fn into_error(self) -> TypeError {
        self.error
    }
}

/// Result of a non-raising type application.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(Value),
    Failure(Failure),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    /// The produced value, if successful.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(failure) => Some(failure),
        }
    }

    /// Convert into a raising result.
    pub fn into_result(self) -> TypeResult<Value> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(failure) => Err(failure.into_error()),
        }
    }
}
