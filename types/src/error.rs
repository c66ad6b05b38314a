//! Type error types.

use sieve_core::Value;
use sieve_rule::Evaluation;
use thiserror::Error;

/// Result type for raising type operations.
pub type TypeResult<T> = Result<T, TypeError>;

/// An input could not be coerced by a type.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct CoercionError {
    input: Value,
    message: String,
}

impl CoercionError {
    pub fn new(input: Value, message: impl Into<String>) -> Self {
        Self {
            input,
            message: message.into(),
        }
    }

    pub fn input(&self) -> &Value {
        &self.input
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// An input violated the rule of a constrained type.
///
/// Carries the failed evaluation, so callers can tell which clauses failed.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{input} violates constraints: {result}")]
pub struct ConstraintError {
    result: Evaluation,
    input: Value,
}

impl ConstraintError {
    /// Wrap a failed evaluation and the input that triggered it.
    pub fn new(result: Evaluation, input: Value) -> Self {
        debug_assert!(result.is_failure(), "constraint error built from a successful evaluation");
        Self { result, input }
    }

    /// The failed evaluation.
    pub fn result(&self) -> &Evaluation {
        &self.result
    }

    /// The input handed to the constrained type.
    pub fn input(&self) -> &Value {
        &self.input
    }

    /// Names of the failing predicates.
    pub fn failed_predicates(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.result.failed_predicates()
    }
}

/// Errors raised by type operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TypeError {
    #[error(transparent)]
    Coercion(#[from] CoercionError),

    #[error(transparent)]
    Constraint(#[from] ConstraintError),
}

impl TypeError {
    /// Check if this is a constraint violation.
    pub fn is_constraint(&self) -> bool {
        matches!(self, TypeError::Constraint(_))
    }

    pub fn as_constraint(&self) -> Option<&ConstraintError> {
        match self {
            TypeError::Constraint(e) => Some(e),
            TypeError::Coercion(_) => None,
        }
    }

    pub fn as_coercion(&self) -> Option<&CoercionError> {
        match self {
            TypeError::Coercion(e) => Some(e),
            TypeError::Constraint(_) => None,
        }
    }

    /// The input that caused the error.
    pub fn input(&self) -> &Value {
        match self {
            TypeError::Coercion(e) => e.input(),
            TypeError::Constraint(e) => e.input(),
        }
    }
}
