//! Assertion types and builders for verifying step results.

use sieve_core::Value;
use sieve_types::{Outcome, TypeError};

use crate::error::{ScenarioError, ScenarioResult};
use crate::runner::StepResult;

/// A complete assertion for a step result.
#[derive(Debug, Default)]
pub struct Assertion {
    // Value assertions
    pub value: Option<Value>,
    pub fell_back: Option<bool>,

    // Error assertions
    pub violation: bool,
    pub violation_input: Option<Value>,
    pub failed: Option<Vec<String>>,
    pub coercion_error: bool,
    pub failure_input: Option<Value>,

    // Validity assertions
    pub valid: Option<bool>,
}

impl Assertion {
    /// Create a new empty assertion.
    pub fn new() -> Self {
        Self::default()
    }

    fn expects_error(&self) -> bool {
        self.violation || self.coercion_error
    }

    /// Verify the assertion against a step result.
    pub fn verify(&self, step: &str, result: &StepResult) -> ScenarioResult<()> {
        if let Some(expected) = self.valid {
            return match result {
                StepResult::Valid(actual) if *actual == expected => Ok(()),
                StepResult::Valid(actual) => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected valid = {}, got {}", expected, actual),
                )),
                other => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected a validity check, got {:?}", other),
                )),
            };
        }

        let (produced, error) = split(result);

        if let Some(error) = error {
            if !self.expects_error() {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("unexpected error: {}", error),
                ));
            }
            self.verify_error(step, error)?;
        } else if self.expects_error() {
            return Err(ScenarioError::assertion_failed(
                step,
                format!("expected an error, but step produced {:?}", produced),
            ));
        }

        if let Some(ref expected) = self.value {
            match produced {
                Some(actual) if actual == expected => {}
                other => {
                    return Err(ScenarioError::assertion_failed(
                        step,
                        format!("expected value {}, got {:?}", expected, other),
                    ))
                }
            }
        }

        if let Some(expected) = self.fell_back {
            match result {
                StepResult::CalledOrElse { fell_back, .. } if *fell_back == expected => {}
                other => {
                    return Err(ScenarioError::assertion_failed(
                        step,
                        format!("expected fell_back = {}, got {:?}", expected, other),
                    ))
                }
            }
        }

        if let Some(ref expected) = self.failure_input {
            match result {
                StepResult::Tried(Outcome::Failure(failure)) if failure.input() == expected => {}
                other => {
                    return Err(ScenarioError::assertion_failed(
                        step,
                        format!("expected failure for input {}, got {:?}", expected, other),
                    ))
                }
            }
        }

        Ok(())
    }

    fn verify_error(&self, step: &str, error: &TypeError) -> ScenarioResult<()> {
        if self.coercion_error && error.as_coercion().is_none() {
            return Err(ScenarioError::assertion_failed(
                step,
                format!("expected coercion error, got: {}", error),
            ));
        }

        if !self.violation {
            return Ok(());
        }

        let violation = error.as_constraint().ok_or_else(|| {
            ScenarioError::assertion_failed(
                step,
                format!("expected constraint violation, got: {}", error),
            )
        })?;

        if let Some(ref expected) = self.violation_input {
            if violation.input() != expected {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!(
                        "expected violation for input {}, got {}",
                        expected,
                        violation.input()
                    ),
                ));
            }
        }

        if let Some(ref expected) = self.failed {
            let actual: Vec<&str> = violation.failed_predicates().collect();
            if actual != *expected {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected failed predicates {:?}, got {:?}", expected, actual),
                ));
            }
        }

        Ok(())
    }
}

/// Split a step result into the value it produced or the error it raised.
fn split(result: &StepResult) -> (Option<&Value>, Option<&TypeError>) {
    match result {
        StepResult::Called(Ok(value)) => (Some(value), None),
        StepResult::Called(Err(error)) => (None, Some(error)),
        StepResult::CalledOrElse { value, .. } => (Some(value), None),
        StepResult::Tried(Outcome::Success(value)) => (Some(value), None),
        StepResult::Tried(Outcome::Failure(failure)) => (None, Some(failure.error())),
        StepResult::Valid(_) => (None, None),
    }
}

/// Builder for fluent assertion construction.
#[derive(Debug, Default)]
pub struct AssertionBuilder {
    assertion: Assertion,
}

impl AssertionBuilder {
    /// Create a new assertion builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the assertion.
    pub fn build(self) -> Assertion {
        self.assertion
    }

    // ========== Value assertions ==========

    /// Assert that the step produced this value.
    pub fn value(mut self, v: impl Into<Value>) -> Self {
        self.assertion.value = Some(v.into());
        self
    }

    /// Assert whether the fallback of `call_or_else` was used.
    pub fn fell_back(mut self, expected: bool) -> Self {
        self.assertion.fell_back = Some(expected);
        self
    }

    // ========== Error assertions ==========

    /// Assert a constraint violation.
    pub fn violation(mut self) -> Self {
        self.assertion.violation = true;
        self
    }

    /// Assert a constraint violation for this input.
    pub fn violation_for(mut self, input: impl Into<Value>) -> Self {
        self.assertion.violation = true;
        self.assertion.violation_input = Some(input.into());
        self
    }

    /// Assert exactly these predicates failed, in rule order.
    pub fn failed(mut self, predicates: &[&str]) -> Self {
        self.assertion.violation = true;
        self.assertion.failed = Some(predicates.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Assert a coercion error from the inner type.
    pub fn coercion_error(mut self) -> Self {
        self.assertion.coercion_error = true;
        self
    }

    /// Assert `try_call` returned a failure carrying this input.
    pub fn failure_for(mut self, input: impl Into<Value>) -> Self {
        self.assertion.failure_input = Some(input.into());
        self
    }

    // ========== Validity assertions ==========

    /// Assert the result of `is_valid`.
    pub fn valid(mut self, expected: bool) -> Self {
        self.assertion.valid = Some(expected);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sieve_rule::{Evaluation, Predicate, Rule};
    use sieve_types::{ConstraintError, Failure};

    fn violation(input: i64) -> TypeError {
        let result: Evaluation =
            Rule::predicate(Predicate::Gteq(Value::Int(5))).evaluate(&Value::Int(input));
        ConstraintError::new(result, Value::Int(input)).into()
    }

    #[test]
    fn test_value_assertion() {
        let assertion = AssertionBuilder::new().value(10i64).build();
        assert!(assertion
            .verify("s", &StepResult::Called(Ok(Value::Int(10))))
            .is_ok());
        assert!(assertion
            .verify("s", &StepResult::Called(Ok(Value::Int(11))))
            .is_err());
    }

    #[test]
    fn test_unexpected_error_fails() {
        let assertion = AssertionBuilder::new().value(10i64).build();
        let err = assertion
            .verify("s", &StepResult::Called(Err(violation(3))))
            .unwrap_err();
        assert!(err.to_string().contains("unexpected error"));
    }

    #[test]
    fn test_violation_assertion() {
        let assertion = AssertionBuilder::new()
            .violation_for(3i64)
            .failed(&["gteq?"])
            .build();
        assert!(assertion
            .verify("s", &StepResult::Called(Err(violation(3))))
            .is_ok());
        assert!(assertion
            .verify("s", &StepResult::Called(Ok(Value::Int(3))))
            .is_err());
    }

    #[test]
    fn test_failure_input_assertion() {
        let assertion = AssertionBuilder::new().violation().failure_for(2i64).build();
        let outcome = Outcome::Failure(Failure::new(Value::Int(2), violation(2)));
        assert!(assertion.verify("s", &StepResult::Tried(outcome)).is_ok());
    }
}
