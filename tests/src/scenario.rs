//! Scenario definition and builder.

use sieve_core::Value;
use sieve_types::SharedType;

use crate::assertion::{Assertion, AssertionBuilder};
use crate::error::{ScenarioError, ScenarioResult};
use crate::runner::Runner;

/// The operation a step performs on the scenario's type.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// `call(input)`.
    Call(Value),
    /// `call_or_else(input, || fallback)`.
    CallOrElse { input: Value, fallback: Value },
    /// `try_call(input)`.
    TryCall(Value),
    /// `is_valid(value)`.
    IsValid(Value),
}

impl Action {
    pub fn call(input: impl Into<Value>) -> Self {
        Self::Call(input.into())
    }

    pub fn call_or_else(input: impl Into<Value>, fallback: impl Into<Value>) -> Self {
        Self::CallOrElse {
            input: input.into(),
            fallback: fallback.into(),
        }
    }

    pub fn try_call(input: impl Into<Value>) -> Self {
        Self::TryCall(input.into())
    }

    pub fn is_valid(value: impl Into<Value>) -> Self {
        Self::IsValid(value.into())
    }
}

/// A step in a scenario with its assertion.
#[derive(Debug)]
pub struct Step {
    /// Step name (for reporting).
    pub name: String,
    /// What to do.
    pub action: Action,
    /// Assertion to verify the result.
    pub assertion: Assertion,
}

/// A sequence of operations against one type.
pub struct Scenario {
    /// Scenario name (for reporting).
    name: String,
    /// Type under test.
    type_: Option<SharedType>,
    /// Steps with assertions.
    steps: Vec<Step>,
}

impl Scenario {
    /// Create a new scenario with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_: None,
            steps: Vec::new(),
        }
    }

    /// Set the type under test.
    pub fn type_(mut self, type_: SharedType) -> Self {
        self.type_ = Some(type_);
        self
    }

    /// Add a step with an assertion.
    pub fn step<F>(mut self, name: impl Into<String>, action: Action, assertion_fn: F) -> Self
    where
        F: FnOnce(AssertionBuilder) -> AssertionBuilder,
    {
        let name = name.into();
        let assertion = assertion_fn(AssertionBuilder::new()).build();
        self.steps.push(Step {
            name,
            action,
            assertion,
        });
        self
    }

    /// Run the scenario and return the result.
    pub fn run(&self) -> ScenarioResult<()> {
        Runner::new(self)?.run()
    }

    /// Get the scenario name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the type under test.
    pub fn type_under_test(&self) -> ScenarioResult<&SharedType> {
        self.type_
            .as_ref()
            .ok_or_else(|| ScenarioError::missing_type(&self.name))
    }

    /// Get the steps.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sieve_types::{nominal, Primitive};

    #[test]
    fn test_scenario_builder() {
        let scenario = Scenario::new("test")
            .type_(nominal(Primitive::Int))
            .step("call", Action::call(1i64), |a| a.value(1i64))
            .step("valid", Action::is_valid(1i64), |a| a.valid(true));

        assert_eq!(scenario.name(), "test");
        assert_eq!(scenario.steps().len(), 2);
        assert_eq!(scenario.steps()[0].name, "call");
        assert_eq!(scenario.steps()[1].action, Action::is_valid(1i64));
    }

    #[test]
    fn test_missing_type() {
        let scenario = Scenario::new("empty").step("call", Action::call(1i64), |a| a);
        assert!(matches!(
            scenario.run(),
            Err(ScenarioError::MissingType { .. })
        ));
    }
}
