//! Constrained types.
//!
//! A `ConstrainedType` wraps an inner type with a rule. The rule is enforced
//! before anything is delegated to the inner type, and the wrapper exposes
//! the same capability set, so it can stand in wherever a type is expected.
//!
//! Configuring operations (`constrained`, `with_meta`, `with_options`) never
//! mutate the receiver; they return a new value.

use sieve_core::{Meta, Node, Options, Value};
use sieve_rule::{Evaluation, Rule, RuleOptions, RuleResult};
use std::sync::Arc;
use tracing::{debug, trace};

use crate::capability::{SharedType, Type, TypeKind};
use crate::error::{ConstraintError, TypeResult};
use crate::outcome::{Failure, Outcome};

/// When the rule is checked relative to the inner type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enforcement {
    /// Check the raw input, then delegate.
    Input,
    /// Delegate first, then check the coerced output. Used for
    /// constructor-kind inner types.
    Output,
}

/// An inner type gated behind a rule.
#[derive(Debug, Clone)]
pub struct ConstrainedType {
    type_: SharedType,
    rule: Rule,
    options: Options,
    meta: Meta,
    enforcement: Enforcement,
}

impl ConstrainedType {
    /// Constrain `type_` by `rule`, checking raw input before delegating.
    pub fn new(type_: SharedType, rule: Rule) -> Self {
        Self {
            type_,
            rule,
            options: Options::new(),
            meta: Meta::new(),
            enforcement: Enforcement::Input,
        }
    }

    /// Constrain `type_` by `rule`, checking the inner type's output.
    pub fn coercible(type_: SharedType, rule: Rule) -> Self {
        Self {
            enforcement: Enforcement::Output,
            ..Self::new(type_, rule)
        }
    }

    pub fn inner(&self) -> &SharedType {
        &self.type_
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn enforcement(&self) -> Enforcement {
        self.enforcement
    }

    pub fn with_meta(&self, meta: Meta) -> Self {
        Self {
            meta,
            ..self.clone()
        }
    }

    pub fn with_options(&self, options: Options) -> Self {
        Self {
            options,
            ..self.clone()
        }
    }

    /// Narrow by a rule built from `options`.
    ///
    /// The new rule is `self.rule AND Rule::from_options(options)`; existing
    /// clauses are never dropped.
    pub fn constrained(&self, options: &RuleOptions) -> RuleResult<Self> {
        let rule = Rule::from_options(options)?;
        Ok(self.constrained_by(rule))
    }

    /// Narrow by an already built rule.
    pub fn constrained_by(&self, rule: Rule) -> Self {
        let rule = self.rule.and(rule);
        debug!(clauses = rule.clauses().len(), "narrowing constrained type");
        Self {
            rule,
            ..self.clone()
        }
    }

    /// Case equality: same as `is_valid`.
    pub fn matches(&self, value: &Value) -> bool {
        self.is_valid(value)
    }

    /// Run an operation on the inner type.
    ///
    /// If the response is constructor-kind, or the same kind as the inner
    /// type, it is wrapped again with this rule so chained transformations
    /// keep the constraint. Any other response is returned as is.
    pub fn delegate(&self, op: impl FnOnce(&SharedType) -> SharedType) -> SharedType {
        let response = op(&self.type_);
        if self.decorates(response.as_ref()) {
            Arc::new(Self {
                type_: response,
                ..self.clone()
            })
        } else {
            response
        }
    }

    fn decorates(&self, response: &dyn Type) -> bool {
        response.kind() == TypeKind::Constructor || response.kind() == self.type_.kind()
    }

    fn violation(&self, result: Evaluation, input: Value) -> ConstraintError {
        trace!(input = %input, failed = %result, "constraint violated");
        ConstraintError::new(result, input)
    }
}

impl Type for ConstrainedType {
    fn kind(&self) -> TypeKind {
        TypeKind::Constrained
    }

    /// Errors from the inner type propagate unchanged.
    fn call(&self, input: Value) -> TypeResult<Value> {
        match self.enforcement {
            Enforcement::Input => {
                let result = self.rule.evaluate(&input);
                if result.is_success() {
                    self.type_.call(input)
                } else {
                    Err(self.violation(result, input).into())
                }
            }
            Enforcement::Output => {
                let coerced = self.type_.call(input.clone())?;
                let result = self.rule.evaluate(&coerced);
                if result.is_success() {
                    Ok(coerced)
                } else {
                    Err(self.violation(result, input).into())
                }
            }
        }
    }

    /// Uses the boolean `Rule::test` so no diagnostics are built.
    fn call_or_else(&self, input: Value, fallback: &mut dyn FnMut() -> Value) -> Value {
        match self.enforcement {
            Enforcement::Input => {
                if self.rule.test(&input) {
                    self.type_.call_or_else(input, fallback)
                } else {
                    fallback()
                }
            }
            Enforcement::Output => {
                let mut fell_back = false;
                let coerced = self.type_.call_or_else(input, &mut || {
                    fell_back = true;
                    fallback()
                });
                if fell_back || self.rule.test(&coerced) {
                    coerced
                } else {
                    fallback()
                }
            }
        }
    }

    fn try_call(&self, input: Value) -> Outcome {
        self.try_call_with(input, &mut Outcome::Failure)
    }

    fn try_call_with(
        &self,
        input: Value,
        on_failure: &mut dyn FnMut(Failure) -> Outcome,
    ) -> Outcome {
        match self.enforcement {
            Enforcement::Input => {
                let result = self.rule.evaluate(&input);
                if result.is_success() {
                    self.type_.try_call_with(input, on_failure)
                } else {
                    let error = self.violation(result, input.clone());
                    on_failure(Failure::new(input, error))
                }
            }
            Enforcement::Output => match self.type_.try_call(input.clone()) {
                Outcome::Success(coerced) => {
                    let result = self.rule.evaluate(&coerced);
                    if result.is_success() {
                        Outcome::Success(coerced)
                    } else {
                        let error = self.violation(result, input);
                        on_failure(Failure::new(coerced, error))
                    }
                }
                Outcome::Failure(failure) => on_failure(failure),
            },
        }
    }

    /// The rule is tested first; the inner type is not consulted once it fails.
    fn is_valid(&self, value: &Value) -> bool {
        self.rule.test(value) && self.type_.is_valid(value)
    }

    fn to_ast(&self, include_meta: bool) -> Node {
        let meta = if include_meta {
            Node::map(self.meta.clone())
        } else {
            Node::empty_map()
        };
        Node::branch(
            "constrained",
            vec![self.type_.to_ast(include_meta), self.rule.to_ast(), meta],
        )
    }

    /// A lax type cannot enforce a hard rule, so this returns the inner
    /// type's lax variant.
    fn lax(&self) -> SharedType {
        self.type_.lax()
    }

    fn meta(&self) -> &Meta {
        &self.meta
    }

    fn is_constrained(&self) -> bool {
        true
    }

    fn as_constrained(&self) -> Option<&ConstrainedType> {
        Some(self)
    }
}

impl PartialEq for ConstrainedType {
    fn eq(&self, other: &Self) -> bool {
        self.enforcement == other.enforcement
            && self.rule == other.rule
            && self.options == other.options
            && self.meta == other.meta
            && self.type_.to_ast(true) == other.type_.to_ast(true)
    }
}
