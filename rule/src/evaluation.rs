//! Evaluation results.

use sieve_core::{Node, Value};
use std::fmt;

/// A clause that failed during evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct ClauseFailure {
    /// Predicate name, e.g. `gteq?`.
    pub predicate: &'static str,
    /// Arguments the predicate was configured with.
    pub args: Vec<Value>,
}

impl ClauseFailure {
    pub fn to_ast(&self) -> Node {
        let mut children = vec![Node::value(self.predicate)];
        children.extend(self.args.iter().cloned().map(Node::Value));
        Node::branch("predicate", children)
    }
}

impl fmt::Display for ClauseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.predicate)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}

/// Outcome of evaluating a rule against one input.
///
/// Success iff no clause failed. For AND-composed rules every failing
/// clause is reported, left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    input: Value,
    failures: Vec<ClauseFailure>,
}

impl Evaluation {
    pub fn new(input: Value, failures: Vec<ClauseFailure>) -> Self {
        Self { input, failures }
    }

    /// Check if every clause passed.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Check if at least one clause failed.
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// The evaluated input.
    pub fn input(&self) -> &Value {
        &self.input
    }

    /// Failing clauses in rule order.
    pub fn failures(&self) -> &[ClauseFailure] {
        &self.failures
    }

    /// Names of the failing predicates.
    pub fn failed_predicates(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.failures.iter().map(|f| f.predicate)
    }

    pub fn to_ast(&self) -> Node {
        if self.is_success() {
            return Node::branch("success", vec![Node::Value(self.input.clone())]);
        }
        let mut children = vec![Node::Value(self.input.clone())];
        children.extend(self.failures.iter().map(ClauseFailure::to_ast));
        Node::branch("failure", children)
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_success() {
            return write!(f, "success");
        }
        for (i, failure) in self.failures.iter().enumerate() {
            if i > 0 {
                write!(f, " AND ")?;
            }
            write!(f, "{}", failure)?;
        }
        Ok(())
    }
}
