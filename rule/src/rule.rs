//! Rules: predicates composed with logical AND.

use sieve_core::{Node, Value};

use crate::error::{RuleError, RuleResult};
use crate::evaluation::{ClauseFailure, Evaluation};
use crate::options::RuleOptions;
use crate::predicate::Predicate;

/// A validation rule.
///
/// Rules are immutable; `and` returns a new composite and leaves the
/// receiver untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// A single predicate clause.
    Predicate(Predicate),
    /// Both sides must hold.
    And(Box<Rule>, Box<Rule>),
}

impl Rule {
    pub fn predicate(predicate: Predicate) -> Self {
        Self::Predicate(predicate)
    }

    /// Build a rule from options, one predicate per key in key order,
    /// folded with `and`.
    pub fn from_options(options: &RuleOptions) -> RuleResult<Self> {
        let mut clauses = options
            .iter()
            .map(|(key, value)| Predicate::from_option(key, value).map(Rule::Predicate));

        let first = clauses.next().ok_or(RuleError::EmptyOptions)??;
        clauses.try_fold(first, |rule, clause| Ok(rule.and(clause?)))
    }

    /// Compose with another rule. The result accepts only inputs both accept.
    pub fn and(&self, other: Rule) -> Rule {
        Rule::And(Box::new(self.clone()), Box::new(other))
    }

    /// Cheap boolean check. Short-circuits at the first failing clause.
    pub fn test(&self, input: &Value) -> bool {
        match self {
            Rule::Predicate(predicate) => predicate.test(input),
            Rule::And(left, right) => left.test(input) && right.test(input),
        }
    }

    /// Full evaluation. Every failing clause is reported.
    pub fn evaluate(&self, input: &Value) -> Evaluation {
        let mut failures = Vec::new();
        self.collect_failures(input, &mut failures);
        Evaluation::new(input.clone(), failures)
    }

    fn collect_failures(&self, input: &Value, failures: &mut Vec<ClauseFailure>) {
        match self {
            Rule::Predicate(predicate) => {
                if !predicate.test(input) {
                    failures.push(ClauseFailure {
                        predicate: predicate.name(),
                        args: predicate.args(),
                    });
                }
            }
            Rule::And(left, right) => {
                left.collect_failures(input, failures);
                right.collect_failures(input, failures);
            }
        }
    }

    /// All predicate clauses, left to right.
    pub fn clauses(&self) -> Vec<&Predicate> {
        match self {
            Rule::Predicate(predicate) => vec![predicate],
            Rule::And(left, right) => {
                let mut clauses = left.clauses();
                clauses.extend(right.clauses());
                clauses
            }
        }
    }

    pub fn to_ast(&self) -> Node {
        match self {
            Rule::Predicate(predicate) => predicate.to_ast(),
            Rule::And(left, right) => Node::branch("and", vec![left.to_ast(), right.to_ast()]),
        }
    }
}

impl From<Predicate> for Rule {
    fn from(predicate: Predicate) -> Self {
        Self::Predicate(predicate)
    }
}
