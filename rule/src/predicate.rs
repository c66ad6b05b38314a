//! Predicates: the leaf clauses of a rule.

use regex_lite::Regex;
use sieve_core::{Node, Value};
use std::cmp::Ordering;

use crate::error::{RuleError, RuleResult};

/// Primitive names accepted by the `type` option.
const TYPE_NAMES: &[&str] = &["Null", "Bool", "Int", "Float", "String", "List"];

/// A compiled regular expression that remembers its source.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern.
    pub fn new(source: impl Into<String>) -> RuleResult<Self> {
        let source = source.into();
        let regex =
            Regex::new(&source).map_err(|e| RuleError::invalid_pattern(&source, e.to_string()))?;
        Ok(Self { source, regex })
    }

    /// Compile one of the named formats (`email`, `slug`, `url`, `uuid`).
    pub fn named(name: &str) -> RuleResult<Self> {
        let source = match name {
            "email" => r"^[^@\s]+@[^@\s]+\.[^@\s]+$",
            "slug" => r"^[a-z0-9]+(?:-[a-z0-9]+)*$",
            "url" => r"^https?://[^\s/?#]+[^\s]*$",
            "uuid" => {
                r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$"
            }
            _ => return Err(RuleError::unknown_format(name)),
        };
        Self::new(source)
    }

    /// The pattern source.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Check whether the text matches.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

/// A single named check over an input value.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Input's type name equals the given primitive name.
    Type(String),
    /// Input equals the value.
    Eql(Value),
    Gt(Value),
    Gteq(Value),
    Lt(Value),
    Lteq(Value),
    /// Exact size (chars for strings, items for lists).
    Size(usize),
    MinSize(usize),
    MaxSize(usize),
    IncludedIn(Vec<Value>),
    ExcludedFrom(Vec<Value>),
    /// String input matches the pattern.
    Format(Pattern),
    /// Input is non-null and, if sized, non-empty.
    Filled,
}

impl Predicate {
    /// Build a predicate from one option entry.
    pub fn from_option(key: &str, value: &Value) -> RuleResult<Self> {
        match key {
            "type" => {
                let name = value
                    .as_str()
                    .filter(|name| TYPE_NAMES.contains(name))
                    .ok_or_else(|| {
                        RuleError::invalid_argument("type?", "primitive name", value.to_string())
                    })?;
                Ok(Predicate::Type(name.to_string()))
            }
            "eql" => Ok(Predicate::Eql(value.clone())),
            "gt" => comparable("gt?", value).map(Predicate::Gt),
            "gteq" | "min" => comparable("gteq?", value).map(Predicate::Gteq),
            "lt" => comparable("lt?", value).map(Predicate::Lt),
            "lteq" | "max" => comparable("lteq?", value).map(Predicate::Lteq),
            "size" => size_arg("size?", value).map(Predicate::Size),
            "min_size" | "length_min" => size_arg("min_size?", value).map(Predicate::MinSize),
            "max_size" | "length_max" => size_arg("max_size?", value).map(Predicate::MaxSize),
            "included_in" | "in" => list_arg("included_in?", value).map(Predicate::IncludedIn),
            "excluded_from" => list_arg("excluded_from?", value).map(Predicate::ExcludedFrom),
            "format" => {
                let name = value.as_str().ok_or_else(|| {
                    RuleError::invalid_argument("format?", "format name", value.type_name())
                })?;
                Pattern::named(name).map(Predicate::Format)
            }
            "match" => {
                let source = value.as_str().ok_or_else(|| {
                    RuleError::invalid_argument("format?", "pattern", value.type_name())
                })?;
                Pattern::new(source).map(Predicate::Format)
            }
            "filled" => match value {
                Value::Bool(true) => Ok(Predicate::Filled),
                other => Err(RuleError::invalid_argument("filled?", "true", other.to_string())),
            },
            _ => Err(RuleError::unknown_predicate(key)),
        }
    }

    /// Predicate name as it appears in failures and ASTs.
    pub fn name(&self) -> &'static str {
        match self {
            Predicate::Type(_) => "type?",
            Predicate::Eql(_) => "eql?",
            Predicate::Gt(_) => "gt?",
            Predicate::Gteq(_) => "gteq?",
            Predicate::Lt(_) => "lt?",
            Predicate::Lteq(_) => "lteq?",
            Predicate::Size(_) => "size?",
            Predicate::MinSize(_) => "min_size?",
            Predicate::MaxSize(_) => "max_size?",
            Predicate::IncludedIn(_) => "included_in?",
            Predicate::ExcludedFrom(_) => "excluded_from?",
            Predicate::Format(_) => "format?",
            Predicate::Filled => "filled?",
        }
    }

    /// Arguments the predicate was configured with.
    pub fn args(&self) -> Vec<Value> {
        match self {
            Predicate::Type(name) => vec![Value::from(name.as_str())],
            Predicate::Eql(v)
            | Predicate::Gt(v)
            | Predicate::Gteq(v)
            | Predicate::Lt(v)
            | Predicate::Lteq(v) => vec![v.clone()],
            Predicate::Size(n) | Predicate::MinSize(n) | Predicate::MaxSize(n) => {
                vec![Value::from(*n)]
            }
            Predicate::IncludedIn(values) | Predicate::ExcludedFrom(values) => {
                vec![Value::List(values.clone())]
            }
            Predicate::Format(pattern) => vec![Value::from(pattern.as_str())],
            Predicate::Filled => Vec::new(),
        }
    }

    /// Check the input.
    pub fn test(&self, input: &Value) -> bool {
        match self {
            Predicate::Type(name) => input.type_name() == name,
            Predicate::Eql(expected) => input == expected,
            Predicate::Gt(bound) => input.compare(bound) == Some(Ordering::Greater),
            Predicate::Gteq(bound) => matches!(
                input.compare(bound),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Predicate::Lt(bound) => input.compare(bound) == Some(Ordering::Less),
            Predicate::Lteq(bound) => {
                matches!(input.compare(bound), Some(Ordering::Less | Ordering::Equal))
            }
            Predicate::Size(n) => input.size() == Some(*n),
            Predicate::MinSize(n) => input.size().is_some_and(|size| size >= *n),
            Predicate::MaxSize(n) => input.size().is_some_and(|size| size <= *n),
            Predicate::IncludedIn(values) => values.contains(input),
            Predicate::ExcludedFrom(values) => !values.contains(input),
            Predicate::Format(pattern) => input.as_str().is_some_and(|s| pattern.is_match(s)),
            Predicate::Filled => match input {
                Value::Null => false,
                other => other.size().map_or(true, |size| size > 0),
            },
        }
    }

    pub fn to_ast(&self) -> Node {
        let mut children = vec![Node::value(self.name())];
        children.extend(self.args().into_iter().map(Node::Value));
        Node::branch("predicate", children)
    }
}

fn comparable(predicate: &str, value: &Value) -> RuleResult<Value> {
    match value {
        Value::Int(_) | Value::Float(_) | Value::String(_) => Ok(value.clone()),
        other => Err(RuleError::invalid_argument(
            predicate,
            "comparable value",
            other.type_name(),
        )),
    }
}

fn size_arg(predicate: &str, value: &Value) -> RuleResult<usize> {
    value
        .as_int()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| {
            RuleError::invalid_argument(predicate, "non-negative Int", value.to_string())
        })
}

fn list_arg(predicate: &str, value: &Value) -> RuleResult<Vec<Value>> {
    value
        .as_list()
        .map(<[Value]>::to_vec)
        .ok_or_else(|| RuleError::invalid_argument(predicate, "List", value.type_name()))
}
