//! Constructor types: apply a transform, then delegate.

use sieve_core::{Meta, Node, Value};
use std::fmt;
use std::sync::Arc;

use crate::capability::{SharedType, Type, TypeKind};
use crate::error::{CoercionError, TypeResult};
use crate::lax::Lax;
use crate::outcome::{Failure, Outcome};

type TransformFn = dyn Fn(&Value) -> Result<Value, CoercionError> + Send + Sync;

/// A named, fallible value transform.
///
/// Transforms are identified by name in ASTs and comparisons.
#[derive(Clone)]
pub struct Transform {
    name: String,
    func: Arc<TransformFn>,
}

impl Transform {
    pub fn new(
        name: impl Into<String>,
        func: impl Fn(&Value) -> Result<Value, CoercionError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apply(&self, input: &Value) -> Result<Value, CoercionError> {
        (self.func)(input)
    }

    /// Parse strings and whole floats into Int.
    pub fn to_int() -> Self {
        Self::new("to_int", |input| match input {
            Value::Int(_) => Ok(input.clone()),
            Value::Float(f) if f.fract() == 0.0 && in_i64_range(*f) => Ok(Value::Int(*f as i64)),
            Value::String(s) => s.trim().parse::<i64>().map(Value::Int).map_err(|e| {
                CoercionError::new(input.clone(), format!("invalid Int {}: {}", input, e))
            }),
            other => Err(not_coercible(other, "Int")),
        })
    }

    /// Parse strings and widen ints into Float.
    pub fn to_float() -> Self {
        Self::new("to_float", |input| match input {
            Value::Float(_) => Ok(input.clone()),
            Value::Int(i) => Ok(Value::Float(*i as f64)),
            Value::String(s) => s.trim().parse::<f64>().map(Value::Float).map_err(|e| {
                CoercionError::new(input.clone(), format!("invalid Float {}: {}", input, e))
            }),
            other => Err(not_coercible(other, "Float")),
        })
    }

    /// Render scalars as strings.
    pub fn to_string() -> Self {
        Self::new("to_string", |input| match input {
            Value::String(_) => Ok(input.clone()),
            Value::Bool(b) => Ok(Value::String(b.to_string())),
            Value::Int(i) => Ok(Value::String(i.to_string())),
            Value::Float(f) => Ok(Value::String(f.to_string())),
            other => Err(not_coercible(other, "String")),
        })
    }

    /// Parse the usual truthy/falsy spellings into Bool.
    pub fn to_bool() -> Self {
        Self::new("to_bool", |input| match input {
            Value::Bool(_) => Ok(input.clone()),
            Value::Int(1) => Ok(Value::Bool(true)),
            Value::Int(0) => Ok(Value::Bool(false)),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "t" | "yes" | "y" | "on" | "1" => Ok(Value::Bool(true)),
                "false" | "f" | "no" | "n" | "off" | "0" => Ok(Value::Bool(false)),
                _ => Err(not_coercible(input, "Bool")),
            },
            other => Err(not_coercible(other, "Bool")),
        })
    }

    fn to_ast(&self) -> Node {
        Node::branch("fn", vec![Node::value(self.name.as_str())])
    }
}

/// Whole floats in this range convert to i64 exactly. `i64::MAX as f64` is
/// 2^63, one past the largest i64.
fn in_i64_range(f: f64) -> bool {
    f >= i64::MIN as f64 && f < i64::MAX as f64
}

fn not_coercible(input: &Value, target: &str) -> CoercionError {
    CoercionError::new(
        input.clone(),
        format!("{} cannot be coerced to {}", input, target),
    )
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Transform {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// Applies a transform to the input, then hands the result to the inner type.
#[derive(Debug, Clone)]
pub struct Constructor {
    type_: SharedType,
    transform: Transform,
}

impl Constructor {
    pub fn new(type_: SharedType, transform: Transform) -> Self {
        Self { type_, transform }
    }

    pub fn inner(&self) -> &SharedType {
        &self.type_
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }
}

impl Type for Constructor {
    fn kind(&self) -> TypeKind {
        TypeKind::Constructor
    }

    fn call(&self, input: Value) -> TypeResult<Value> {
        let coerced = self.transform.apply(&input)?;
        self.type_.call(coerced)
    }

    fn call_or_else(&self, input: Value, fallback: &mut dyn FnMut() -> Value) -> Value {
        match self.transform.apply(&input) {
            Ok(coerced) => self.type_.call_or_else(coerced, fallback),
            Err(_) => fallback(),
        }
    }

    fn try_call(&self, input: Value) -> Outcome {
        match self.transform.apply(&input) {
            Ok(coerced) => self.type_.try_call(coerced),
            Err(e) => Outcome::Failure(Failure::new(input, e)),
        }
    }

    fn try_call_with(
        &self,
        input: Value,
        on_failure: &mut dyn FnMut(Failure) -> Outcome,
    ) -> Outcome {
        match self.transform.apply(&input) {
            Ok(coerced) => self.type_.try_call_with(coerced, on_failure),
            Err(e) => on_failure(Failure::new(input, e)),
        }
    }

    fn is_valid(&self, value: &Value) -> bool {
        self.type_.is_valid(value)
    }

    fn to_ast(&self, include_meta: bool) -> Node {
        Node::branch(
            "constructor",
            vec![self.type_.to_ast(include_meta), self.transform.to_ast()],
        )
    }

    /// Lax over a constructor whose inner type is itself lax, so a failed
    /// transform also falls back to the input.
    fn lax(&self) -> SharedType {
        let constructor = Constructor::new(self.type_.lax(), self.transform.clone());
        Arc::new(Lax::new(Arc::new(constructor)))
    }

    fn meta(&self) -> &Meta {
        self.type_.meta()
    }
}
