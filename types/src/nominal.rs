//! Nominal primitive types.

use sieve_core::{Meta, Node, Value};
use std::sync::Arc;

use crate::capability::{SharedType, Type, TypeKind};
use crate::error::{CoercionError, TypeResult};
use crate::lax::Lax;
use crate::outcome::{Failure, Outcome};

/// Primitive a nominal type stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Null,
    Bool,
    Int,
    Float,
    String,
    List,
}

impl Primitive {
    /// Name matching `Value::type_name`.
    pub fn name(&self) -> &'static str {
        match self {
            Primitive::Null => "Null",
            Primitive::Bool => "Bool",
            Primitive::Int => "Int",
            Primitive::Float => "Float",
            Primitive::String => "String",
            Primitive::List => "List",
        }
    }

    /// Check if the value is an instance of this primitive.
    pub fn matches(&self, value: &Value) -> bool {
        value.type_name() == self.name()
    }
}

/// A named primitive type. Passes input through unchanged; `try_call` and
/// `is_valid` check the primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Nominal {
    primitive: Primitive,
    meta: Meta,
}

impl Nominal {
    pub fn new(primitive: Primitive) -> Self {
        Self {
            primitive,
            meta: Meta::new(),
        }
    }

    pub fn with_meta(&self, meta: Meta) -> Self {
        Self {
            primitive: self.primitive,
            meta,
        }
    }

    pub fn primitive(&self) -> Primitive {
        self.primitive
    }
}

impl Type for Nominal {
    fn kind(&self) -> TypeKind {
        TypeKind::Nominal
    }

    fn call(&self, input: Value) -> TypeResult<Value> {
        Ok(input)
    }

    fn call_or_else(&self, input: Value, _fallback: &mut dyn FnMut() -> Value) -> Value {
        input
    }

    fn try_call(&self, input: Value) -> Outcome {
        if self.primitive.matches(&input) {
            return Outcome::Success(input);
        }
        let message = format!("{} must be an instance of {}", input, self.primitive.name());
        Outcome::Failure(Failure::new(
            input.clone(),
            CoercionError::new(input, message),
        ))
    }

    fn is_valid(&self, value: &Value) -> bool {
        self.primitive.matches(value)
    }

    fn to_ast(&self, include_meta: bool) -> Node {
        let meta = if include_meta {
            Node::map(self.meta.clone())
        } else {
            Node::empty_map()
        };
        Node::branch("nominal", vec![Node::value(self.primitive.name()), meta])
    }

    fn lax(&self) -> SharedType {
        Arc::new(Lax::new(Arc::new(self.clone())))
    }

    fn meta(&self) -> &Meta {
        &self.meta
    }
}
