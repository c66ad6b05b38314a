//! Lax types: never raise, hand back the input instead.

use sieve_core::{Meta, Node, Value};
use std::sync::Arc;

use crate::capability::{SharedType, Type, TypeKind};
use crate::error::TypeResult;
use crate::outcome::{Failure, Outcome};

#[derive(Debug, Clone)]
pub struct Lax {
    type_: SharedType,
}

impl Lax {
    pub fn new(type_: SharedType) -> Self {
        Self { type_ }
    }

    pub fn inner(&self) -> &SharedType {
        &self.type_
    }
}

impl Type for Lax {
    fn kind(&self) -> TypeKind {
        TypeKind::Lax
    }

    /// Never fails: invalid input comes back unchanged.
    fn call(&self, input: Value) -> TypeResult<Value> {
        let original = input.clone();
        Ok(self.type_.call_or_else(input, &mut || original.clone()))
    }

    fn call_or_else(&self, input: Value, fallback: &mut dyn FnMut() -> Value) -> Value {
        self.type_.call_or_else(input, fallback)
    }

    fn try_call(&self, input: Value) -> Outcome {
        self.type_.try_call(input)
    }

    fn try_call_with(
        &self,
        input: Value,
        on_failure: &mut dyn FnMut(Failure) -> Outcome,
    ) -> Outcome {
        self.type_.try_call_with(input, on_failure)
    }

    fn is_valid(&self, value: &Value) -> bool {
        self.type_.is_valid(value)
    }

    fn to_ast(&self, include_meta: bool) -> Node {
        Node::branch("lax", vec![self.type_.to_ast(include_meta)])
    }

    fn lax(&self) -> SharedType {
        Arc::new(self.clone())
    }

    fn meta(&self) -> &Meta {
        self.type_.meta()
    }
}
