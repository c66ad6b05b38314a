//! Instrumented type that counts how often it is consulted.

use sieve_core::{Meta, Node, Value};
use sieve_types::{Failure, Outcome, SharedType, Type, TypeKind, TypeResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Invocation counters shared between a counting type and its observers.
#[derive(Debug, Default)]
pub struct Counters {
    calls: AtomicUsize,
    validations: AtomicUsize,
}

impl Counters {
    /// Number of `call`, `call_or_else` and `try_call` invocations.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of `is_valid` invocations.
    pub fn validations(&self) -> usize {
        self.validations.load(Ordering::SeqCst)
    }
}

/// Wraps a type and records every invocation.
#[derive(Debug, Clone)]
pub struct CountingType {
    type_: SharedType,
    counters: Arc<Counters>,
}

impl CountingType {
    pub fn new(type_: SharedType) -> Self {
        Self {
            type_,
            counters: Arc::new(Counters::default()),
        }
    }

    pub fn counters(&self) -> Arc<Counters> {
        Arc::clone(&self.counters)
    }

    /// Share the counting type, keeping a handle on its counters.
    pub fn shared(type_: SharedType) -> (SharedType, Arc<Counters>) {
        let counting = Self::new(type_);
        let counters = counting.counters();
        (Arc::new(counting), counters)
    }

    fn record_call(&self) {
        self.counters.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl Type for CountingType {
    fn kind(&self) -> TypeKind {
        self.type_.kind()
    }

    fn call(&self, input: Value) -> TypeResult<Value> {
        self.record_call();
        self.type_.call(input)
    }

    fn call_or_else(&self, input: Value, fallback: &mut dyn FnMut() -> Value) -> Value {
        self.record_call();
        self.type_.call_or_else(input, fallback)
    }

    fn try_call(&self, input: Value) -> Outcome {
        self.record_call();
        self.type_.try_call(input)
    }

    fn try_call_with(
        &self,
        input: Value,
        on_failure: &mut dyn FnMut(Failure) -> Outcome,
    ) -> Outcome {
        self.record_call();
        self.type_.try_call_with(input, on_failure)
    }

    fn is_valid(&self, value: &Value) -> bool {
        self.counters.validations.fetch_add(1, Ordering::SeqCst);
        self.type_.is_valid(value)
    }

    fn to_ast(&self, include_meta: bool) -> Node {
        self.type_.to_ast(include_meta)
    }

    fn lax(&self) -> SharedType {
        self.type_.lax()
    }

    fn meta(&self) -> &Meta {
        self.type_.meta()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sieve_types::{nominal, Primitive};

    #[test]
    fn test_counts_invocations() {
        // GIVEN
        let (counted, counters) = CountingType::shared(nominal(Primitive::Int));

        // WHEN
        let _ = counted.call(Value::Int(1));
        let _ = counted.try_call(Value::Int(2));
        let _ = counted.is_valid(&Value::Int(3));

        // THEN
        assert_eq!(counters.calls(), 2);
        assert_eq!(counters.validations(), 1);
    }
}
