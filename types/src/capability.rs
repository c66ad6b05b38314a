//! The capability set every type implements.

use sieve_core::{Meta, Node, Value};
use std::fmt;
use std::sync::Arc;

use crate::constrained::ConstrainedType;
use crate::error::TypeResult;
use crate::outcome::{Failure, Outcome};

/// A shared, immutable type.
pub type SharedType = Arc<dyn Type>;

/// Closed set of type variants, used where behavior depends on the kind of
/// a type rather than its concrete implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Plain primitive type.
    Nominal,
    /// Applies a transform before delegating.
    Constructor,
    /// Never raises; falls back to the input.
    Lax,
    /// Enforces a rule around an inner type.
    Constrained,
}

/// Coercion and validation operations shared by all types.
///
/// Implementations are immutable and safe to share across threads.
pub trait Type: fmt::Debug + Send + Sync {
    /// Which variant this is.
    fn kind(&self) -> TypeKind;

    /// Apply the type, raising on invalid input.
    fn call(&self, input: Value) -> TypeResult<Value>;

    /// Apply the type, returning `fallback()` instead of raising.
    fn call_or_else(&self, input: Value, fallback: &mut dyn FnMut() -> Value) -> Value;

    /// Apply the type without raising.
    fn try_call(&self, input: Value) -> Outcome;

    /// Apply the type without raising, routing any failure through `on_failure`.
    fn try_call_with(
        &self,
        input: Value,
        on_failure: &mut dyn FnMut(Failure) -> Outcome,
    ) -> Outcome {
        match self.try_call(input) {
            Outcome::Failure(failure) => on_failure(failure),
            success => success,
        }
    }

    /// Check whether a value is already valid for this type.
    fn is_valid(&self, value: &Value) -> bool;

    /// Structural representation. `include_meta` controls metadata leaves.
    fn to_ast(&self, include_meta: bool) -> Node;

    /// Lenient variant that never raises.
    fn lax(&self) -> SharedType;

    fn meta(&self) -> &Meta;

    /// Marker for types that already carry a rule.
    fn is_constrained(&self) -> bool {
        false
    }

    /// Access the constrained type, so builders can merge rules instead of
    /// stacking wrappers.
    fn as_constrained(&self) -> Option<&ConstrainedType> {
        None
    }
}
