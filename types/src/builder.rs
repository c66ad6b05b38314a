//! Builder operations for composing types.

use sieve_rule::{Predicate, Rule, RuleOptions, RuleResult};
use std::sync::Arc;
use tracing::debug;

use crate::capability::{SharedType, TypeKind};
use crate::constrained::ConstrainedType;
use crate::constructor::{Constructor, Transform};
use crate::nominal::{Nominal, Primitive};

/// Shared nominal type for a primitive.
pub fn nominal(primitive: Primitive) -> SharedType {
    Arc::new(Nominal::new(primitive))
}

/// Nominal type constrained to instances of its primitive.
pub fn strict(primitive: Primitive) -> ConstrainedType {
    ConstrainedType::new(
        nominal(primitive),
        Rule::predicate(Predicate::Type(primitive.name().to_string())),
    )
}

/// Composition operations available on every shared type.
pub trait Builder {
    /// Constrain by a rule built from `options`.
    fn constrained(&self, options: &RuleOptions) -> RuleResult<ConstrainedType>;

    /// Constrain by an already built rule.
    ///
    /// Constraining a type that is already constrained merges the rules into
    /// one wrapper. Constructor-kind types check the coerced output.
    fn constrained_by(&self, rule: Rule) -> ConstrainedType;

    /// Apply `transform` before this type.
    fn constructor(&self, transform: Transform) -> SharedType;
}

impl Builder for SharedType {
    fn constrained(&self, options: &RuleOptions) -> RuleResult<ConstrainedType> {
        let rule = Rule::from_options(options)?;
        Ok(self.constrained_by(rule))
    }

    fn constrained_by(&self, rule: Rule) -> ConstrainedType {
        if let Some(existing) = self.as_constrained() {
            debug!("coalescing constraint into existing rule");
            return existing.constrained_by(rule);
        }
        match self.kind() {
            TypeKind::Constructor => ConstrainedType::coercible(self.clone(), rule),
            _ => ConstrainedType::new(self.clone(), rule),
        }
    }

    fn constructor(&self, transform: Transform) -> SharedType {
        Arc::new(Constructor::new(self.clone(), transform))
    }
}
