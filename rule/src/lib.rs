//! Sieve Rule
//!
//! Validation rules that constrained types enforce.
//!
//! Responsibilities:
//! - Build rules from predicate option maps
//! - Compose rules with logical AND
//! - Cheap boolean tests that stop at the first failing clause
//! - Full evaluations that report every failing clause
//! - Stable structural ASTs

mod error;
mod evaluation;
mod options;
mod predicate;
mod rule;

pub use error::{RuleError, RuleResult};
pub use evaluation::{ClauseFailure, Evaluation};
pub use options::RuleOptions;
pub use predicate::{Pattern, Predicate};
pub use rule::Rule;
